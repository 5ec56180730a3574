//! Comment-anchored region lookup.
//!
//! Documentation pages carry no stable ids or class names on their layout
//! columns; the only landmarks are HTML comments written by the page
//! template just before each region.

use super::{Element, Node};

pub const MAIN_CONTENT: &str = " Main content and footer ";
pub const LEFT_COLUMN: &str = " Left Column: Namespace, Title, Description, Remarks ";
pub const RIGHT_COLUMN: &str = " Right Column: Hierarchy - Only show div if hierarchy exists ";

/// Find the first comment (depth-first) containing `marker` and return the
/// first element among its following siblings.
///
/// The first matching comment decides: if no element follows it, the result
/// is `None` even when a later comment would also match.
pub fn find_after_comment<'a>(root: &'a Element, marker: &str) -> Option<&'a Element> {
    match search(root, marker) {
        Lookup::Found(el) => Some(el),
        Lookup::NoSibling | Lookup::Missing => None,
    }
}

enum Lookup<'a> {
    Found(&'a Element),
    NoSibling,
    Missing,
}

fn search<'a>(el: &'a Element, marker: &str) -> Lookup<'a> {
    for (i, child) in el.children.iter().enumerate() {
        match child {
            Node::Comment(c) if c.contains(marker) => {
                return el.children[i + 1..]
                    .iter()
                    .find_map(Node::as_element)
                    .map_or(Lookup::NoSibling, Lookup::Found);
            }
            Node::Element(inner) => match search(inner, marker) {
                Lookup::Missing => {}
                decided => return decided,
            },
            _ => {}
        }
    }
    Lookup::Missing
}
