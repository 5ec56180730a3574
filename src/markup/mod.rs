pub mod anchor;
pub mod walk;

use scraper::{ElementRef, Html};

/// Owned markup tree. Converted once from the html5ever DOM so the rest of
/// the pipeline never touches parser-specific node types.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
    Comment(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }
}

impl Element {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// True when `class` is one of the whitespace-separated class tokens.
    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|c| c.split_whitespace().any(|token| token == class))
    }

    pub fn is(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            collect_text(child, &mut out);
        }
        out
    }
}

fn collect_text(node: &Node, out: &mut String) {
    match node {
        Node::Text(t) => out.push_str(t),
        Node::Element(el) => {
            for child in &el.children {
                collect_text(child, out);
            }
        }
        Node::Comment(_) => {}
    }
}

/// Parse an HTML document and return its `<html>` element as an owned tree.
pub fn parse_document(html: &str) -> Element {
    let doc = Html::parse_document(html);
    convert(doc.root_element())
}

fn convert(el: ElementRef<'_>) -> Element {
    let value = el.value();
    let attrs = value
        .attrs()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    let mut children = Vec::new();
    for child in el.children() {
        match child.value() {
            scraper::Node::Text(t) => children.push(Node::Text(t.text.to_string())),
            scraper::Node::Comment(c) => children.push(Node::Comment(c.comment.to_string())),
            scraper::Node::Element(_) => {
                if let Some(child_ref) = ElementRef::wrap(child) {
                    children.push(Node::Element(convert(child_ref)));
                }
            }
            _ => {}
        }
    }

    Element {
        tag: value.name().to_string(),
        attrs,
        children,
    }
}

/// Collapse whitespace runs to a single space and trim.
pub fn clean_text(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
