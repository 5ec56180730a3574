use super::{Element, Node};

/// First element in pre-order depth-first traversal (starting with `el`
/// itself) that satisfies `pred`.
pub fn find<'a, P>(el: &'a Element, pred: &P) -> Option<&'a Element>
where
    P: Fn(&Element) -> bool,
{
    if pred(el) {
        return Some(el);
    }
    el.children
        .iter()
        .filter_map(Node::as_element)
        .find_map(|child| find(child, pred))
}

/// Every element satisfying `pred`, in document order.
pub fn find_all<'a, P>(el: &'a Element, pred: &P) -> Vec<&'a Element>
where
    P: Fn(&Element) -> bool,
{
    let mut out = Vec::new();
    collect(el, pred, &mut out);
    out
}

fn collect<'a, P>(el: &'a Element, pred: &P, out: &mut Vec<&'a Element>)
where
    P: Fn(&Element) -> bool,
{
    if pred(el) {
        out.push(el);
    }
    for child in el.children.iter().filter_map(Node::as_element) {
        collect(child, pred, out);
    }
}

/// Nearest strict ancestor of `target` inside `root` that satisfies `pred`.
///
/// The tree carries no parent links, so this walks down from `root` keeping
/// the current path and matches `target` by address.
pub fn find_ancestor<'a, P>(root: &'a Element, target: &Element, pred: &P) -> Option<&'a Element>
where
    P: Fn(&Element) -> bool,
{
    let mut path = Vec::new();
    if !path_to(root, target, &mut path) {
        return None;
    }
    // path ends with target itself
    path.pop();
    path.into_iter().rev().find(|&el| pred(el))
}

fn path_to<'a>(el: &'a Element, target: &Element, path: &mut Vec<&'a Element>) -> bool {
    path.push(el);
    if std::ptr::eq(el, target) {
        return true;
    }
    for child in el.children.iter().filter_map(Node::as_element) {
        if path_to(child, target, path) {
            return true;
        }
    }
    path.pop();
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::test_support::{comment, el, html, text};

    fn sample() -> Element {
        html(vec![
            comment("skip me"),
            el(
                "div",
                &[("class", "card")],
                vec![
                    text("x"),
                    el("span", &[("id", "a")], vec![text("one")]),
                    el(
                        "div",
                        &[("class", "inner")],
                        vec![el("span", &[("id", "b")], vec![text("two")])],
                    ),
                ],
            ),
            el("span", &[("id", "c")], vec![]),
        ])
    }

    #[test]
    fn find_is_preorder() {
        let root = sample();
        let span = find(&root, &|e| e.is("span")).unwrap();
        assert_eq!(span.attr("id"), Some("a"));
    }

    #[test]
    fn find_tests_start_node() {
        let root = sample();
        assert!(find(&root, &|e| e.is("html")).is_some());
        assert!(find(&root, &|e| e.is("table")).is_none());
    }

    #[test]
    fn find_all_in_document_order() {
        let root = sample();
        let ids: Vec<_> = find_all(&root, &|e| e.is("span"))
            .iter()
            .filter_map(|e| e.attr("id"))
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn ancestor_is_nearest_and_strict() {
        let root = sample();
        let b = find(&root, &|e| e.attr("id") == Some("b")).unwrap();
        let div = find_ancestor(&root, b, &|e| e.is("div")).unwrap();
        assert!(div.has_class("inner"));
        let card = find_ancestor(&root, b, &|e| e.has_class("card")).unwrap();
        assert!(card.has_class("card"));

        let inner = find(&root, &|e| e.has_class("inner")).unwrap();
        let outer = find_ancestor(&root, inner, &|e| e.is("div")).unwrap();
        assert!(outer.has_class("card"));
    }

    #[test]
    fn ancestor_missing() {
        let root = sample();
        let c = find(&root, &|e| e.attr("id") == Some("c")).unwrap();
        assert!(find_ancestor(&root, c, &|e| e.has_class("card")).is_none());
        // a structurally equal node from another tree is not part of this one
        let other = sample();
        let foreign = find(&other, &|e| e.attr("id") == Some("b")).unwrap();
        assert!(find_ancestor(&root, foreign, &|e| e.is("html")).is_none());
    }
}
