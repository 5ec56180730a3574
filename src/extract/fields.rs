use crate::markup::{clean_text, walk, Element, Node};

use super::render::fragment_to_markdown;

const STRUCTURAL_TAGS: &[&str] = &["ul", "ol", "li", "p"];

pub fn namespace(region: &Element) -> Option<String> {
    let el = walk::find(region, &|e| e.has_class("card-namespace"))?;
    let text = clean_text(&el.text());
    let value = text.replacen("Namespace:", "", 1);
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Page title and type badge, both from the title card.
pub fn title_and_type(region: &Element) -> (Option<String>, Option<String>) {
    let Some(card) = walk::find(region, &|e| e.has_class("card-title")) else {
        return (None, None);
    };
    let title = walk::find(card, &|e| e.is("h1"))
        .map(|h1| clean_text(&h1.text()))
        .filter(|t| !t.is_empty());
    let badge = walk::find(card, &|e| e.has_class("bg-gray-200"))
        .map(|b| clean_text(&b.text()))
        .filter(|t| !t.is_empty());
    (title, badge)
}

pub fn description(region: &Element) -> Option<String> {
    labeled_card(region, "card-description", "Description")
}

pub fn remarks(region: &Element) -> Option<String> {
    labeled_card(region, "card-remarks", "Remarks")
}

/// Rendered hierarchy tree from the right-hand column.
pub fn hierarchy(column: &Element) -> Option<String> {
    non_empty(fragment_to_markdown(&inner_markup(column)))
}

fn labeled_card(region: &Element, class: &str, label: &str) -> Option<String> {
    let card = walk::find(region, &|e| e.has_class(class))?;
    let marker = format!("<strong>{label}:</strong>");
    let html = inner_markup(card).replacen(&marker, "", 1);
    non_empty(fragment_to_markdown(html.trim()))
}

/// Inner markup of `el` reduced to the tags the fragment renderer knows.
///
/// `strong` keeps only its flattened text, `br` becomes a newline and any
/// other element is unwrapped.
pub fn inner_markup(el: &Element) -> String {
    let mut out = String::new();
    write_markup(el, &mut out);
    out
}

fn write_markup(el: &Element, out: &mut String) {
    for child in &el.children {
        match child {
            Node::Text(t) => out.push_str(&escape(t)),
            Node::Comment(_) => {}
            Node::Element(e) if e.is("br") => out.push('\n'),
            Node::Element(e) if e.is("strong") => {
                out.push_str("<strong>");
                out.push_str(&escape(&e.text()));
                out.push_str("</strong>");
            }
            Node::Element(e) => {
                let tag = e.tag.to_ascii_lowercase();
                if STRUCTURAL_TAGS.contains(&tag.as_str()) {
                    out.push_str(&format!("<{tag}>"));
                    write_markup(e, out);
                    out.push_str(&format!("</{tag}>"));
                } else {
                    write_markup(e, out);
                }
            }
        }
    }
}

/// Keep page text from being read as markup by the fragment renderer.
fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;")
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::parse_document;
    use pretty_assertions::assert_eq;

    fn page(body: &str) -> Element {
        parse_document(&format!("<html><body>{body}</body></html>"))
    }

    #[test]
    fn namespace_strips_label() {
        let root = page(r#"<div class="card-namespace"> <b>Namespace:</b>
            Autodesk.Revit.DB </div>"#);
        assert_eq!(namespace(&root).as_deref(), Some("Autodesk.Revit.DB"));
    }

    #[test]
    fn namespace_empty_is_absent() {
        let root = page(r#"<div class="card-namespace">Namespace:</div>"#);
        assert_eq!(namespace(&root), None);
        assert_eq!(namespace(&page("<p>nothing</p>")), None);
    }

    #[test]
    fn title_and_badge() {
        let root = page(
            r#"<div class="card-title"><h1>  Wall
                Class </h1><span class="px-2 bg-gray-200">Class</span></div>"#,
        );
        let (title, badge) = title_and_type(&root);
        assert_eq!(title.as_deref(), Some("Wall Class"));
        assert_eq!(badge.as_deref(), Some("Class"));
    }

    #[test]
    fn title_without_badge() {
        let root = page(r#"<div class="card-title"><h1>Wall</h1></div>"#);
        assert_eq!(title_and_type(&root), (Some("Wall".to_string()), None));
    }

    #[test]
    fn description_keeps_structure() {
        let root = page(
            r#"<div class="card-description"><strong>Description:</strong>
            <p>Represents a <strong>wall</strong> in Autodesk Revit.</p>
            <ul><li>Basic</li><li>Curtain</li></ul></div>"#,
        );
        assert_eq!(
            description(&root).as_deref(),
            Some("Represents a **wall** in Autodesk Revit.\n\n- Basic\n- Curtain")
        );
    }

    #[test]
    fn literal_angle_brackets_survive() {
        let root = page(
            r#"<div class="card-remarks"><strong>Remarks:</strong>
            <p>Returns IList&lt;ElementId&gt;; wrap text in &lt;p&gt; &amp; check.</p></div>"#,
        );
        assert_eq!(
            remarks(&root).as_deref(),
            Some("Returns IList<ElementId>; wrap text in <p> & check.")
        );
    }

    #[test]
    fn remarks_label_only_is_absent() {
        let root = page(r#"<div class="card-remarks"><strong>Remarks:</strong>  </div>"#);
        assert_eq!(remarks(&root), None);
    }

    #[test]
    fn inner_markup_unwraps_unknown_tags() {
        let root = page(r#"<div id="x"><a href="/y">link</a><br><span><em>it</em></span><!-- c --></div>"#);
        let div = walk::find(&root, &|e| e.attr("id") == Some("x")).unwrap();
        assert_eq!(inner_markup(div), "link\nit");
    }

    #[test]
    fn inner_markup_flattens_strong() {
        let root = page(r#"<div id="x"><p><strong>A <em>b</em></strong></p></div>"#);
        let div = walk::find(&root, &|e| e.attr("id") == Some("x")).unwrap();
        assert_eq!(inner_markup(div), "<p><strong>A b</strong></p>");
    }

    #[test]
    fn hierarchy_renders_list() {
        let root = page(
            "<div id=\"h\"><ul>\n<li>System.Object</li>\n<li>Autodesk.Revit.DB.Element</li>\n</ul></div>",
        );
        let col = walk::find(&root, &|e| e.attr("id") == Some("h")).unwrap();
        assert_eq!(
            hierarchy(col).as_deref(),
            Some("- System.Object\n- Autodesk.Revit.DB.Element")
        );
    }
}
