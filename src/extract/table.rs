use crate::markup::{clean_text, walk, Element};

/// Render a `<table>` as a pipe-delimited markdown table.
///
/// Returns `None` when the table has neither a header row nor any body row
/// with cells.
pub fn render(table: &Element) -> Option<String> {
    let mut md = String::new();

    let header = walk::find(table, &|e| e.is("thead")).and_then(|h| walk::find(h, &|e| e.is("tr")));
    if let Some(header) = header {
        let cells = cells(header, "th");
        if !cells.is_empty() {
            md.push_str(&row(&cells));
            md.push_str(&format!("|{}|\n", vec!["---"; cells.len()].join("|")));
        }
    }

    if let Some(body) = walk::find(table, &|e| e.is("tbody")) {
        for tr in walk::find_all(body, &|e| e.is("tr")) {
            let cells = cells(tr, "td");
            if !cells.is_empty() {
                md.push_str(&row(&cells));
            }
        }
    }

    if md.trim().is_empty() {
        None
    } else {
        Some(md)
    }
}

fn cells(tr: &Element, tag: &str) -> Vec<String> {
    walk::find_all(tr, &|e| e.is(tag))
        .into_iter()
        .map(|c| clean_text(&c.text()))
        .collect()
}

fn row(cells: &[String]) -> String {
    format!("| {} |\n", cells.join(" | "))
}
