pub mod fields;
pub mod render;
pub mod syntax;
pub mod table;

use tracing::{debug, warn};

use crate::client::DocsClient;
use crate::error::{DocsError, Result};
use crate::markup::{anchor, parse_document, walk, Element};
use syntax::SyntaxBlock;

/// Sections pulled from one documentation page, in output order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedDocument {
    pub namespace: Option<String>,
    pub title: Option<String>,
    pub type_badge: Option<String>,
    pub description: Option<String>,
    pub remarks: Option<String>,
    pub hierarchy: Option<String>,
    pub syntax: Vec<SyntaxBlock>,
    pub tables: Vec<String>,
}

impl ExtractedDocument {
    /// Sections joined by one blank line. Each part is emitted as-is, so
    /// blank lines inside code snippets are preserved.
    pub fn to_markdown(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        if let Some(ns) = &self.namespace {
            parts.push(format!("**Namespace:** {ns}"));
        }
        if let Some(title) = &self.title {
            parts.push(format!("# {title}"));
        }
        if let Some(badge) = &self.type_badge {
            parts.push(format!("**Type:** {badge}"));
        }
        for (heading, body) in [
            ("Description", &self.description),
            ("Remarks", &self.remarks),
            ("Hierarchy", &self.hierarchy),
        ] {
            if let Some(body) = body {
                parts.push(format!("## {heading}\n\n{body}"));
            }
        }
        parts.extend(self.syntax.iter().map(|b| b.to_markdown().trim_end().to_string()));
        parts.extend(self.tables.iter().map(|t| t.trim_end().to_string()));
        parts.join("\n\n")
    }
}

/// Locate every section of a parsed page.
///
/// Only the main content region is required; everything else is optional.
pub fn extract_document(root: &Element, url: &str) -> Result<ExtractedDocument> {
    let main = anchor::find_after_comment(root, anchor::MAIN_CONTENT).ok_or_else(|| {
        DocsError::MainContentMissing {
            url: url.to_string(),
        }
    })?;

    let left = match anchor::find_after_comment(main, anchor::LEFT_COLUMN) {
        Some(left) => left,
        None => {
            warn!(url, "left column marker missing, searching main content instead");
            main
        }
    };

    let (title, type_badge) = fields::title_and_type(left);
    let doc = ExtractedDocument {
        namespace: fields::namespace(left),
        title,
        type_badge,
        description: fields::description(left),
        remarks: fields::remarks(left),
        hierarchy: anchor::find_after_comment(main, anchor::RIGHT_COLUMN)
            .and_then(fields::hierarchy),
        syntax: syntax::extract(main),
        tables: walk::find_all(main, &|e| e.is("table"))
            .into_iter()
            .filter_map(table::render)
            .collect(),
    };
    debug!(
        url,
        syntax = doc.syntax.len(),
        tables = doc.tables.len(),
        "extracted page"
    );
    Ok(doc)
}

pub fn extract_html(html: &str, url: &str) -> Result<ExtractedDocument> {
    let root = parse_document(html);
    extract_document(&root, url)
}

/// Fetch a page and extract it.
pub async fn retrieve(client: &DocsClient, url: &str) -> Result<ExtractedDocument> {
    let html = client.fetch_page(url).await?;
    extract_html(&html, url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const URL: &str = "https://rvtdocs.com/2024/wall";

    fn fixture(name: &str) -> String {
        std::fs::read_to_string(format!("tests/fixtures/{name}")).unwrap()
    }

    #[test]
    fn wall_page_markdown() {
        let doc = extract_html(&fixture("wall.html"), URL).unwrap();
        assert_eq!(doc.to_markdown(), fixture("wall.md").trim_end());
    }

    #[test]
    fn wall_page_sections() {
        let doc = extract_html(&fixture("wall.html"), URL).unwrap();
        assert_eq!(doc.namespace.as_deref(), Some("Autodesk.Revit.DB"));
        assert_eq!(doc.title.as_deref(), Some("Wall Class"));
        assert_eq!(doc.type_badge.as_deref(), Some("Class"));
        assert_eq!(doc.syntax.len(), 1);
        assert_eq!(doc.syntax[0].snippets.len(), 3);
        // the empty placeholder table is dropped
        assert_eq!(doc.tables.len(), 2);
    }

    #[test]
    fn missing_hierarchy_omits_heading() {
        let html = fixture("wall.html").replace(
            "<!-- Right Column: Hierarchy - Only show div if hierarchy exists -->",
            "",
        );
        let doc = extract_html(&html, URL).unwrap();
        assert_eq!(doc.hierarchy, None);
        let md = doc.to_markdown();
        assert!(!md.contains("## Hierarchy"));
        assert!(md.contains("## Description"));
    }

    #[test]
    fn missing_main_content_is_fatal() {
        let html = fixture("wall.html").replace("<!-- Main content and footer -->", "");
        let err = extract_html(&html, URL).unwrap_err();
        assert!(matches!(err, DocsError::MainContentMissing { ref url } if url == URL));
        assert_eq!(err.to_string(), format!("main content section not found in {URL}"));
    }

    #[test]
    fn missing_left_column_falls_back_to_main() {
        let html = fixture("wall.html").replace(
            "<!-- Left Column: Namespace, Title, Description, Remarks -->",
            "",
        );
        let doc = extract_html(&html, URL).unwrap();
        assert_eq!(doc.title.as_deref(), Some("Wall Class"));
        assert_eq!(doc.namespace.as_deref(), Some("Autodesk.Revit.DB"));
    }

    #[test]
    fn code_blank_lines_survive() {
        let doc = ExtractedDocument {
            title: Some("Wall".into()),
            syntax: vec![SyntaxBlock {
                snippets: vec![syntax::Snippet {
                    language: syntax::Language::CSharp,
                    code: "a\n\n\n\nb".into(),
                }],
            }],
            ..Default::default()
        };
        assert_eq!(
            doc.to_markdown(),
            "# Wall\n\n## Syntax\n\n```csharp\na\n\n\n\nb\n```"
        );
    }

    #[test]
    fn empty_document_renders_empty() {
        assert_eq!(ExtractedDocument::default().to_markdown(), "");
    }

    #[tokio::test]
    async fn retrieve_fetches_and_extracts() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/2024/wall"))
            .respond_with(ResponseTemplate::new(200).set_body_string(fixture("wall.html")))
            .mount(&server)
            .await;

        let client = DocsClient::new(Settings::for_base_url(&server.uri())).unwrap();
        let url = client.settings.page_url("/2024/wall");
        let doc = retrieve(&client, &url).await.unwrap();
        assert_eq!(doc.title.as_deref(), Some("Wall Class"));
    }

    #[tokio::test]
    async fn retrieve_propagates_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = DocsClient::new(Settings::for_base_url(&server.uri())).unwrap();
        let url = client.settings.page_url("2024/missing");
        let err = retrieve(&client, &url).await.unwrap_err();
        assert!(matches!(err, DocsError::PageStatus { status, .. } if status.as_u16() == 404));
        assert!(err.to_string().contains("/2024/missing"));
    }
}
