//! Constructor.io autocomplete endpoint behind revitapidocs.com. It is the
//! only source for the aggregate "Methods" and "Properties" pages.

use reqwest::Url;
use serde::Deserialize;
use tracing::debug;

use super::{ResultType, SearchResult};
use crate::client::DocsClient;
use crate::error::{DocsError, Result};

pub const BACKEND: &str = "revitapidocs.com";

#[derive(Debug, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub sections: Sections,
}

#[derive(Debug, Default, Deserialize)]
pub struct Sections {
    #[serde(default, rename = "Products")]
    pub products: Vec<Product>,
}

#[derive(Debug, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub data: ProductData,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProductData {
    pub description: Option<String>,
    #[serde(default)]
    pub url: String,
    pub image_url: Option<String>,
}

pub async fn search(
    client: &DocsClient,
    query: &str,
    year: u16,
    limit: usize,
) -> Result<Vec<SearchResult>> {
    let settings = &client.settings;
    let mut url = Url::parse(&settings.autocomplete_url)
        .map_err(|e| DocsError::Endpoint(format!("{}: {e}", settings.autocomplete_url)))?;
    url.path_segments_mut()
        .map_err(|_| DocsError::Endpoint(settings.autocomplete_url.clone()))?
        .pop_if_empty()
        .push(query);

    let transport = |source| DocsError::BackendTransport {
        backend: BACKEND,
        source,
    };
    let timestamp = chrono::Utc::now().timestamp_millis().to_string();
    let num_results = limit.to_string();

    debug!(query, year, limit, "querying {}", BACKEND);
    let resp = client
        .http
        .get(url)
        .query(&[
            ("query", query),
            ("autocomplete_key", settings.autocomplete_key.as_str()),
            ("c", settings.autocomplete_client.as_str()),
            ("num_results", num_results.as_str()),
            ("i", settings.autocomplete_client_id.as_str()),
            ("s", "10"),
            ("_dt", timestamp.as_str()),
        ])
        .send()
        .await
        .map_err(transport)?;
    let status = resp.status();
    if !status.is_success() {
        return Err(DocsError::BackendStatus {
            backend: BACKEND,
            status,
        });
    }
    let data: Response = resp.json().await.map_err(transport)?;
    Ok(normalize(data, year))
}

pub fn normalize(data: Response, year: u16) -> Vec<SearchResult> {
    data.sections
        .products
        .into_iter()
        .map(|p| SearchResult {
            kind: infer_type(p.data.image_url.as_deref().unwrap_or("")),
            url: format!("/{year}/{}", p.data.url.split('.').next().unwrap_or("")),
            title: p.value,
            description: p.data.description.unwrap_or_default(),
            namespace: None,
        })
        .collect()
}

/// The icon file name carries the entity type, e.g. `.../Methods.gif`.
pub fn infer_type(image_url: &str) -> ResultType {
    ResultType::ALL
        .into_iter()
        .filter(|t| *t != ResultType::Unknown)
        .find(|t| image_url.contains(&format!("{}.gif", t.as_str())))
        .unwrap_or(ResultType::Unknown)
}
