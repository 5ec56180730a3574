//! `rvtdocs.com` search API: POST a query for one version year, get back
//! fully described candidates.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ResultType, SearchResult};
use crate::client::DocsClient;
use crate::error::{DocsError, Result};

pub const BACKEND: &str = "rvtdocs.com";

static DESCRIPTION_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^Description:\s*").unwrap());
static NAMESPACE_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^Namespace:\s*").unwrap());

#[derive(Debug, Serialize)]
struct SearchBody<'a> {
    query: &'a str,
    current_version: String,
    include_description: bool,
}

#[derive(Debug, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub current_version_results: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub namespace: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub url: Option<String>,
}

pub async fn search(
    client: &DocsClient,
    query: &str,
    year: u16,
    limit: usize,
) -> Result<Vec<SearchResult>> {
    let transport = |source| DocsError::BackendTransport {
        backend: BACKEND,
        source,
    };
    let body = SearchBody {
        query,
        current_version: year.to_string(),
        include_description: false,
    };

    debug!(query, year, limit, "querying {}", BACKEND);
    let resp = client
        .http
        .post(&client.settings.search_url)
        .json(&body)
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
    Ok(normalize(data, limit))
}

/// Map the first `limit` candidates onto `SearchResult`. Missing strings
/// become `""` so the richness comparison sees them as empty.
pub fn normalize(data: Response, limit: usize) -> Vec<SearchResult> {
    data.current_version_results
        .into_iter()
        .take(limit)
        .map(|c| SearchResult {
            title: c.title.unwrap_or_default(),
            description: strip_label(&DESCRIPTION_LABEL_RE, c.description),
            namespace: Some(strip_label(&NAMESPACE_LABEL_RE, c.namespace)),
            kind: ResultType::from_token(c.kind.as_deref().unwrap_or("")),
            url: c.url.unwrap_or_default(),
        })
        .collect()
}

fn strip_label(re: &Regex, value: Option<String>) -> String {
    let value = value.unwrap_or_default();
    re.replace(&value, "").into_owned()
}
