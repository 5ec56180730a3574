pub mod aggregate;
pub mod autocomplete;
pub mod query;
pub mod rvtdocs;

use std::fmt;

use serde::Serialize;
use tracing::info;

use crate::client::DocsClient;
use crate::error::{DocsError, Result};

pub const MIN_YEAR: u16 = 2023;
pub const MAX_YEAR: u16 = 2026;
pub const MAX_RESULTS: usize = 50;

/// Documentation entity category, in vocabulary order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ResultType {
    Class,
    Constructor,
    Method,
    Methods,
    Property,
    Properties,
    Members,
    Interface,
    Enum,
    Unknown,
}

impl ResultType {
    pub const ALL: [ResultType; 10] = [
        ResultType::Class,
        ResultType::Constructor,
        ResultType::Method,
        ResultType::Methods,
        ResultType::Property,
        ResultType::Properties,
        ResultType::Members,
        ResultType::Interface,
        ResultType::Enum,
        ResultType::Unknown,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ResultType::Class => "Class",
            ResultType::Constructor => "Constructor",
            ResultType::Method => "Method",
            ResultType::Methods => "Methods",
            ResultType::Property => "Property",
            ResultType::Properties => "Properties",
            ResultType::Members => "Members",
            ResultType::Interface => "Interface",
            ResultType::Enum => "Enum",
            ResultType::Unknown => "Unknown",
        }
    }

    /// Parse a vocabulary token; anything unrecognized is `Unknown`.
    pub fn from_token(token: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == token.trim())
            .unwrap_or(ResultType::Unknown)
    }
}

impl fmt::Display for ResultType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One documentation entity as reported by a search backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(rename = "type")]
    pub kind: ResultType,
    pub url: String,
}

impl SearchResult {
    /// Number of fields holding an empty string. An absent namespace is not
    /// a field at all and never counts.
    pub fn empty_fields(&self) -> usize {
        [
            Some(self.title.as_str()),
            Some(self.description.as_str()),
            self.namespace.as_deref(),
            Some(self.url.as_str()),
        ]
        .into_iter()
        .flatten()
        .filter(|v| v.is_empty())
        .count()
    }
}

/// A validated search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub query: String,
    pub year: u16,
    pub max_results: usize,
    pub types: Vec<ResultType>,
}

impl SearchRequest {
    /// Validate every input; an empty `types` list means no filtering.
    pub fn new(query: &str, year: u16, max_results: usize, types: Vec<ResultType>) -> Result<Self> {
        let query = query::validate(query)?;
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(DocsError::YearOutOfRange(year));
        }
        if !(1..=MAX_RESULTS).contains(&max_results) {
            return Err(DocsError::MaxResultsOutOfRange(max_results));
        }
        let types = if types.is_empty() {
            ResultType::ALL.to_vec()
        } else {
            types
        };
        Ok(Self {
            query,
            year,
            max_results,
            types,
        })
    }

    /// How many candidates to ask each backend for. Leaves headroom for the
    /// entries deduplication will drop.
    pub fn backend_limit(&self) -> usize {
        self.max_results * 2
    }
}

/// Query both backends concurrently and return the ranked, deduplicated
/// results.
pub async fn search(client: &DocsClient, request: &SearchRequest) -> Result<Vec<SearchResult>> {
    let limit = request.backend_limit();
    let (primary, secondary) = tokio::try_join!(
        rvtdocs::search(client, &request.query, request.year, limit),
        autocomplete::search(client, &request.query, request.year, limit),
    )?;
    info!(
        query = %request.query,
        year = request.year,
        primary = primary.len(),
        secondary = secondary.len(),
        "search backends answered"
    );

    let keep = |r: &SearchResult| request.types.contains(&r.kind);
    let primary = primary.into_iter().filter(keep).collect();
    let secondary = secondary.into_iter().filter(keep).collect();
    Ok(aggregate::aggregate(primary, secondary, request.max_results))
}
