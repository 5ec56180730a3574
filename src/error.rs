use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DocsError>;

#[derive(Debug, Error)]
pub enum DocsError {
    #[error("main content section not found in {url}")]
    MainContentMissing { url: String },

    #[error("failed to fetch {url}: HTTP {status}")]
    PageStatus { url: String, status: StatusCode },

    #[error("failed to fetch {url}: {source}")]
    PageTransport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{backend} search failed: HTTP {status}")]
    BackendStatus {
        backend: &'static str,
        status: StatusCode,
    },

    #[error("{backend} search failed: {source}")]
    BackendTransport {
        backend: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid query {0:?}: expected \"Name\", \"Class.Member\" or \"Name(Arg, Arg)\"; single spaces only after commas")]
    InvalidQuery(String),

    #[error("year {0} is outside the supported range {min}-{max}", min = crate::search::MIN_YEAR, max = crate::search::MAX_YEAR)]
    YearOutOfRange(u16),

    #[error("max results {0} is outside the supported range 1-{max}", max = crate::search::MAX_RESULTS)]
    MaxResultsOutOfRange(usize),

    #[error("score threshold {0} is outside 0.0-1.0")]
    ThresholdOutOfRange(f32),

    #[error("vector search needs OPENAI_API_KEY and OPENAI_VECTOR_STORE_ID")]
    LibraryNotConfigured,

    #[error("invalid endpoint {0}")]
    Endpoint(String),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
