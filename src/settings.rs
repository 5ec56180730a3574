use std::time::Duration;

use config::{Config, Environment};
use serde::Deserialize;

use crate::error::Result;

/// Endpoints, credentials and defaults. Loaded once in `main` and handed to
/// `DocsClient`; nothing reads the environment after startup.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub docs_origin: String,
    pub search_url: String,
    pub autocomplete_url: String,
    pub autocomplete_key: String,
    pub autocomplete_client: String,
    pub autocomplete_client_id: String,
    pub default_year: u16,
    pub request_timeout_secs: u64,
    pub fetch_concurrency: usize,
    pub openai_base_url: String,
    pub openai_api_key: Option<String>,
    pub openai_vector_store_id: Option<String>,
}

impl Settings {
    /// Defaults overridden by `RVTDOCS_*` variables, plus `OPENAI_API_KEY`
    /// and `OPENAI_VECTOR_STORE_ID` for the vector store.
    pub fn load() -> Result<Self> {
        let settings = Self::builder()?
            .add_source(Environment::with_prefix("OPENAI").keep_prefix(true))
            .add_source(Environment::with_prefix("RVTDOCS").try_parsing(true))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>> {
        Ok(Config::builder()
            .set_default("docs_origin", "https://rvtdocs.com")?
            .set_default("search_url", "https://rvtdocs.com/search/api/search")?
            .set_default("autocomplete_url", "https://ac.cnstrc.com/autocomplete")?
            .set_default("autocomplete_key", "key_yyAC1mb0cTgZTwSo")?
            .set_default("autocomplete_client", "ciojs-2.1233.4")?
            .set_default("autocomplete_client_id", "d705c917-8e5a-491f-8bc4-9b43e78de48c")?
            .set_default("default_year", 2025)?
            .set_default("request_timeout_secs", 30)?
            .set_default("fetch_concurrency", 4)?
            .set_default("openai_base_url", "https://api.openai.com/v1")?)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Absolute page URL for a slug such as `2024/0530fbf2-...` or `/2024/...`.
    pub fn page_url(&self, slug: &str) -> String {
        format!(
            "{}/{}",
            self.docs_origin.trim_end_matches('/'),
            slug.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
impl Settings {
    /// Defaults only, with every endpoint rooted at `base` (a mock server).
    pub fn for_base_url(base: &str) -> Self {
        let mut settings: Settings = Self::builder()
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        settings.docs_origin = base.to_string();
        settings.search_url = format!("{base}/search/api/search");
        settings.autocomplete_url = format!("{base}/autocomplete");
        settings.openai_base_url = format!("{base}/v1");
        settings
    }
}
