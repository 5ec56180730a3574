//! Semantic search over the hosted vector store that holds the companion
//! library (samples, guides). Results are returned untouched.

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::client::DocsClient;
use crate::error::{DocsError, Result};
use crate::search::MAX_RESULTS;

pub const BACKEND: &str = "OpenAI vector store";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LibraryQuery {
    pub query: String,
    pub max_num_results: usize,
    pub ranking_options: RankingOptions,
    pub rewrite_query: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingOptions {
    pub ranker: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score_threshold: Option<f32>,
}

impl LibraryQuery {
    pub fn new(
        query: &str,
        max_results: usize,
        score_threshold: Option<f32>,
        rewrite_query: bool,
    ) -> Result<Self> {
        if !(1..=MAX_RESULTS).contains(&max_results) {
            return Err(DocsError::MaxResultsOutOfRange(max_results));
        }
        if let Some(t) = score_threshold {
            if !(0.0..=1.0).contains(&t) {
                return Err(DocsError::ThresholdOutOfRange(t));
            }
        }
        Ok(Self {
            query: query.to_string(),
            max_num_results: max_results,
            ranking_options: RankingOptions {
                ranker: "auto",
                score_threshold,
            },
            rewrite_query,
        })
    }
}

pub async fn search(client: &DocsClient, query: &LibraryQuery) -> Result<Value> {
    let settings = &client.settings;
    let (Some(api_key), Some(store_id)) = (
        settings.openai_api_key.as_deref(),
        settings.openai_vector_store_id.as_deref(),
    ) else {
        return Err(DocsError::LibraryNotConfigured);
    };

    let transport = |source| DocsError::BackendTransport {
        backend: BACKEND,
        source,
    };
    let url = format!(
        "{}/vector_stores/{store_id}/search",
        settings.openai_base_url.trim_end_matches('/')
    );

    debug!(query = %query.query, max = query.max_num_results, "querying {}", BACKEND);
    let resp = client
        .http
        .post(&url)
        .bearer_auth(api_key)
        .json(query)
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
    resp.json().await.map_err(transport)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn configured(base: &str) -> Settings {
        let mut settings = Settings::for_base_url(base);
        settings.openai_api_key = Some("sk-test".into());
        settings.openai_vector_store_id = Some("vs_123".into());
        settings
    }

    #[test]
    fn validates_ranges() {
        assert!(LibraryQuery::new("walls", 10, None, true).is_ok());
        assert!(LibraryQuery::new("walls", 50, Some(1.0), true).is_ok());
        assert!(matches!(
            LibraryQuery::new("walls", 0, None, true),
            Err(DocsError::MaxResultsOutOfRange(0))
        ));
        assert!(matches!(
            LibraryQuery::new("walls", 10, Some(1.5), true),
            Err(DocsError::ThresholdOutOfRange(_))
        ));
    }

    #[test]
    fn omits_missing_threshold() {
        let q = LibraryQuery::new("walls", 5, None, false).unwrap();
        assert_eq!(
            serde_json::to_value(&q).unwrap(),
            json!({
                "query": "walls",
                "max_num_results": 5,
                "ranking_options": {"ranker": "auto"},
                "rewrite_query": false
            })
        );
    }

    #[tokio::test]
    async fn requires_credentials() {
        let client = DocsClient::new(Settings::for_base_url("http://127.0.0.1:9")).unwrap();
        let q = LibraryQuery::new("walls", 5, None, true).unwrap();
        let err = search(&client, &q).await.unwrap_err();
        assert!(matches!(err, DocsError::LibraryNotConfigured));
    }

    #[tokio::test]
    async fn passes_response_through() {
        let server = MockServer::start().await;
        let body = json!({"object": "vector_store.search_results.page", "data": [
            {"file_id": "file-1", "filename": "walls.md", "score": 0.82,
             "content": [{"type": "text", "text": "Create a wall with Wall.Create"}]}
        ]});
        Mock::given(method("POST"))
            .and(path("/v1/vector_stores/vs_123/search"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_json(json!({
                "query": "create wall",
                "max_num_results": 3,
                "ranking_options": {"ranker": "auto", "score_threshold": 0.5},
                "rewrite_query": true
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let client = DocsClient::new(configured(&server.uri())).unwrap();
        let q = LibraryQuery::new("create wall", 3, Some(0.5), true).unwrap();
        assert_eq!(search(&client, &q).await.unwrap(), body);
    }
}
