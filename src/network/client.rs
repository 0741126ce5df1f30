//! HTTP client for the SearXNG search endpoint

use crate::config::BackendSettings;
use crate::error::SearchError;
use crate::results::{Category, SearchResult};
use crate::search::SubQuery;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Executes one sub-query against a search backend.
///
/// The aggregator depends on this trait rather than on the HTTP client so
/// plans can be exercised against fake backends in tests.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn execute(&self, sub_query: &SubQuery) -> Result<Vec<SearchResult>, SearchError>;
}

/// Client for a single SearXNG instance.
///
/// Issues one GET per sub-query and normalizes the heterogeneous JSON
/// response into canonical records. No retries: the aggregator decides
/// whether a failed sub-query matters.
pub struct SearchClient {
    client: Client,
    base_url: String,
    timeout: Duration,
    language: String,
}

impl SearchClient {
    pub fn new(settings: &BackendSettings) -> Result<Self> {
        let timeout = Duration::from_secs(settings.timeout);
        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self {
            client,
            base_url: settings.url.trim_end_matches('/').to_string(),
            timeout,
            language: settings.language.clone(),
        })
    }

    fn query_params(&self, sub_query: &SubQuery) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("q", sub_query.query_text.clone()),
            ("format", "json".to_string()),
            ("language", self.language.clone()),
            ("pageno", "1".to_string()),
            ("categories", sub_query.category.as_str().to_string()),
        ];
        if let Some(ref engines) = sub_query.engines {
            params.push(("engines", engines.join(",")));
        }
        params
    }
}

#[async_trait]
impl SearchBackend for SearchClient {
    async fn execute(&self, sub_query: &SubQuery) -> Result<Vec<SearchResult>, SearchError> {
        let url = format!("{}/search", self.base_url);
        debug!(
            "Searching '{}' (category: {}, timeout: {:?})",
            sub_query.query_text, sub_query.category, self.timeout
        );

        let response = self
            .client
            .get(&url)
            .query(&self.query_params(sub_query))
            .send()
            .await
            .map_err(|e| {
                let message = if e.is_timeout() {
                    "request timed out".to_string()
                } else if e.is_connect() {
                    "connection failed".to_string()
                } else {
                    e.to_string()
                };
                SearchError::backend_unavailable(&sub_query.query_text, message)
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Backend returned HTTP {} for '{}'", status, sub_query.query_text);
            return Err(SearchError::backend_unavailable(
                &sub_query.query_text,
                format!("HTTP {}", status),
            ));
        }

        let raw: RawResponse = response.json().await.map_err(|e| {
            SearchError::backend_unavailable(
                &sub_query.query_text,
                format!("unexpected response payload: {}", e),
            )
        })?;

        Ok(normalize(raw, sub_query))
    }
}

/// Tolerant shape for the backend's JSON response.
///
/// Field names vary across the backend's engines; everything beyond the URL
/// is optional and anything unrecognized is ignored.
#[derive(Debug, Deserialize)]
struct RawResponse {
    #[serde(default)]
    results: Vec<RawResult>,
}

#[derive(Debug, Deserialize)]
struct RawResult {
    url: Option<String>,
    title: Option<String>,
    content: Option<String>,
    engine: Option<String>,
    #[serde(rename = "publishedDate")]
    published_date: Option<String>,
    img_src: Option<String>,
    #[serde(alias = "thumbnail")]
    thumbnail_src: Option<String>,
}

/// Normalize raw records into canonical results.
///
/// Records without a URL are dropped: they cannot be deduplicated or
/// usefully returned. The sub-query's result-count hint is applied here in
/// case the backend ignores it.
fn normalize(raw: RawResponse, sub_query: &SubQuery) -> Vec<SearchResult> {
    raw.results
        .into_iter()
        .filter_map(|r| to_result(r, sub_query.category))
        .take(sub_query.max_results)
        .collect()
}

fn to_result(raw: RawResult, category: Category) -> Option<SearchResult> {
    let url = raw.url.filter(|u| !u.trim().is_empty())?;
    let title = match raw.title {
        Some(t) if !t.trim().is_empty() => t,
        _ => url.clone(),
    };

    Some(SearchResult {
        title,
        url,
        snippet: raw.content.filter(|c| !c.is_empty()),
        source_engine: raw.engine,
        category,
        published_date: raw.published_date,
        media_src: raw.img_src,
        thumbnail: raw.thumbnail_src,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> SearchClient {
        SearchClient::new(&BackendSettings {
            url: server.uri(),
            timeout: 2,
            language: "en".to_string(),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_execute_builds_expected_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "rust async"))
            .and(query_param("format", "json"))
            .and(query_param("categories", "news"))
            .and(query_param("engines", "google,bing"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [
                    {"url": "https://example.com/a", "title": "A", "content": "snippet"}
                ]
            })))
            .mount(&server)
            .await;

        let sub = SubQuery::new("rust async", Category::News, 10)
            .with_engines(vec!["google".to_string(), "bing".to_string()]);
        let results = client_for(&server).execute(&sub).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "A");
        assert_eq!(results[0].category, Category::News);
    }

    #[tokio::test]
    async fn test_records_without_url_are_dropped() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [
                    {"title": "no url"},
                    {"url": "", "title": "empty url"},
                    {"url": "https://example.com/kept"}
                ]
            })))
            .mount(&server)
            .await;

        let sub = SubQuery::new("q", Category::General, 10);
        let results = client_for(&server).execute(&sub).await.unwrap();
        assert_eq!(results.len(), 1);
        // Missing title falls back to the URL.
        assert_eq!(results[0].title, "https://example.com/kept");
    }

    #[tokio::test]
    async fn test_media_fields_survive_normalization() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{
                    "url": "https://example.com/photo",
                    "title": "Photo",
                    "img_src": "https://img.example.com/full.jpg",
                    "thumbnail_src": "https://img.example.com/thumb.jpg"
                }]
            })))
            .mount(&server)
            .await;

        let sub = SubQuery::new("q", Category::Images, 10);
        let results = client_for(&server).execute(&sub).await.unwrap();
        assert_eq!(
            results[0].media_src.as_deref(),
            Some("https://img.example.com/full.jpg")
        );
        assert_eq!(
            results[0].thumbnail.as_deref(),
            Some("https://img.example.com/thumb.jpg")
        );
    }

    #[tokio::test]
    async fn test_result_count_hint_applied() {
        let server = MockServer::start().await;
        let results: Vec<_> = (0..8)
            .map(|i| json!({"url": format!("https://example.com/{}", i), "title": "t"}))
            .collect();
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": results })))
            .mount(&server)
            .await;

        let sub = SubQuery::new("q", Category::General, 3);
        let out = client_for(&server).execute(&sub).await.unwrap();
        assert_eq!(out.len(), 3);
    }

    #[tokio::test]
    async fn test_server_error_is_backend_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let sub = SubQuery::new("q", Category::General, 10);
        let err = client_for(&server).execute(&sub).await.unwrap_err();
        assert_eq!(err.kind(), "backend_unavailable");
        assert!(err.to_string().contains("502"));
    }

    #[tokio::test]
    async fn test_slow_response_is_backend_unavailable() {
        let server = MockServer::start().await;
        // Responds well past the client's 2 second timeout.
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(Duration::from_secs(3))
                    .set_body_json(json!({"results": []})),
            )
            .mount(&server)
            .await;

        let sub = SubQuery::new("q", Category::General, 10);
        let err = client_for(&server).execute(&sub).await.unwrap_err();
        assert_eq!(err.kind(), "backend_unavailable");
        assert!(err.to_string().contains("request timed out"));
    }

    #[tokio::test]
    async fn test_connection_refused_is_backend_unavailable() {
        // Unroutable port; nothing is listening.
        let client = SearchClient::new(&BackendSettings {
            url: "http://127.0.0.1:1".to_string(),
            timeout: 2,
            language: "en".to_string(),
        })
        .unwrap();

        let sub = SubQuery::new("q", Category::General, 10);
        let err = client.execute(&sub).await.unwrap_err();
        assert_eq!(err.kind(), "backend_unavailable");
    }
}
