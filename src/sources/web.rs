//! Open-web search via a SerpApi-compatible endpoint

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use crate::config::AppConfig;
use crate::errors::HybragError;
use crate::errors::Result;

use super::WebSource;

/// One organic search result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganicResult {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(default)]
    pub link: String,
}

/// Web search response, reduced to the fields the cascade reads.
///
/// `organic_results` keeps the provider's ranking order; the orchestrator
/// only ever reads the first element, after checking non-emptiness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSearchResponse {
    #[serde(default)]
    pub organic_results: Vec<OrganicResult>,
}

/// Web source backed by a SerpApi-compatible search endpoint.
pub struct SerpWebSource {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl SerpWebSource {
    /// Create a new web source
    pub fn new(endpoint: String, api_key: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| HybragError::Http(e.to_string()))?;

        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }

    /// Create a web source from configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(
            config.web_search.endpoint.clone(),
            config.web_search.api_key.clone(),
        )
    }
}

#[async_trait]
impl WebSource for SerpWebSource {
    async fn search(&self, question: &str) -> Result<WebSearchResponse> {
        debug!("Performing web search: {}", question);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", question), ("api_key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| HybragError::Http(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(HybragError::WebSearch(format!(
                "Search API error ({status}): {error_text}"
            )));
        }

        let result: WebSearchResponse = response
            .json()
            .await
            .map_err(|e| HybragError::WebSearch(format!("Failed to parse response: {e}")))?;

        debug!("Web search returned {} organic results", result.organic_results.len());

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_tolerates_extra_fields() {
        let body = r#"{
            "search_metadata": {"status": "Success"},
            "organic_results": [
                {"position": 1, "title": "First", "snippet": "first snippet", "link": "https://a.example"},
                {"position": 2, "title": "Second", "snippet": "second snippet", "link": "https://b.example"}
            ]
        }"#;

        let parsed: WebSearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.organic_results.len(), 2);
        assert_eq!(parsed.organic_results[0].snippet, "first snippet");
        assert_eq!(parsed.organic_results[0].link, "https://a.example");
    }

    #[test]
    fn test_missing_organic_results_defaults_empty() {
        let parsed: WebSearchResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.organic_results.is_empty());
    }
}
