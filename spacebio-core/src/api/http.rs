//! reqwest-backed implementation of [`PaperApi`].

use super::{PaperApi, endpoints};
use crate::config::ApiConfig;
use crate::error::{ApiError, ConfigError, SpaceBioError};
use crate::types::{
    ConsensusRequest, ConsensusResponse, DatabaseStats, FilterOptions, GapAnalysis, GapsRequest,
    Persona, SearchRequest, SearchResponse, SearchResult, SummaryRequest, SummaryResponse,
    TrendsData,
};
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error};

/// Longest response body excerpt kept in a [`ApiError::Status`].
const MAX_ERROR_BODY_CHARS: usize = 300;

/// HTTP client for the research backend.
#[derive(Debug, Clone)]
pub struct HttpPaperApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPaperApi {
    /// Build a client from the `[api]` configuration section.
    pub fn new(config: &ApiConfig) -> crate::error::Result<Self> {
        let problems = config.validate();
        if !problems.is_empty() {
            return Err(SpaceBioError::Config(ConfigError::Invalid {
                message: problems.join("; "),
            }));
        }

        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            SpaceBioError::Config(ConfigError::Invalid {
                message: format!("Failed to create HTTP client: {}", e),
            })
        })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let url = self.url(endpoint);
        debug!(url = %url, "GET");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| request_error(endpoint, e))?;
        decode(endpoint, response).await
    }

    async fn post<B, T>(&self, endpoint: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.url(endpoint);
        debug!(url = %url, "POST");
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| request_error(endpoint, e))?;
        decode(endpoint, response).await
    }
}

fn request_error(endpoint: &str, e: reqwest::Error) -> ApiError {
    error!(endpoint, error = %e, "Backend request failed");
    ApiError::Request {
        endpoint: endpoint.to_string(),
        message: e.to_string(),
    }
}

async fn decode<T: DeserializeOwned>(
    endpoint: &str,
    response: reqwest::Response,
) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.text().await.map_err(|e| ApiError::Request {
        endpoint: endpoint.to_string(),
        message: format!("Failed to read response body: {}", e),
    })?;

    if !status.is_success() {
        error!(endpoint, status = status.as_u16(), "Backend returned an error status");
        return Err(ApiError::Status {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
        });
    }

    serde_json::from_str(&body).map_err(|e| {
        error!(endpoint, error = %e, "Backend response did not match the expected shape");
        ApiError::ResponseParse {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        }
    })
}

#[async_trait]
impl PaperApi for HttpPaperApi {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, ApiError> {
        let mut response: SearchResponse = self.post(endpoints::SEARCH, request).await?;
        if response.total_results == 0 {
            response.total_results = response.results.len();
        }
        debug!(
            query = %request.query,
            filters = %request.filters.describe(),
            results = response.results.len(),
            "Search completed"
        );
        Ok(response)
    }

    async fn summarize(
        &self,
        query: &str,
        results: &[SearchResult],
        persona: Persona,
    ) -> Result<SummaryResponse, ApiError> {
        let body = SummaryRequest {
            query,
            results,
            persona,
        };
        self.post(endpoints::SUMMARIZE, &body).await
    }

    async fn consensus(
        &self,
        topic: &str,
        results: &[SearchResult],
    ) -> Result<ConsensusResponse, ApiError> {
        let body = ConsensusRequest { topic, results };
        self.post(endpoints::CONSENSUS, &body).await
    }

    async fn analyze_gaps(&self, results: &[SearchResult]) -> Result<GapAnalysis, ApiError> {
        self.post(endpoints::GAPS, &GapsRequest { results }).await
    }

    async fn trends(&self) -> Result<TrendsData, ApiError> {
        self.get(endpoints::TRENDS).await
    }

    async fn filter_options(&self) -> Result<FilterOptions, ApiError> {
        self.get(endpoints::FILTERS).await
    }

    async fn stats(&self) -> Result<DatabaseStats, ApiError> {
        self.get(endpoints::STATS).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_trailing_slash() {
        let config = ApiConfig {
            base_url: "http://localhost:8000/api/".into(),
            ..Default::default()
        };
        let api = HttpPaperApi::new(&config).unwrap();
        assert_eq!(api.url(endpoints::SEARCH), "http://localhost:8000/api/search");
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = ApiConfig {
            base_url: "ftp://example.org".into(),
            ..Default::default()
        };
        let err = HttpPaperApi::new(&config).unwrap_err();
        assert!(matches!(err, SpaceBioError::Config(_)));
    }
}
