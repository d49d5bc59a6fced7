//! Client for the research backend's REST surface.
//!
//! [`PaperApi`] is the seam every view and command talks to. The HTTP
//! implementation lives in [`http`]; [`mock`] provides a scripted in-memory
//! backend for tests and offline demos.

pub mod http;
pub mod mock;

pub use http::HttpPaperApi;
pub use mock::MockPaperApi;

use crate::error::ApiError;
use crate::types::{
    ConsensusResponse, DatabaseStats, FilterOptions, GapAnalysis, Persona, SearchRequest,
    SearchResponse, SearchResult, SummaryResponse, TrendsData,
};
use async_trait::async_trait;

/// Endpoint paths, relative to the configured base URL.
pub mod endpoints {
    pub const SEARCH: &str = "/search";
    pub const SUMMARIZE: &str = "/summarize";
    pub const CONSENSUS: &str = "/consensus";
    pub const GAPS: &str = "/gaps";
    pub const TRENDS: &str = "/trends";
    pub const FILTERS: &str = "/filters";
    pub const STATS: &str = "/stats";
}

/// Typed access to the research backend.
///
/// Implementations perform exactly one request per call, with no retries.
#[async_trait]
pub trait PaperApi: Send + Sync {
    /// `POST /search` with the full query and filter set.
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, ApiError>;

    /// `POST /summarize` for the given results in the tone of `persona`.
    async fn summarize(
        &self,
        query: &str,
        results: &[SearchResult],
        persona: Persona,
    ) -> Result<SummaryResponse, ApiError>;

    /// `POST /consensus` over the given results.
    async fn consensus(
        &self,
        topic: &str,
        results: &[SearchResult],
    ) -> Result<ConsensusResponse, ApiError>;

    /// `POST /gaps`. An empty slice asks for a corpus-wide analysis.
    async fn analyze_gaps(&self, results: &[SearchResult]) -> Result<GapAnalysis, ApiError>;

    /// `GET /trends`.
    async fn trends(&self) -> Result<TrendsData, ApiError>;

    /// `GET /filters`.
    async fn filter_options(&self) -> Result<FilterOptions, ApiError>;

    /// `GET /stats`.
    async fn stats(&self) -> Result<DatabaseStats, ApiError>;
}
