//! # Spacebio Core
//!
//! Core library for the Space Biology Knowledge Engine client.
//! Provides the research backend API client, the data model, and the
//! view state behind the dashboard: search orchestration, filters, the
//! detail drawer, similar-paper ranking, citations, trends and gap
//! reports, and the stats cache.

pub mod api;
pub mod citation;
pub mod config;
pub mod drawer;
pub mod error;
pub mod filters;
pub mod gaps;
pub mod loadable;
pub mod onboarding;
pub mod personas;
pub mod results;
pub mod search;
mod serde_ext;
pub mod similar;
pub mod stats;
pub mod trends;
pub mod types;

// Re-export commonly used types at the crate root.
pub use api::{HttpPaperApi, MockPaperApi, PaperApi};
pub use citation::{Citation, ClipboardBackend, CopyOutcome, copy_with_fallback};
pub use config::{ClientConfig, load_config};
pub use drawer::{DetailDrawer, SummaryState, SummaryTicket};
pub use error::{ApiError, ClipboardError, ConfigError, Result, SpaceBioError};
pub use filters::{FilterPanel, FilterRow};
pub use gaps::GapsReport;
pub use loadable::Loadable;
pub use onboarding::OnboardingStore;
pub use results::{MatchLabel, ResultsList};
pub use search::{SearchKind, SearchOrchestrator, SearchTicket};
pub use similar::SimilarOutcome;
pub use stats::StatsCache;
pub use trends::TrendsReport;
pub use types::{
    DatabaseStats, FilterOptions, GapAnalysis, Persona, SearchFilters, SearchRequest,
    SearchResponse, SearchResult, SummaryResponse, TrendCount, TrendsData,
};
