//! Search orchestrator: owns the query, the filters and the current result list.
//!
//! Every outgoing request is described by a [`SearchTicket`] carrying the
//! generation it was issued under. Only a response whose ticket matches the
//! latest generation is applied, so the last *issued* search always wins
//! regardless of the order responses arrive in.

use crate::api::PaperApi;
use crate::config::DEFAULT_TOP_K;
use crate::error::ApiError;
use crate::types::{SearchFilters, SearchRequest, SearchResponse, SearchResult};
use tracing::{debug, error};

pub const SEARCH_FAILED_MESSAGE: &str = "Failed to search. Please check your backend connection.";
pub const FILTERS_FAILED_MESSAGE: &str = "Failed to apply filters.";

/// What caused a search to be issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    /// A query typed or picked by the user.
    Submit,
    /// A filter change re-running the active query.
    Filters,
}

/// A search request tagged with the generation it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchTicket {
    pub generation: u64,
    pub kind: SearchKind,
    pub request: SearchRequest,
}

impl SearchTicket {
    /// Perform the request. Applying the outcome is left to the orchestrator.
    pub async fn execute(&self, api: &dyn PaperApi) -> Result<SearchResponse, ApiError> {
        api.search(&self.request).await
    }
}

#[derive(Debug, Clone)]
pub struct SearchOrchestrator {
    query: String,
    filters: SearchFilters,
    results: Vec<SearchResult>,
    loading: bool,
    error: Option<String>,
    has_searched: bool,
    generation: u64,
    top_k: usize,
}

impl Default for SearchOrchestrator {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_K)
    }
}

impl SearchOrchestrator {
    pub fn new(top_k: usize) -> Self {
        Self {
            query: String::new(),
            filters: SearchFilters::default(),
            results: Vec::new(),
            loading: false,
            error: None,
            has_searched: false,
            generation: 0,
            top_k: top_k.max(1),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn filters(&self) -> &SearchFilters {
        &self.filters
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn has_searched(&self) -> bool {
        self.has_searched
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn issue(&mut self, kind: SearchKind) -> SearchTicket {
        self.generation += 1;
        self.loading = true;
        SearchTicket {
            generation: self.generation,
            kind,
            request: SearchRequest::new(self.query.clone(), self.top_k, &self.filters),
        }
    }

    /// Start a new search for `text` with the current filters.
    ///
    /// Blank input is ignored and returns `None`.
    pub fn submit_query(&mut self, text: &str) -> Option<SearchTicket> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.query = text.to_string();
        self.error = None;
        self.has_searched = true;
        Some(self.issue(SearchKind::Submit))
    }

    /// Replace the filter set. Re-runs the active query, if any.
    pub fn update_filters(&mut self, filters: SearchFilters) -> Option<SearchTicket> {
        self.filters = filters.normalized();
        if self.query.is_empty() {
            return None;
        }
        Some(self.issue(SearchKind::Filters))
    }

    /// Apply the outcome of `ticket`. Returns `false` when the ticket is stale.
    pub fn apply_search(
        &mut self,
        ticket: &SearchTicket,
        outcome: Result<SearchResponse, ApiError>,
    ) -> bool {
        if ticket.generation != self.generation {
            debug!(
                ticket = ticket.generation,
                current = self.generation,
                "Dropping stale search response"
            );
            return false;
        }
        self.loading = false;
        match outcome {
            Ok(response) => {
                self.results = response.results;
            }
            Err(e) => match ticket.kind {
                SearchKind::Submit => {
                    error!(error = %e, query = %ticket.request.query, "Search failed");
                    self.error = Some(SEARCH_FAILED_MESSAGE.to_string());
                    self.results.clear();
                }
                SearchKind::Filters => {
                    error!(error = %e, filters = %ticket.request.filters.describe(), "Filter search failed");
                    self.error = Some(FILTERS_FAILED_MESSAGE.to_string());
                }
            },
        }
        true
    }

    /// Replace the result list without a network call, e.g. with similar papers.
    ///
    /// Bumps the generation so an in-flight search cannot overwrite the list.
    pub fn apply_similar_results(&mut self, results: Vec<SearchResult>) {
        self.generation += 1;
        self.loading = false;
        self.results = results;
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Submit `text` and apply the response in one step.
    pub async fn run_submit(&mut self, api: &dyn PaperApi, text: &str) -> bool {
        match self.submit_query(text) {
            Some(ticket) => {
                let outcome = ticket.execute(api).await;
                self.apply_search(&ticket, outcome)
            }
            None => false,
        }
    }

    /// Change filters and apply the resulting search, if one was issued.
    pub async fn run_filters(&mut self, api: &dyn PaperApi, filters: SearchFilters) -> bool {
        match self.update_filters(filters) {
            Some(ticket) => {
                let outcome = ticket.execute(api).await;
                self.apply_search(&ticket, outcome)
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::sample_result;

    fn response(ids: &[&str]) -> SearchResponse {
        SearchResponse {
            results: ids
                .iter()
                .map(|id| sample_result(id, id, 0.5, None, &[], None, "t"))
                .collect(),
            query: "q".into(),
            total_results: ids.len(),
        }
    }

    fn failure() -> ApiError {
        ApiError::Request {
            endpoint: "/search".into(),
            message: "connection refused".into(),
        }
    }

    #[test]
    fn test_blank_query_is_ignored() {
        let mut search = SearchOrchestrator::default();
        assert!(search.submit_query("   ").is_none());
        assert!(!search.has_searched());
        assert!(!search.is_loading());
    }

    #[test]
    fn test_submit_sets_loading_and_carries_filters() {
        let mut search = SearchOrchestrator::new(25);
        search.update_filters(SearchFilters {
            year: Some(2019),
            ..Default::default()
        });
        let ticket = search.submit_query(" bone loss ").unwrap();
        assert!(search.is_loading());
        assert!(search.has_searched());
        assert_eq!(ticket.request.query, "bone loss");
        assert_eq!(ticket.request.top_k, 25);
        assert_eq!(ticket.request.filters.year, Some(2019));
    }

    #[test]
    fn test_filters_without_query_do_not_search() {
        let mut search = SearchOrchestrator::default();
        let ticket = search.update_filters(SearchFilters {
            section: Some("results".into()),
            ..Default::default()
        });
        assert!(ticket.is_none());
        assert_eq!(search.filters().section.as_deref(), Some("results"));
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let mut search = SearchOrchestrator::default();
        let first = search.submit_query("first").unwrap();
        let second = search.submit_query("second").unwrap();

        assert!(search.apply_search(&second, Ok(response(&["b"]))));
        assert!(!search.apply_search(&first, Ok(response(&["a"]))));
        assert_eq!(search.results()[0].id, "b");
        assert!(!search.is_loading());
    }

    #[test]
    fn test_submit_failure_clears_results() {
        let mut search = SearchOrchestrator::default();
        let t = search.submit_query("q").unwrap();
        search.apply_search(&t, Ok(response(&["a"])));
        let t = search.submit_query("q2").unwrap();
        search.apply_search(&t, Err(failure()));
        assert_eq!(search.error(), Some(SEARCH_FAILED_MESSAGE));
        assert!(search.results().is_empty());
    }

    #[test]
    fn test_filter_failure_keeps_results() {
        let mut search = SearchOrchestrator::default();
        let t = search.submit_query("q").unwrap();
        search.apply_search(&t, Ok(response(&["a", "b"])));
        let t = search
            .update_filters(SearchFilters {
                year: Some(2020),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(t.kind, SearchKind::Filters);
        search.apply_search(&t, Err(failure()));
        assert_eq!(search.error(), Some(FILTERS_FAILED_MESSAGE));
        assert_eq!(search.results().len(), 2);
        search.dismiss_error();
        assert!(search.error().is_none());
    }

    #[test]
    fn test_similar_results_win_over_in_flight_search() {
        let mut search = SearchOrchestrator::default();
        let pending = search.submit_query("q").unwrap();
        search.apply_similar_results(response(&["s1", "s2"]).results);
        assert!(!search.apply_search(&pending, Ok(response(&["late"]))));
        let ids: Vec<_> = search.results().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["s1", "s2"]);
    }
}
