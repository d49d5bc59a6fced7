//! Fetch-once lifecycle for views that load their data on first show.

use crate::api::PaperApi;
use crate::gaps::{GAPS_FAILED_MESSAGE, GapsReport};
use crate::trends::{TRENDS_FAILED_MESSAGE, TrendsReport};
use tracing::error;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Loadable<T> {
    /// Not requested yet.
    #[default]
    NotStarted,
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> Loadable<T> {
    /// Move to `Loading` if nothing was requested yet. Returns whether a fetch should start.
    pub fn begin(&mut self) -> bool {
        if matches!(self, Loadable::NotStarted) {
            *self = Loadable::Loading;
            true
        } else {
            false
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Loadable::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Loadable::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Loadable::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Fetch and reshape the trends view data.
pub async fn load_trends(api: &dyn PaperApi) -> Loadable<TrendsReport> {
    match api.trends().await {
        Ok(data) => Loadable::Ready(TrendsReport::from_data(&data)),
        Err(e) => {
            error!(error = %e, "Failed to load trends");
            Loadable::Failed(TRENDS_FAILED_MESSAGE.to_string())
        }
    }
}

/// Fetch and reshape a corpus-wide gap analysis.
pub async fn load_gaps(api: &dyn PaperApi) -> Loadable<GapsReport> {
    match api.analyze_gaps(&[]).await {
        Ok(analysis) => Loadable::Ready(GapsReport::from_analysis(&analysis)),
        Err(e) => {
            error!(error = %e, "Failed to load gap analysis");
            Loadable::Failed(GAPS_FAILED_MESSAGE.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{MockPaperApi, endpoints};

    #[test]
    fn test_begin_only_once() {
        let mut state: Loadable<u8> = Loadable::default();
        assert!(state.begin());
        assert!(state.is_loading());
        assert!(!state.begin());
        state = Loadable::Failed("x".into());
        assert!(!state.begin());
        assert_eq!(state.error(), Some("x"));
    }

    #[tokio::test]
    async fn test_load_trends_and_failure_message() {
        let api = MockPaperApi::demo();
        let state = load_trends(&api).await;
        assert!(state.ready().is_some_and(|r| !r.by_year.is_empty()));

        api.set_failing(endpoints::TRENDS, true);
        let state = load_trends(&api).await;
        assert_eq!(state.error(), Some("Failed to load trends data."));
    }

    #[tokio::test]
    async fn test_load_gaps_failure_message() {
        let api = MockPaperApi::demo();
        api.set_failing(endpoints::GAPS, true);
        let state = load_gaps(&api).await;
        assert_eq!(
            state.error(),
            Some("Failed to load gap analysis. Please check your backend connection.")
        );
    }
}
