//! Paper detail drawer: the open result and its persona-scoped summary.

use crate::api::PaperApi;
use crate::error::ApiError;
use crate::results::display_title;
use crate::types::{Persona, SearchResult, SummaryResponse};
use tracing::{debug, error};

pub const SUMMARY_FAILED_MESSAGE: &str =
    "Unable to generate summary. The summarization service may be unavailable.";
const FALLBACK_SUMMARY_QUERY: &str = "space biology";

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SummaryState {
    #[default]
    Idle,
    Loading,
    Ready {
        summary: String,
        key_points: Vec<String>,
    },
    Failed,
}

/// A summary request for one result, tagged with the drawer generation.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryTicket {
    pub generation: u64,
    pub query: String,
    pub result: SearchResult,
    pub persona: Persona,
}

impl SummaryTicket {
    pub async fn execute(&self, api: &dyn PaperApi) -> Result<SummaryResponse, ApiError> {
        api.summarize(&self.query, std::slice::from_ref(&self.result), self.persona)
            .await
    }
}

#[derive(Debug, Clone, Default)]
pub struct DetailDrawer {
    result: Option<SearchResult>,
    persona: Persona,
    summary: SummaryState,
    generation: u64,
}

impl DetailDrawer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.result.is_some()
    }

    pub fn result(&self) -> Option<&SearchResult> {
        self.result.as_ref()
    }

    pub fn persona(&self) -> Persona {
        self.persona
    }

    pub fn summary(&self) -> &SummaryState {
        &self.summary
    }

    /// Whether the organisms card has anything to show.
    pub fn shows_organisms(&self) -> bool {
        self.result
            .as_ref()
            .is_some_and(|r| !r.metadata.organisms.is_empty())
    }

    /// Open `result` and request its summary right away.
    pub fn open(&mut self, result: SearchResult, persona: Persona) -> SummaryTicket {
        self.result = Some(result);
        self.persona = persona;
        self.request_summary_unchecked()
    }

    /// Follow a persona switch. Re-requests the summary when the drawer is open.
    pub fn set_persona(&mut self, persona: Persona) -> Option<SummaryTicket> {
        if self.persona == persona && self.is_open() {
            return None;
        }
        self.persona = persona;
        self.request_summary()
    }

    /// Re-issue the summary request after a failure.
    pub fn retry(&mut self) -> Option<SummaryTicket> {
        if self.summary != SummaryState::Failed {
            return None;
        }
        self.request_summary()
    }

    /// Close the drawer. Summaries still in flight are discarded on arrival.
    pub fn close(&mut self) {
        self.result = None;
        self.summary = SummaryState::Idle;
        self.generation += 1;
    }

    fn request_summary(&mut self) -> Option<SummaryTicket> {
        self.is_open().then(|| self.request_summary_unchecked())
    }

    fn request_summary_unchecked(&mut self) -> SummaryTicket {
        self.generation += 1;
        self.summary = SummaryState::Loading;
        let result = self.result.clone().unwrap_or_default();
        let query = match result.metadata.file_title() {
            Some(_) => display_title(&result).to_string(),
            None => FALLBACK_SUMMARY_QUERY.to_string(),
        };
        SummaryTicket {
            generation: self.generation,
            query,
            result,
            persona: self.persona,
        }
    }

    /// Apply a summary response. Returns `false` for a stale ticket.
    pub fn apply_summary(
        &mut self,
        ticket: &SummaryTicket,
        outcome: Result<SummaryResponse, ApiError>,
    ) -> bool {
        if ticket.generation != self.generation || !self.is_open() {
            debug!(ticket = ticket.generation, "Dropping stale summary");
            return false;
        }
        self.summary = match outcome {
            Ok(response) => SummaryState::Ready {
                summary: response.summary,
                key_points: response.key_points,
            },
            Err(e) => {
                error!(error = %e, persona = %ticket.persona, "Failed to load summary");
                SummaryState::Failed
            }
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::sample_result;

    fn ok(text: &str) -> Result<SummaryResponse, ApiError> {
        Ok(SummaryResponse {
            summary: text.into(),
            key_points: vec!["k".into()],
            persona: None,
        })
    }

    fn failure() -> Result<SummaryResponse, ApiError> {
        Err(ApiError::Status {
            endpoint: "/summarize".into(),
            status: 500,
            body: String::new(),
        })
    }

    #[test]
    fn test_open_requests_summary_for_single_result() {
        let mut drawer = DetailDrawer::new();
        let r = sample_result("c1", "Rodent-Research", 0.7, None, &["Mouse"], None, "t");
        let ticket = drawer.open(r.clone(), Persona::Investor);
        assert_eq!(ticket.query, "Rodent Research");
        assert_eq!(ticket.result, r);
        assert_eq!(ticket.persona, Persona::Investor);
        assert_eq!(drawer.summary(), &SummaryState::Loading);
        assert!(drawer.shows_organisms());
    }

    #[test]
    fn test_summary_query_fallback() {
        let mut drawer = DetailDrawer::new();
        let mut r = sample_result("c1", "p", 0.7, None, &[], None, "");
        r.metadata.file.clear();
        assert_eq!(drawer.open(r, Persona::Scientist).query, "space biology");
        assert!(!drawer.shows_organisms());
    }

    #[test]
    fn test_persona_switch_reissues_and_drops_old() {
        let mut drawer = DetailDrawer::new();
        let r = sample_result("c1", "p", 0.7, None, &[], None, "t");
        let first = drawer.open(r, Persona::Scientist);
        let second = drawer.set_persona(Persona::Architect).unwrap();
        assert_eq!(second.persona, Persona::Architect);
        assert!(!drawer.apply_summary(&first, ok("old")));
        assert!(drawer.apply_summary(&second, ok("new")));
        assert!(matches!(drawer.summary(), SummaryState::Ready { summary, .. } if summary == "new"));
    }

    #[test]
    fn test_persona_switch_while_closed_only_records() {
        let mut drawer = DetailDrawer::new();
        assert!(drawer.set_persona(Persona::Investor).is_none());
        assert_eq!(drawer.persona(), Persona::Investor);
    }

    #[test]
    fn test_close_invalidates_in_flight() {
        let mut drawer = DetailDrawer::new();
        let r = sample_result("c1", "p", 0.7, None, &[], None, "t");
        let ticket = drawer.open(r, Persona::Scientist);
        drawer.close();
        assert!(!drawer.apply_summary(&ticket, ok("late")));
        assert_eq!(drawer.summary(), &SummaryState::Idle);
        assert!(drawer.result().is_none());
    }

    #[test]
    fn test_retry_only_after_failure() {
        let mut drawer = DetailDrawer::new();
        let r = sample_result("c1", "p", 0.7, None, &[], None, "t");
        let ticket = drawer.open(r, Persona::Scientist);
        assert!(drawer.retry().is_none());
        drawer.apply_summary(&ticket, failure());
        assert_eq!(drawer.summary(), &SummaryState::Failed);
        let again = drawer.retry().unwrap();
        assert!(drawer.apply_summary(&again, ok("fine")));
    }
}
