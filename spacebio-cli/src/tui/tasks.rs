//! Background backend requests.
//!
//! Each request runs in its own tokio task and reports back through an
//! unbounded mpsc channel, which the TUI main loop polls with
//! `tokio::select!`. Responses carry the ticket they were issued with so
//! the view state can drop stale ones.

use spacebio_core::error::ApiError;
use spacebio_core::loadable::{self, Loadable};
use spacebio_core::similar::{self, SimilarOutcome};
use spacebio_core::{
    DatabaseStats, FilterOptions, GapsReport, PaperApi, SearchResponse, SearchResult,
    SearchTicket, StatsCache, SummaryResponse, SummaryTicket, TrendsReport,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

/// Events sent from background tasks to the TUI event loop.
#[derive(Debug)]
pub enum BackendEvent {
    Search {
        ticket: SearchTicket,
        outcome: Result<SearchResponse, ApiError>,
    },
    Summary {
        ticket: SummaryTicket,
        outcome: Result<SummaryResponse, ApiError>,
    },
    Similar {
        generation: u64,
        outcome: Result<SimilarOutcome, ApiError>,
    },
    FilterOptions(Result<FilterOptions, ApiError>),
    Trends(Loadable<TrendsReport>),
    Gaps(Loadable<GapsReport>),
    Stats(DatabaseStats),
}

/// Spawns backend requests and forwards their results.
#[derive(Clone)]
pub struct Dispatcher {
    api: Arc<dyn PaperApi>,
    stats: Arc<StatsCache>,
    tx: mpsc::UnboundedSender<BackendEvent>,
}

impl Dispatcher {
    pub fn new(
        api: Arc<dyn PaperApi>,
        stats: Arc<StatsCache>,
    ) -> (Self, mpsc::UnboundedReceiver<BackendEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { api, stats, tx }, rx)
    }

    fn spawn<F, Fut>(&self, job: F)
    where
        F: FnOnce(Arc<dyn PaperApi>) -> Fut,
        Fut: std::future::Future<Output = BackendEvent> + Send + 'static,
    {
        let tx = self.tx.clone();
        let fut = job(self.api.clone());
        tokio::spawn(async move {
            let event = fut.await;
            // The receiver is gone only once the UI has exited.
            if tx.send(event).is_err() {
                debug!("Dropping backend event after shutdown");
            }
        });
    }

    pub fn search(&self, ticket: SearchTicket) {
        self.spawn(|api| async move {
            let outcome = ticket.execute(api.as_ref()).await;
            BackendEvent::Search { ticket, outcome }
        });
    }

    pub fn summary(&self, ticket: SummaryTicket) {
        self.spawn(|api| async move {
            let outcome = ticket.execute(api.as_ref()).await;
            BackendEvent::Summary { ticket, outcome }
        });
    }

    pub fn similar(&self, generation: u64, result: SearchResult) {
        self.spawn(move |api| async move {
            let outcome = similar::find_similar(api.as_ref(), &result).await;
            BackendEvent::Similar {
                generation,
                outcome,
            }
        });
    }

    pub fn filter_options(&self) {
        self.spawn(|api| async move { BackendEvent::FilterOptions(api.filter_options().await) });
    }

    pub fn trends(&self) {
        self.spawn(|api| async move { BackendEvent::Trends(loadable::load_trends(api.as_ref()).await) });
    }

    pub fn gaps(&self) {
        self.spawn(|api| async move { BackendEvent::Gaps(loadable::load_gaps(api.as_ref()).await) });
    }

    pub fn stats(&self) {
        let cache = self.stats.clone();
        self.spawn(move |api| async move {
            BackendEvent::Stats(cache.get_or_fetch(api.as_ref()).await)
        });
    }
}
