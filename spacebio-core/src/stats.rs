//! Short-lived cache for the database stats shown in the header.
//!
//! One [`StatsCache`] is created per application and shared by reference.
//! Fetches are serialized behind an async mutex, so concurrent callers on
//! an expired cache share a single request.

use crate::api::PaperApi;
use crate::config::DEFAULT_STATS_TTL_SECS;
use crate::types::DatabaseStats;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, error};

#[derive(Debug, Clone, Copy)]
struct CachedStats {
    stats: DatabaseStats,
    fetched_at: Instant,
}

#[derive(Debug)]
pub struct StatsCache {
    ttl: Duration,
    entry: Mutex<Option<CachedStats>>,
}

impl Default for StatsCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_STATS_TTL_SECS))
    }
}

impl StatsCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entry: Mutex::new(None),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Cached stats if still fresh, otherwise a new fetch.
    ///
    /// A failed fetch yields zeroed stats and leaves the cache untouched.
    pub async fn get_or_fetch(&self, api: &dyn PaperApi) -> DatabaseStats {
        let mut entry = self.entry.lock().await;
        if let Some(cached) = *entry
            && cached.fetched_at.elapsed() < self.ttl
        {
            debug!("Serving stats from cache");
            return cached.stats;
        }
        match api.stats().await {
            Ok(stats) => {
                *entry = Some(CachedStats {
                    stats,
                    fetched_at: Instant::now(),
                });
                stats
            }
            Err(e) => {
                error!(error = %e, "Failed to fetch database stats");
                DatabaseStats::zeroed()
            }
        }
    }

    /// Fresh cached stats without fetching. `None` while a fetch holds the lock.
    pub fn peek(&self) -> Option<DatabaseStats> {
        let entry = self.entry.try_lock().ok()?;
        (*entry)
            .filter(|cached| cached.fetched_at.elapsed() < self.ttl)
            .map(|cached| cached.stats)
    }
}
