//! Shared services handed to the dashboard and the subcommands.

use spacebio_core::{ClientConfig, HttpPaperApi, MockPaperApi, PaperApi, Persona, StatsCache};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct AppContext {
    pub config: ClientConfig,
    pub api: Arc<dyn PaperApi>,
    pub stats: Arc<StatsCache>,
}

impl AppContext {
    pub fn new(config: ClientConfig, offline: bool) -> anyhow::Result<Self> {
        let api: Arc<dyn PaperApi> = if offline {
            info!("Using the built-in demo backend");
            Arc::new(MockPaperApi::demo())
        } else {
            info!(base_url = %config.api.base_url, "Using research backend");
            Arc::new(HttpPaperApi::new(&config.api)?)
        };
        Ok(Self::with_api(config, api))
    }

    pub fn with_api(config: ClientConfig, api: Arc<dyn PaperApi>) -> Self {
        let stats = Arc::new(StatsCache::new(config.cache.stats_ttl()));
        Self { config, api, stats }
    }

    pub fn persona(&self) -> Persona {
        self.config.ui.default_persona.unwrap_or_default()
    }

    pub fn top_k(&self) -> usize {
        self.config.api.top_k
    }
}
