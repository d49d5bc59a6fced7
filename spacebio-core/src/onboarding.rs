//! Persisted "quick start already seen" flag.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const STATE_FILE: &str = "state.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OnboardingState {
    #[serde(default)]
    has_seen_quick_start: bool,
}

/// Reads and writes `state.json` in the application data directory.
#[derive(Debug, Clone)]
pub struct OnboardingStore {
    path: PathBuf,
}

impl OnboardingStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(STATE_FILE),
        }
    }

    /// Store under the platform data directory, if one can be determined.
    pub fn from_project_dirs() -> Option<Self> {
        crate::config::project_dirs().map(|dirs| Self::new(dirs.data_dir()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the quick start dialog should be shown. Unreadable state counts as unseen.
    pub fn should_show(&self) -> bool {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "No onboarding state");
                return true;
            }
        };
        match serde_json::from_str::<OnboardingState>(&raw) {
            Ok(state) => !state.has_seen_quick_start,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Ignoring malformed onboarding state");
                true
            }
        }
    }

    /// Record that the dialog was dismissed. Write failures are logged only.
    pub fn mark_seen(&self) {
        if let Err(e) = self.write(&OnboardingState {
            has_seen_quick_start: true,
        }) {
            warn!(path = %self.path.display(), error = %e, "Failed to save onboarding state");
        }
    }

    fn write(&self, state: &OnboardingState) -> crate::error::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string(state)?)?;
        Ok(())
    }
}
