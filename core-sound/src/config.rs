//! # Sound Configuration
//!
//! Configuration for the playback façade: the start-failure window and the
//! packaged-app container rewrite rules.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Sound façade configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoundConfig {
    /// How long a channel may stay without a known duration after `play()`
    /// before it is treated as failed to start.
    ///
    /// Default: 2 seconds.
    #[serde(default = "default_start_timeout")]
    pub start_timeout: Duration,

    /// Extension substituted for unsupported containers when running inside
    /// the packaged-app host.
    ///
    /// Default: `.ogg`.
    #[serde(default = "default_preferred_extension")]
    pub preferred_extension: String,

    /// Extensions the packaged-app host plays natively; URLs with one of
    /// these are never rewritten.
    ///
    /// Default: `.wav`, `.ogg`.
    #[serde(default = "default_passthrough_extensions")]
    pub passthrough_extensions: Vec<String>,
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self {
            start_timeout: default_start_timeout(),
            preferred_extension: default_preferred_extension(),
            passthrough_extensions: default_passthrough_extensions(),
        }
    }
}

impl SoundConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns a description of the first problem found.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.start_timeout.is_zero() {
            return Err("start_timeout must be greater than zero".to_string());
        }
        if !self.preferred_extension.starts_with('.') {
            return Err(format!(
                "preferred_extension must start with a dot, got {:?}",
                self.preferred_extension
            ));
        }
        if let Some(ext) = self
            .passthrough_extensions
            .iter()
            .find(|ext| !ext.starts_with('.'))
        {
            return Err(format!(
                "passthrough_extensions entries must start with a dot, got {ext:?}"
            ));
        }
        Ok(())
    }
}

fn default_start_timeout() -> Duration {
    Duration::from_secs(2)
}

fn default_preferred_extension() -> String {
    ".ogg".to_string()
}

fn default_passthrough_extensions() -> Vec<String> {
    vec![".wav".to_string(), ".ogg".to_string()]
}
