//! # Sound Error Types
//!
//! Failures surfaced through the `on_error` callback. Controller operations
//! themselves never return errors; everything here is reported, logged, and
//! swallowed.

use engine_traits::EngineError;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while orchestrating playback.
#[derive(Error, Debug)]
pub enum SoundError {
    /// The engine produced neither a position nor a duration within the
    /// configured window after `play()`. Treated as "the channel failed to
    /// start" (asset missing, corrupt, or undecodable), since the engine
    /// offers no explicit load-failure callback.
    #[error("Channel failed to start within {waited:?}")]
    StartTimeout {
        /// How long the controller waited before giving up.
        waited: Duration,
    },

    /// The host engine reported a failure.
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),
}

impl SoundError {
    /// Returns `true` if this is the start-failure heuristic firing.
    pub fn is_start_timeout(&self) -> bool {
        matches!(self, SoundError::StartTimeout { .. })
    }
}

/// Result type for sound operations.
pub type Result<T> = std::result::Result<T, SoundError>;
