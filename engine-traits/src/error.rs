//! # Engine Error Types
//!
//! Error types for calls that cross the host engine seam.

use thiserror::Error;

/// Errors reported by host engine and bridge implementations.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The engine could not allocate or open a playback channel.
    #[error("Channel unavailable: {0}")]
    ChannelUnavailable(String),

    /// An operation on an existing channel failed.
    #[error("Channel operation failed: {0}")]
    ChannelOperationFailed(String),

    /// The platform audio device is missing or unusable.
    #[error("Audio device unavailable: {0}")]
    AudioDeviceUnavailable(String),

    /// A host bridge call could not be issued or completed.
    #[error("Host bridge call failed: {0}")]
    BridgeFailed(String),

    /// Internal engine error (should not occur in normal operation).
    #[error("Internal engine error: {0}")]
    Internal(String),
}

impl EngineError {
    /// Returns `true` if this error came from the host bridge rather than
    /// the audio engine itself.
    pub fn is_bridge_error(&self) -> bool {
        matches!(self, EngineError::BridgeFailed(_))
    }

    /// Returns `true` if this error is transient and the operation can be retried.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            EngineError::ChannelUnavailable(_) | EngineError::AudioDeviceUnavailable(_)
        )
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
