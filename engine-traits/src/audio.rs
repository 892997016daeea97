//! Audio engine traits and supporting types.
//!
//! These abstractions let the core sound module drive the host engine's
//! audio manager without knowing anything about decoding, mixing, or the
//! platform audio device. Host applications provide concrete
//! implementations that satisfy their engine's constraints.

use crate::error::Result;
use std::time::Duration;

/// Callback invoked by the engine exactly once when a channel finishes
/// playing naturally (all requested loops completed).
pub type CompletionHandler = Box<dyn FnOnce() + Send>;

/// One active playback instance managed by the host engine.
///
/// A handle is owned by exactly one controller while it is live, and is
/// returned to the engine's pool via [`AudioEngine::remove_channel`] when
/// playback ends.
pub trait SoundChannel: Send {
    /// Current playback position. `None` until the engine has produced the
    /// first audible frame.
    fn position(&self) -> Option<Duration>;

    /// Total duration of the loaded asset. `None` while the engine is still
    /// loading or probing the asset.
    fn duration(&self) -> Option<Duration>;

    /// Pause playback, keeping the channel and its position alive.
    fn pause(&self) -> Result<()>;

    /// Resume playback from the paused position.
    fn resume(&self) -> Result<()>;

    /// Stop playback. The handle stays valid until it is returned to the
    /// engine pool.
    fn stop(&self) -> Result<()>;
}

/// The host engine's audio manager.
///
/// The engine owns channel creation, decoding, mixing, and the global
/// music/sound volume split; the core only orchestrates calls into it.
pub trait AudioEngine: Send + Sync {
    /// Start the singleton music channel for `url`.
    ///
    /// `loops` counts full plays of the asset; `0` loops forever.
    /// `on_complete` fires once when the final loop ends (never on an
    /// explicit stop).
    fn play_music(
        &self,
        url: &str,
        loops: u32,
        on_complete: CompletionHandler,
        start_offset: Duration,
    ) -> Result<Box<dyn SoundChannel>>;

    /// Start a transient sound-effect channel for `url`.
    ///
    /// Same contract as [`AudioEngine::play_music`], but the engine may mix
    /// any number of these concurrently.
    fn play_sound(
        &self,
        url: &str,
        loops: u32,
        on_complete: CompletionHandler,
        start_offset: Duration,
    ) -> Result<Box<dyn SoundChannel>>;

    /// Return a finished channel to the engine's pool.
    fn remove_channel(&self, channel: Box<dyn SoundChannel>);

    /// Set the global music volume. Range handling is the engine's
    /// responsibility; out-of-range values are passed through unchanged.
    fn set_music_volume(&self, volume: f32);

    /// Set the global sound-effect volume.
    fn set_sound_volume(&self, volume: f32);
}
