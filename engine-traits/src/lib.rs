//! # Host Engine Traits
//!
//! Abstraction traits that the embedding game engine must implement.
//!
//! ## Overview
//!
//! This crate defines the contract between the core sound module and the
//! host engine's built-in audio manager. The core never talks to an audio
//! device, a decoder, or a mixer directly; every capability it needs is
//! expressed as a trait here and provided by the host at construction time.
//!
//! ## Traits
//!
//! ### Audio
//! - [`AudioEngine`](audio::AudioEngine) - Channel creation, pooling, and global volume
//! - [`SoundChannel`](audio::SoundChannel) - One active playback instance
//!
//! ### Platform Integration
//! - [`HostBridge`](bridge::HostBridge) - In-app browser bridge used for the audio unlock probe
//! - [`HostEnvironment`](bridge::HostEnvironment) - Packaged-app host detection
//!
//! ### Utilities
//! - [`Clock`](time::Clock) - Time source for deterministic testing
//!
//! ## Error Handling
//!
//! All fallible bridge calls use the [`EngineError`](error::EngineError) type.
//! Host implementations should convert engine-specific errors to
//! `EngineError` and provide actionable messages.
//!
//! ## Thread Safety
//!
//! Engine and bridge traits require `Send + Sync` so a multi-threaded host
//! can share them freely; channel handles only require `Send` because each
//! one is owned by exactly one controller at a time.

pub mod audio;
pub mod bridge;
pub mod error;
pub mod time;

pub use error::{EngineError, Result};

// Re-export commonly used types
pub use audio::{AudioEngine, CompletionHandler, SoundChannel};
pub use bridge::{BridgeCallback, HostBridge, HostEnvironment};
pub use time::{Clock, SystemClock};
