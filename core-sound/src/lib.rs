//! # Sound Playback Façade
//!
//! Orchestrates music and sound-effect playback on top of a host engine's
//! audio manager.
//!
//! ## Overview
//!
//! This module handles:
//! - Start/stop/pause/resume of the music channel and transient sound effects
//! - A registry of active sound effects for bulk-stop
//! - A per-frame poll scheduler emulating progress and start-failure events
//! - Platform quirks: the in-app browser audio unlock probe and packaged-app
//!   container rewriting
//!
//! The host engine (channel creation, decoding, mixing, volume) lives behind
//! the `engine-traits` seam; nothing in this crate touches an audio device.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core_sound::SoundService;
//! use std::sync::Arc;
//! # use engine_traits::{AudioEngine, HostEnvironment};
//!
//! fn game_setup(engine: Arc<dyn AudioEngine>, env: Arc<dyn HostEnvironment>) {
//!     let sound = SoundService::new(engine, env);
//!
//!     let music = sound.play_music("bgm/title.mp3", 0);
//!     music.on_complete(|| println!("title theme finished"));
//!
//!     sound.play_sound("sfx/click.mp3", 1);
//!
//!     // Host frame driver, once per frame:
//!     sound.tick();
//! }
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod registry;
pub mod scheduler;
pub mod service;
pub mod unlock;
pub mod url;

pub use config::SoundConfig;
pub use controller::{ChannelController, ChannelId, ProgressUpdate};
pub use error::{Result, SoundError};
pub use registry::ChannelRegistry;
pub use scheduler::{PollOutcome, PollScheduler};
pub use service::{SoundService, SoundServiceBuilder};
pub use unlock::ensure_audio_unlocked;
pub use url::adapt_url;
