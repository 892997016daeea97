//! # Sound Service
//!
//! The exported façade: music playback on a long-lived singleton controller,
//! fire-and-forget sound effects tracked in a registry, bulk-stop, and the
//! engine's global volume controls.
//!
//! ## Construction
//!
//! ```rust,no_run
//! use core_sound::{SoundConfig, SoundService};
//! use std::sync::Arc;
//! # use engine_traits::{AudioEngine, HostBridge, HostEnvironment};
//!
//! # fn setup(engine: Arc<dyn AudioEngine>, env: Arc<dyn HostEnvironment>, bridge: Arc<dyn HostBridge>) {
//! let sound = SoundService::builder(engine, env)
//!     .with_bridge(bridge)
//!     .with_config(SoundConfig::default())
//!     .build();
//! # }
//! ```
//!
//! The host's frame driver must call [`SoundService::tick`] once per frame;
//! progress and start-failure callbacks fire from inside `tick`.

use crate::config::SoundConfig;
use crate::controller::{ChannelController, ControllerContext};
use crate::registry::ChannelRegistry;
use crate::scheduler::PollScheduler;
use engine_traits::{AudioEngine, Clock, HostBridge, HostEnvironment, SystemClock};
use std::sync::Arc;
use tracing::debug;

/// Top-level sound subsystem handle.
pub struct SoundService {
    ctx: Arc<ControllerContext>,
    registry: ChannelRegistry,
    music: ChannelController,
}

impl SoundService {
    /// Create a service with the default clock and configuration and no
    /// host bridge.
    pub fn new(engine: Arc<dyn AudioEngine>, env: Arc<dyn HostEnvironment>) -> Self {
        Self::builder(engine, env).build()
    }

    /// Start building a service; engine and environment are the only
    /// required collaborators.
    pub fn builder(
        engine: Arc<dyn AudioEngine>,
        env: Arc<dyn HostEnvironment>,
    ) -> SoundServiceBuilder {
        SoundServiceBuilder {
            engine,
            env,
            bridge: None,
            clock: None,
            config: None,
        }
    }

    /// Play `url` on the music singleton, force-stopping whatever track it
    /// was playing. Returns the singleton for event binding.
    pub fn play_music(&self, url: impl Into<String>, loops: u32) -> ChannelController {
        self.music.set_url(url);
        self.music.play(loops);
        self.music.clone()
    }

    /// Play `url` on a fresh sound-effect controller and return it. The
    /// controller is tracked in the registry until it stops.
    pub fn play_sound(&self, url: impl Into<String>, loops: u32) -> ChannelController {
        let controller =
            ChannelController::new(Arc::clone(&self.ctx), false, Some(self.registry.clone()));
        controller.set_url(url);
        controller.play(loops);
        controller
    }

    /// Stop the music singleton.
    pub fn stop_music(&self) {
        self.music.stop();
    }

    /// Stop every registered sound effect.
    pub fn stop_all_sound(&self) {
        self.registry.stop_all();
    }

    /// Stop music, then every sound effect.
    pub fn stop_all(&self) {
        debug!("stopping all audio");
        self.stop_music();
        self.stop_all_sound();
    }

    /// Forward to the engine's global music volume. No range validation;
    /// out-of-range values are the engine's concern.
    pub fn set_music_volume(&self, volume: f32) {
        self.ctx.engine.set_music_volume(volume);
    }

    /// Forward to the engine's global sound-effect volume.
    pub fn set_sound_volume(&self, volume: f32) {
        self.ctx.engine.set_sound_volume(volume);
    }

    /// Frame driver entry point; runs one round of progress polling.
    pub fn tick(&self) {
        self.ctx.scheduler.tick();
    }

    /// Handle to the music singleton without starting playback.
    pub fn music(&self) -> ChannelController {
        self.music.clone()
    }

    /// Number of sound-effect controllers currently tracked.
    pub fn active_sounds(&self) -> usize {
        self.registry.len()
    }
}

/// Builder for [`SoundService`].
pub struct SoundServiceBuilder {
    engine: Arc<dyn AudioEngine>,
    env: Arc<dyn HostEnvironment>,
    bridge: Option<Arc<dyn HostBridge>>,
    clock: Option<Arc<dyn Clock>>,
    config: Option<SoundConfig>,
}

impl SoundServiceBuilder {
    /// Attach the in-app browser bridge used for the audio unlock probe.
    pub fn with_bridge(mut self, bridge: Arc<dyn HostBridge>) -> Self {
        self.bridge = Some(bridge);
        self
    }

    /// Override the time source (tests inject a manual clock here).
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Override the default configuration.
    pub fn with_config(mut self, config: SoundConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn build(self) -> SoundService {
        let ctx = Arc::new(ControllerContext {
            engine: self.engine,
            env: self.env,
            bridge: self.bridge,
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            scheduler: PollScheduler::new(),
            config: self.config.unwrap_or_default(),
        });
        let music = ChannelController::new(Arc::clone(&ctx), true, None);
        SoundService {
            ctx,
            registry: ChannelRegistry::new(),
            music,
        }
    }
}
