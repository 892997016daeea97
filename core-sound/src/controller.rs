//! # Channel Controller
//!
//! Wraps one playback session: either the singleton music channel or one of
//! many transient sound-effect channels. Owns play/pause/resume/stop, the
//! per-frame progress poll, and the single-slot lifecycle callbacks.
//!
//! ## Progress emulation
//!
//! The engine's request-to-play and its first audible frame are not
//! synchronous, so "has actually started" is detected by polling: the first
//! frame whose position is above zero fires `on_play`. A channel whose
//! duration is still unknown past the configured window is treated as failed
//! to start and force-stopped, since the engine has no explicit load-failure
//! callback.
//!
//! ## Callbacks
//!
//! Each event has a single slot; registering a new callback replaces the
//! previous one. Callbacks always run with the controller's lock released,
//! so they may re-enter the controller, the registry, or the façade.

use crate::config::SoundConfig;
use crate::error::SoundError;
use crate::registry::ChannelRegistry;
use crate::scheduler::{PollOutcome, PollScheduler};
use crate::{unlock, url};
use engine_traits::{
    AudioEngine, Clock, CompletionHandler, HostBridge, HostEnvironment, SoundChannel,
};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use uuid::Uuid;

/// Unique identity of a controller, used as the poll-scheduler and registry key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelId(Uuid);

impl ChannelId {
    /// Generate a new identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Borrow the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ChannelId {
    fn default() -> Self {
        Self::new()
    }
}

/// Payload delivered to `on_progress` once per frame while playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressUpdate {
    /// Current playback position.
    pub position: Duration,
    /// Total duration of the asset.
    pub duration: Duration,
}

/// Everything a controller needs from its surrounding sound system.
/// Built once by the service and shared by every controller it creates.
pub(crate) struct ControllerContext {
    pub engine: Arc<dyn AudioEngine>,
    pub env: Arc<dyn HostEnvironment>,
    pub bridge: Option<Arc<dyn HostBridge>>,
    pub clock: Arc<dyn Clock>,
    pub scheduler: PollScheduler,
    pub config: SoundConfig,
}

#[derive(Default)]
struct CallbackSlots {
    on_play: Option<Box<dyn FnMut() + Send>>,
    on_pause: Option<Box<dyn FnMut() + Send>>,
    on_stop: Option<Box<dyn FnMut() + Send>>,
    on_complete: Option<Box<dyn FnMut() + Send>>,
    on_progress: Option<Box<dyn FnMut(ProgressUpdate) + Send>>,
    on_error: Option<Box<dyn FnMut(&SoundError) + Send>>,
}

struct ChannelState {
    url: String,
    channel: Option<Box<dyn SoundChannel>>,
    playing: bool,
    paused: bool,
    position: Option<Duration>,
    duration: Option<Duration>,
    play_started_ms: i64,
    /// Bumped every time a new engine channel is installed. Lets `halt`
    /// detect that an `on_stop` callback restarted playback mid-teardown.
    generation: u64,
    callbacks: CallbackSlots,
}

impl ChannelState {
    fn new() -> Self {
        Self {
            url: String::new(),
            channel: None,
            playing: false,
            paused: false,
            position: None,
            duration: None,
            play_started_ms: 0,
            generation: 0,
            callbacks: CallbackSlots::default(),
        }
    }
}

/// Fire a callback slot with the state lock released.
///
/// The slot is taken for the duration of the call and put back afterwards
/// unless the callback registered a replacement (last writer wins).
macro_rules! emit_event {
    ($shared:expr, $slot:ident $(, $arg:expr)?) => {{
        let taken = $shared.state.lock().callbacks.$slot.take();
        if let Some(mut callback) = taken {
            callback($($arg)?);
            let mut state = $shared.state.lock();
            if state.callbacks.$slot.is_none() {
                state.callbacks.$slot = Some(callback);
            }
        }
    }};
}

struct ControllerShared {
    id: ChannelId,
    music: bool,
    ctx: Arc<ControllerContext>,
    registry: Option<ChannelRegistry>,
    state: Mutex<ChannelState>,
}

/// Cloneable handle to one playback session.
///
/// All clones address the same session; the service hands out clones so
/// callers can bind callbacks after starting playback.
#[derive(Clone)]
pub struct ChannelController {
    shared: Arc<ControllerShared>,
}

impl ChannelController {
    /// Sound-effect controllers register themselves with `registry` at
    /// construction; the music singleton passes `None`.
    pub(crate) fn new(
        ctx: Arc<ControllerContext>,
        music: bool,
        registry: Option<ChannelRegistry>,
    ) -> Self {
        let controller = Self {
            shared: Arc::new(ControllerShared {
                id: ChannelId::new(),
                music,
                ctx,
                registry: registry.clone(),
                state: Mutex::new(ChannelState::new()),
            }),
        };
        if let Some(registry) = registry {
            registry.register(controller.clone());
        }
        controller
    }

    pub fn id(&self) -> ChannelId {
        self.shared.id
    }

    /// Set the asset URL. Switching to a different URL while a channel is
    /// active force-stops the old playback first; setting the same URL is a
    /// no-op.
    pub fn set_url(&self, url: impl Into<String>) {
        let url = url.into();
        if self.shared.state.lock().url == url {
            return;
        }
        self.stop();
        self.shared.state.lock().url = url;
    }

    /// Start playback after the platform unlock step.
    ///
    /// Any existing channel is stopped first, so a controller never owns
    /// more than one live engine channel. `loops` counts full plays; `0`
    /// loops forever. Does nothing while no URL is set.
    pub fn play(&self, loops: u32) {
        let bridge = self.shared.ctx.bridge.clone();
        let shared = Arc::clone(&self.shared);
        unlock::ensure_audio_unlocked(bridge.as_ref(), move || {
            ControllerShared::start(&shared, loops);
        });
    }

    /// Pause playback. Only meaningful while actually playing; fires
    /// `on_pause` and suspends the progress poll.
    pub fn pause(&self) {
        let shared = &self.shared;
        {
            let state = shared.state.lock();
            if state.channel.is_none() || !state.playing {
                return;
            }
        }
        emit_event!(shared, on_pause);
        {
            let mut state = shared.state.lock();
            if let Some(channel) = state.channel.as_ref() {
                if let Err(err) = channel.pause() {
                    warn!(error = %err, "engine failed to pause channel");
                }
            }
            state.paused = true;
            state.playing = false;
        }
        shared.ctx.scheduler.deregister(&shared.id);
        debug!(url = %self.url(), "channel paused");
    }

    /// Resume from a pause and restart the progress poll.
    pub fn resume(&self) {
        let shared = &self.shared;
        {
            let mut state = shared.state.lock();
            if state.channel.is_none() || !state.paused {
                return;
            }
            state.paused = false;
            state.playing = true;
            if let Some(channel) = state.channel.as_ref() {
                if let Err(err) = channel.resume() {
                    warn!(error = %err, "engine failed to resume channel");
                }
            }
        }
        ControllerShared::register_polling(shared);
        debug!(url = %self.url(), "channel resumed");
    }

    /// Stop playback and return the channel to the engine pool. Fires
    /// `on_stop` first; a no-op when no channel is live.
    pub fn stop(&self) {
        ControllerShared::halt(&self.shared);
    }

    /// Stop playback and clear every callback slot, breaking reference
    /// cycles through the registered closures.
    pub fn destroy(&self) {
        self.stop();
        self.shared.state.lock().callbacks = CallbackSlots::default();
    }

    pub fn url(&self) -> String {
        self.shared.state.lock().url.clone()
    }

    /// Last position observed by the poll. `None` before playback produced
    /// an audible frame.
    pub fn position(&self) -> Option<Duration> {
        self.shared.state.lock().position
    }

    /// Last duration observed by the poll. `None` while still unknown.
    pub fn duration(&self) -> Option<Duration> {
        self.shared.state.lock().duration
    }

    pub fn is_music(&self) -> bool {
        self.shared.music
    }

    pub fn is_paused(&self) -> bool {
        self.shared.state.lock().paused
    }

    pub fn is_playing(&self) -> bool {
        self.shared.state.lock().playing
    }

    // ------------------------------------------------------------------
    // Event registration. Single slot per event; the last writer wins.
    // ------------------------------------------------------------------

    /// Playback actually started (first frame with position above zero).
    pub fn on_play(&self, callback: impl FnMut() + Send + 'static) {
        self.shared.state.lock().callbacks.on_play = Some(Box::new(callback));
    }

    pub fn on_pause(&self, callback: impl FnMut() + Send + 'static) {
        self.shared.state.lock().callbacks.on_pause = Some(Box::new(callback));
    }

    pub fn on_stop(&self, callback: impl FnMut() + Send + 'static) {
        self.shared.state.lock().callbacks.on_stop = Some(Box::new(callback));
    }

    /// Channel finished all requested loops. Fired before the automatic stop.
    pub fn on_complete(&self, callback: impl FnMut() + Send + 'static) {
        self.shared.state.lock().callbacks.on_complete = Some(Box::new(callback));
    }

    /// Position/duration snapshot, once per frame while playing.
    pub fn on_progress(&self, callback: impl FnMut(ProgressUpdate) + Send + 'static) {
        self.shared.state.lock().callbacks.on_progress = Some(Box::new(callback));
    }

    /// Playback failure. May stay silent forever if nothing goes wrong.
    pub fn on_error(&self, callback: impl FnMut(&SoundError) + Send + 'static) {
        self.shared.state.lock().callbacks.on_error = Some(Box::new(callback));
    }
}

impl ControllerShared {
    /// The body of `play()`, run once the unlock step has released us.
    fn start(shared: &Arc<Self>, loops: u32) {
        let url = shared.state.lock().url.clone();
        if url.is_empty() {
            debug!("play requested without a url, ignoring");
            return;
        }

        Self::halt(shared);

        let play_url = url::adapt_url(&url, &shared.ctx.config, shared.ctx.env.as_ref());
        let started_ms = shared.ctx.clock.unix_timestamp_millis();
        let completion = Self::completion_handler(shared);
        let result = if shared.music {
            shared
                .ctx
                .engine
                .play_music(&play_url, loops, completion, Duration::ZERO)
        } else {
            shared
                .ctx
                .engine
                .play_sound(&play_url, loops, completion, Duration::ZERO)
        };

        let channel = match result {
            Ok(channel) => channel,
            Err(err) => {
                warn!(url = %play_url, error = %err, "engine refused to open a channel");
                let err = SoundError::from(err);
                emit_event!(shared, on_error, &err);
                return;
            }
        };

        {
            let mut state = shared.state.lock();
            state.channel = Some(channel);
            state.playing = false;
            state.paused = false;
            state.position = None;
            state.duration = None;
            state.play_started_ms = started_ms;
            state.generation = state.generation.wrapping_add(1);
        }
        // A replayed sound effect deregistered itself when it last stopped;
        // put it back so the bulk-stop sweep reaches the new channel.
        if let Some(registry) = &shared.registry {
            registry.register(ChannelController {
                shared: Arc::clone(shared),
            });
        }
        Self::register_polling(shared);
        debug!(url = %play_url, music = shared.music, loops, "channel requested");
    }

    /// Handler the engine fires when the channel finishes naturally.
    fn completion_handler(shared: &Arc<Self>) -> CompletionHandler {
        let weak = Arc::downgrade(shared);
        Box::new(move || {
            if let Some(shared) = weak.upgrade() {
                emit_event!(shared, on_complete);
                ControllerShared::halt(&shared);
            }
        })
    }

    fn register_polling(shared: &Arc<Self>) {
        let weak = Arc::downgrade(shared);
        shared.ctx.scheduler.register(
            shared.id,
            Box::new(move || match weak.upgrade() {
                Some(shared) => ControllerShared::poll(&shared),
                None => PollOutcome::Detach,
            }),
        );
    }

    /// One frame of progress emulation.
    fn poll(shared: &Arc<Self>) -> PollOutcome {
        let fire_play;
        let progress;
        let timed_out;
        {
            let mut state = shared.state.lock();
            let Some(channel) = state.channel.as_ref() else {
                return PollOutcome::Detach;
            };
            let position = channel.position();
            let duration = channel.duration();
            state.position = position;
            state.duration = duration;

            fire_play = !state.playing
                && state.position.is_some_and(|pos| pos > Duration::ZERO);
            if fire_play {
                state.playing = true;
            }

            progress = if state.playing {
                let position = state.position.unwrap_or(Duration::ZERO);
                state
                    .duration
                    .filter(|dur| *dur > Duration::ZERO)
                    .map(|duration| ProgressUpdate { position, duration })
            } else {
                None
            };

            let waited_ms = shared.ctx.clock.unix_timestamp_millis() - state.play_started_ms;
            timed_out = progress.is_none()
                && waited_ms > shared.ctx.config.start_timeout.as_millis() as i64;
        }

        if fire_play {
            debug!("channel produced its first audible frame");
            emit_event!(shared, on_play);
        }

        if let Some(update) = progress {
            emit_event!(shared, on_progress, update);
        } else if timed_out {
            let waited = shared.ctx.config.start_timeout;
            warn!(waited = ?waited, "channel never started, treating as failed");
            let err = SoundError::StartTimeout { waited };
            emit_event!(shared, on_error, &err);
            Self::halt(shared);
            return PollOutcome::Detach;
        }

        let state = shared.state.lock();
        if state.channel.is_some() && !state.paused {
            PollOutcome::Continue
        } else {
            PollOutcome::Detach
        }
    }

    /// The body of `stop()`: fire `on_stop`, tear the channel down, return
    /// it to the engine pool, and drop the poll and registry entries.
    fn halt(shared: &Arc<Self>) {
        let observed = {
            let state = shared.state.lock();
            if state.channel.is_none() {
                return;
            }
            state.generation
        };
        emit_event!(shared, on_stop);

        let channel = {
            let mut state = shared.state.lock();
            // `on_stop` may have re-entered `play()` and installed a fresh
            // channel; that session owns its own cleanup, so leave it (and
            // its poll and registry entries) alone.
            if state.generation != observed {
                return;
            }
            state.paused = false;
            state.playing = false;
            state.channel.take()
        };
        // An empty take means a re-entrant `stop()` already tore the
        // channel down; nothing left to clean up.
        if let Some(channel) = channel {
            if let Err(err) = channel.stop() {
                warn!(error = %err, "engine failed to stop channel");
            }
            shared.ctx.engine.remove_channel(channel);
            debug!("channel stopped and returned to the pool");

            shared.ctx.scheduler.deregister(&shared.id);
            if let Some(registry) = &shared.registry {
                registry.deregister(&shared.id);
            }
        }
    }
}
