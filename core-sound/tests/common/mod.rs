//! Shared fakes for the integration tests: a scriptable engine, a manual
//! clock, and host environment/bridge stand-ins.

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use engine_traits::{
    AudioEngine, BridgeCallback, Clock, CompletionHandler, EngineError, HostBridge,
    HostEnvironment, SoundChannel,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// ============================================================================
// Fake engine
// ============================================================================

/// Observable state of one fake channel, shared between the handle given to
/// the controller and the test.
#[derive(Default)]
pub struct ChannelCell {
    pub position: Option<Duration>,
    pub duration: Option<Duration>,
    pub stopped: bool,
    pub paused: bool,
    pub resumes: usize,
}

struct FakeChannel {
    cell: Arc<Mutex<ChannelCell>>,
}

impl SoundChannel for FakeChannel {
    fn position(&self) -> Option<Duration> {
        self.cell.lock().unwrap().position
    }

    fn duration(&self) -> Option<Duration> {
        self.cell.lock().unwrap().duration
    }

    fn pause(&self) -> engine_traits::Result<()> {
        self.cell.lock().unwrap().paused = true;
        Ok(())
    }

    fn resume(&self) -> engine_traits::Result<()> {
        let mut cell = self.cell.lock().unwrap();
        cell.paused = false;
        cell.resumes += 1;
        Ok(())
    }

    fn stop(&self) -> engine_traits::Result<()> {
        self.cell.lock().unwrap().stopped = true;
        Ok(())
    }
}

#[derive(Clone)]
pub struct PlayRecord {
    pub url: String,
    pub loops: u32,
    pub music: bool,
}

#[derive(Default)]
struct EngineInner {
    plays: Vec<PlayRecord>,
    cells: Vec<Arc<Mutex<ChannelCell>>>,
    completions: Vec<Option<CompletionHandler>>,
    removed: usize,
    fail_next: bool,
    music_volume: Option<f32>,
    sound_volume: Option<f32>,
}

/// Scriptable in-memory engine. Clones share state, so tests keep one handle
/// and hand another to the service.
#[derive(Clone, Default)]
pub struct FakeEngine {
    inner: Arc<Mutex<EngineInner>>,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next channel request fail.
    pub fn fail_next(&self) {
        self.inner.lock().unwrap().fail_next = true;
    }

    pub fn play_count(&self) -> usize {
        self.inner.lock().unwrap().plays.len()
    }

    pub fn plays(&self) -> Vec<PlayRecord> {
        self.inner.lock().unwrap().plays.clone()
    }

    pub fn removed(&self) -> usize {
        self.inner.lock().unwrap().removed
    }

    /// Channels handed out and not yet returned to the pool.
    pub fn live_channels(&self) -> usize {
        let inner = self.inner.lock().unwrap();
        inner.plays.len() - inner.removed
    }

    pub fn cell(&self, index: usize) -> Arc<Mutex<ChannelCell>> {
        Arc::clone(&self.inner.lock().unwrap().cells[index])
    }

    /// Script position/duration for channel `index`, as the engine would
    /// report once audio is flowing.
    pub fn set_progress(&self, index: usize, position: Duration, duration: Duration) {
        let cell = self.cell(index);
        let mut cell = cell.lock().unwrap();
        cell.position = Some(position);
        cell.duration = Some(duration);
    }

    /// Fire the completion handler registered for channel `index`.
    pub fn fire_completion(&self, index: usize) {
        let handler = self.inner.lock().unwrap().completions[index].take();
        if let Some(handler) = handler {
            handler();
        }
    }

    pub fn music_volume(&self) -> Option<f32> {
        self.inner.lock().unwrap().music_volume
    }

    pub fn sound_volume(&self) -> Option<f32> {
        self.inner.lock().unwrap().sound_volume
    }

    fn spawn(
        &self,
        url: &str,
        loops: u32,
        music: bool,
        on_complete: CompletionHandler,
    ) -> engine_traits::Result<Box<dyn SoundChannel>> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_next {
            inner.fail_next = false;
            return Err(EngineError::ChannelUnavailable("scripted failure".into()));
        }
        let cell = Arc::new(Mutex::new(ChannelCell::default()));
        inner.cells.push(Arc::clone(&cell));
        inner.completions.push(Some(on_complete));
        inner.plays.push(PlayRecord {
            url: url.to_string(),
            loops,
            music,
        });
        Ok(Box::new(FakeChannel { cell }))
    }
}

impl AudioEngine for FakeEngine {
    fn play_music(
        &self,
        url: &str,
        loops: u32,
        on_complete: CompletionHandler,
        _start_offset: Duration,
    ) -> engine_traits::Result<Box<dyn SoundChannel>> {
        self.spawn(url, loops, true, on_complete)
    }

    fn play_sound(
        &self,
        url: &str,
        loops: u32,
        on_complete: CompletionHandler,
        _start_offset: Duration,
    ) -> engine_traits::Result<Box<dyn SoundChannel>> {
        self.spawn(url, loops, false, on_complete)
    }

    fn remove_channel(&self, _channel: Box<dyn SoundChannel>) {
        self.inner.lock().unwrap().removed += 1;
    }

    fn set_music_volume(&self, volume: f32) {
        self.inner.lock().unwrap().music_volume = Some(volume);
    }

    fn set_sound_volume(&self, volume: f32) {
        self.inner.lock().unwrap().sound_volume = Some(volume);
    }
}

// ============================================================================
// Clock, environment, bridge
// ============================================================================

/// Clock advanced explicitly by the test.
pub struct ManualClock {
    millis: Mutex<i64>,
}

impl ManualClock {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            millis: Mutex::new(1_700_000_000_000),
        })
    }

    pub fn advance(&self, delta: Duration) {
        *self.millis.lock().unwrap() += delta.as_millis() as i64;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(*self.millis.lock().unwrap())
            .single()
            .expect("valid manual timestamp")
    }
}

pub struct FakeEnv {
    pub packaged: bool,
}

impl HostEnvironment for FakeEnv {
    fn is_packaged_app(&self) -> bool {
        self.packaged
    }
}

pub fn plain_env() -> Arc<dyn HostEnvironment> {
    Arc::new(FakeEnv { packaged: false })
}

pub fn packaged_env() -> Arc<dyn HostEnvironment> {
    Arc::new(FakeEnv { packaged: true })
}

/// Bridge that queues probe callbacks until the test releases them,
/// mimicking the asynchronous in-app browser.
#[derive(Default)]
pub struct DeferredBridge {
    pending: Mutex<Vec<BridgeCallback>>,
}

impl DeferredBridge {
    pub fn pending(&self) -> usize {
        self.pending.lock().unwrap().len()
    }

    pub fn release_all(&self) {
        let callbacks: Vec<BridgeCallback> =
            self.pending.lock().unwrap().drain(..).collect();
        for callback in callbacks {
            callback();
        }
    }
}

impl HostBridge for DeferredBridge {
    fn invoke(&self, _method: &str, callback: BridgeCallback) -> engine_traits::Result<()> {
        self.pending.lock().unwrap().push(callback);
        Ok(())
    }
}
