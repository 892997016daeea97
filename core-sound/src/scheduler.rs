//! # Poll Scheduler
//!
//! Per-frame polling for active controllers. The host's frame driver calls
//! [`PollScheduler::tick`] once per frame; each registered closure reads its
//! channel's position/duration and fires progress callbacks.
//!
//! Entries are keyed by controller identity and removed explicitly on
//! pause/stop/destroy, never garbage-collected implicitly. `tick()` is safe
//! against closures that deregister themselves or register new entries
//! mid-frame.

use crate::controller::ChannelId;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// What a poll closure wants the scheduler to do with its entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// Keep polling on the next frame.
    Continue,
    /// Drop the entry; the controller is no longer interested.
    Detach,
}

type PollFn = Box<dyn FnMut() -> PollOutcome + Send>;

/// Frame-driven registry of poll closures, keyed by controller identity.
#[derive(Clone, Default)]
pub struct PollScheduler {
    entries: Arc<Mutex<HashMap<ChannelId, PollFn>>>,
}

impl PollScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the poll closure for `id`.
    pub fn register(&self, id: ChannelId, poll: PollFn) {
        self.entries.lock().insert(id, poll);
    }

    /// Remove the poll closure for `id`, if any.
    pub fn deregister(&self, id: &ChannelId) {
        self.entries.lock().remove(id);
    }

    /// Run every registered poll closure once.
    ///
    /// Each entry is taken out of the map while its closure runs, so the
    /// closure may call back into the scheduler freely. The entry is put
    /// back afterwards unless the closure asked to detach or something else
    /// claimed the id in the meantime.
    pub fn tick(&self) {
        let ids: Vec<ChannelId> = self.entries.lock().keys().copied().collect();
        for id in ids {
            let Some(mut poll) = self.entries.lock().remove(&id) else {
                continue;
            };
            if poll() == PollOutcome::Continue {
                self.entries.lock().entry(id).or_insert(poll);
            }
        }
    }

    /// Number of registered entries.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Returns `true` if `id` currently has a poll closure registered.
    pub fn contains(&self, id: &ChannelId) -> bool {
        self.entries.lock().contains_key(id)
    }
}
