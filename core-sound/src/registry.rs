//! # Channel Registry
//!
//! The set of live sound-effect controllers, owned by the sound service and
//! injected into every sound-effect controller at construction. Enables
//! bulk-stop of everything except music.
//!
//! Controllers deregister themselves when they stop naturally, so the set
//! only ever holds channels that still own engine resources.

use crate::controller::{ChannelController, ChannelId};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::debug;

/// Cloneable handle to the shared set of active sound-effect controllers.
#[derive(Clone, Default)]
pub struct ChannelRegistry {
    entries: Arc<Mutex<Vec<ChannelController>>>,
}

impl ChannelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a controller to the active set. Called at sound-effect controller
    /// construction and again on every replay after a stop; an already
    /// registered controller is left alone. The music singleton is never
    /// registered.
    pub(crate) fn register(&self, controller: ChannelController) {
        let mut entries = self.entries.lock();
        if entries.iter().all(|entry| entry.id() != controller.id()) {
            entries.push(controller);
        }
    }

    /// Remove one controller from the active set.
    pub(crate) fn deregister(&self, id: &ChannelId) {
        self.entries.lock().retain(|entry| entry.id() != *id);
    }

    /// Stop every registered controller.
    ///
    /// The set is drained under the lock and iterated outside it, so
    /// `on_stop` callbacks that re-enter the registry (e.g. by starting a
    /// new sound) cannot corrupt iteration; controllers registered during
    /// the sweep are left untouched.
    pub fn stop_all(&self) {
        let drained: Vec<ChannelController> = std::mem::take(&mut *self.entries.lock());
        if drained.is_empty() {
            return;
        }
        debug!(count = drained.len(), "stopping all registered sounds");
        for controller in drained {
            controller.stop();
        }
    }

    /// Number of controllers currently registered.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}
