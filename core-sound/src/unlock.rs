//! # Audio Unlock Step
//!
//! A restrictive mobile in-app browser refuses to start audio until some
//! bridge call has completed. Issuing a harmless network-type probe and
//! deferring playback to its completion handler unlocks the session.
//!
//! The step is best-effort: a failing bridge never blocks playback, it only
//! loses the deferral.

use engine_traits::{BridgeCallback, HostBridge};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::warn;

/// Bridge method probed to unlock audio. The call itself is a no-op; only
/// its completion matters.
const UNLOCK_PROBE_METHOD: &str = "getNetworkType";

/// Run `callback` once audio playback is permitted.
///
/// With a bridge present the callback is deferred until the probe's
/// completion handler fires; if the probe cannot be issued the callback runs
/// immediately. Without a bridge the callback runs synchronously. In every
/// case the callback runs exactly once.
pub fn ensure_audio_unlocked<F>(bridge: Option<&Arc<dyn HostBridge>>, callback: F)
where
    F: FnOnce() + Send + 'static,
{
    let Some(bridge) = bridge else {
        callback();
        return;
    };

    // Shared slot so the fallback path cannot double-fire if the bridge both
    // invokes the handler and returns an error.
    let slot = Arc::new(Mutex::new(Some(callback)));
    let deferred = Arc::clone(&slot);
    let handler: BridgeCallback = Box::new(move || {
        if let Some(callback) = deferred.lock().take() {
            callback();
        }
    });

    if let Err(err) = bridge.invoke(UNLOCK_PROBE_METHOD, handler) {
        warn!(error = %err, "audio unlock probe failed, proceeding anyway");
        if let Some(callback) = slot.lock().take() {
            callback();
        }
    }
}
