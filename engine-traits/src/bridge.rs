//! Host bridge and environment abstractions.
//!
//! Some in-app browsers refuse to start audio until a harmless bridge call
//! has completed, and some packaged-app hosts only support a subset of
//! audio containers. Both quirks are host facts the core cannot detect on
//! its own, so they are exposed behind these traits.

use crate::error::Result;

/// Callback fired by the host bridge when an invoked method completes.
pub type BridgeCallback = Box<dyn FnOnce() + Send>;

/// Bridge into the host's in-app browser runtime.
///
/// The core only ever issues no-op probe calls through this trait (e.g. a
/// network-type query) so that the browser unlocks subsequent audio
/// playback. Implementations must invoke `callback` exactly once when the
/// probed method completes.
pub trait HostBridge: Send + Sync {
    /// Invoke `method` on the host bridge and fire `callback` on completion.
    ///
    /// # Errors
    ///
    /// Returns an error if the call could not be issued at all; in that case
    /// the implementation must not retain `callback`.
    fn invoke(&self, method: &str, callback: BridgeCallback) -> Result<()>;
}

/// Queries about the environment the game is running in.
pub trait HostEnvironment: Send + Sync {
    /// Returns `true` when running inside the packaged-app host that only
    /// supports a subset of audio containers.
    fn is_packaged_app(&self) -> bool;
}
