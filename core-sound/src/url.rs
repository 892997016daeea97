//! # Asset URL Adaptation
//!
//! The packaged-app host only supports a subset of audio containers, so
//! requested asset paths may need their extension rewritten before they are
//! handed to the engine. On every other host URLs pass through untouched.

use crate::config::SoundConfig;
use engine_traits::HostEnvironment;

/// Rewrite `url`'s extension for the packaged-app host.
///
/// When `env.is_packaged_app()` and the current extension is not one of the
/// configured passthrough formats, the extension is replaced with
/// `config.preferred_extension`. URLs without an extension are returned
/// unchanged.
pub fn adapt_url(url: &str, config: &SoundConfig, env: &dyn HostEnvironment) -> String {
    if !env.is_packaged_app() {
        return url.to_string();
    }
    let ext = file_extension(url);
    if ext.is_empty() {
        return url.to_string();
    }
    let dotted = format!(".{ext}");
    if config
        .passthrough_extensions
        .iter()
        .any(|pass| pass.eq_ignore_ascii_case(&dotted))
    {
        return url.to_string();
    }
    let stem = &url[..url.len() - dotted.len()];
    format!("{stem}{}", config.preferred_extension)
}

/// Extension of the final path segment, without the dot. Empty when the
/// segment has no dot or ends with one.
fn file_extension(url: &str) -> &str {
    let name = url.rsplit(['/', '\\']).next().unwrap_or(url);
    match name.rfind('.') {
        Some(idx) if idx + 1 < name.len() => &name[idx + 1..],
        _ => "",
    }
}
