//! Deduplicated layout warnings.
//!
//! Layout passes re-run on every resize, so a condition worth warning about
//! tends to recur many times per second. Each distinct message is logged
//! through [`log::warn!`] once; later repeats are dropped.

use std::collections::HashSet;
use std::sync::Mutex;

/// Global set of warnings already emitted.
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about a recoverable layout condition (logged once per unique message).
///
/// Returns whether the warning was emitted by this call.
///
/// # Example
/// ```ignore
/// warn_once("sizing", "PlotView(3) stretches width but has no available width");
/// ```
pub fn warn_once(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    let fresh = WARNED.lock().map_or(true, |mut guard| {
        guard.get_or_insert_with(HashSet::new).insert(key)
    });

    if fresh {
        log::warn!(target: "trellis", "[{component}] {message}");
    }
    fresh
}

/// Forget every recorded warning (call when mounting a new document).
pub fn clear_warnings() {
    let Ok(mut guard) = WARNED.lock() else {
        return;
    };
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}
