//! Page components

pub mod registration_detail;
pub mod registrations;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use leptos::prelude::on_cleanup;

/// Display format for application dates
pub(crate) const DATE_FORMAT: &str = "%d %b %Y";

/// Label on a button whose action is pending
pub(crate) const PROCESSING_LABEL: &str = "Processing…";

/// Flag cleared when the owning page unmounts.
///
/// Async work checks it before writing page signals so a late response
/// never touches a disposed page.
pub(crate) fn page_liveness() -> Arc<AtomicBool> {
    let alive = Arc::new(AtomicBool::new(true));
    let flag = alive.clone();
    on_cleanup(move || flag.store(false, Ordering::Relaxed));
    alive
}

pub(crate) fn is_alive(alive: &AtomicBool) -> bool {
    alive.load(Ordering::Relaxed)
}
