//! Shared application state for the API server.

use overlap_core::Scheduler;

/// State shared by every handler, wrapped in an `Arc` by the router.
#[derive(Clone)]
pub struct AppState {
    /// The scheduling service bound to the active store.
    pub scheduler: Scheduler,
}

impl AppState {
    /// Wrap a scheduler.
    pub const fn new(scheduler: Scheduler) -> Self {
        Self { scheduler }
    }
}
