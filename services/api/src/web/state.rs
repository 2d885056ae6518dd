//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.
//!
//! There is deliberately nothing mutable here: no token cache, no session
//! table. Each request independently re-authenticates against the store.

use std::sync::Arc;

use crate::config::Config;
use goal_tracker_core::ports::{FeedbackService, GoalStoreService};

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn GoalStoreService>,
    pub feedback: Arc<dyn FeedbackService>,
    pub config: Arc<Config>,
}
