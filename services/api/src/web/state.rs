//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use prompt_analyzer_core::ports::{AnalysisDispatcher, ResultStore};
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all
/// handlers. Requests hold no other mutable state; everything per-session
/// lives in the result store.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ResultStore>,
    pub dispatcher: Arc<dyn AnalysisDispatcher>,
    pub config: Arc<Config>,
}
