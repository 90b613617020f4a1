pub mod rest;
pub mod state;

use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    routing::{get, post},
    Router,
};
use state::AppState;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

pub use rest::{analysis_status_handler, start_analysis_handler, store_results_handler};

/// Builds the application router. Kept separate from the binary so tests can
/// drive the full stack in-process without binding a socket.
pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    Router::new()
        .route("/analyze", post(start_analysis_handler))
        .route("/analyze/status/{session_id}", get(analysis_status_handler))
        .route("/results/store", post(store_results_handler))
        .layer(cors)
        .with_state(state)
}
