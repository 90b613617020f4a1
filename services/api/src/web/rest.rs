//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the analyzer's three endpoints: job
//! submission, status polling, and the worker's result-ingestion callback.

use crate::web::state::AppState;
use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use prompt_analyzer_core::domain::{
    validate_request, AnalysisJob, AnalysisRequest, AnalysisStatus, ErrorResponse,
    StartAnalysisResponse, StoreResultsRequest,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

//=========================================================================================
// API Response Structs
//=========================================================================================

/// The acknowledgement sent to the worker after a successful ingestion write.
#[derive(Serialize)]
pub struct AckResponse {
    success: bool,
    message: String,
}

fn bad_request(message: impl Into<String>) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(message))).into_response()
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Accept an analysis job and trigger the external worker.
///
/// Mints a fresh session id, forwards the merged payload to the worker's
/// webhook on a detached task, and returns the session id immediately. The
/// response never waits on the worker; dispatch failures are logged only,
/// since the job is fire-and-forget by design. Every call mints a new
/// session, so retries produce duplicate jobs.
pub async fn start_analysis_handler(
    State(app_state): State<Arc<AppState>>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            return bad_request(format!("Invalid request body: {}", rejection.body_text()))
        }
    };

    // Re-validate server-side; the CLI checks the same rules before it ever
    // sends a request, but the contract does not rest on client behavior.
    if let Err(e) = validate_request(&request) {
        return bad_request(e.to_string());
    }

    let session_id = Uuid::new_v4().to_string();
    let job = AnalysisJob::new(request, session_id.clone());
    info!(%session_id, domain = %job.domain, "Dispatching analysis job");

    let dispatcher = app_state.dispatcher.clone();
    tokio::spawn(async move {
        // The 200 has already been decided; a dispatch failure only gets logged.
        if let Err(e) = dispatcher.dispatch(&job).await {
            error!(session_id = %job.session_id, "Failed to trigger analysis webhook: {e}");
        }
    });

    Json(StartAnalysisResponse {
        success: true,
        session_id,
    })
    .into_response()
}

/// Report whether a session's results have arrived.
///
/// Reads are consuming: the first poll that finds results removes them from
/// the store, so one completed analysis is delivered exactly once. Responses
/// carry `Cache-Control: no-store` so the poll always reflects current store
/// state.
pub async fn analysis_status_handler(
    State(app_state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Response {
    let (status_code, status) = match app_state.store.take(&session_id).await {
        Ok(Some(data)) => (StatusCode::OK, AnalysisStatus::Complete { data }),
        Ok(None) => (StatusCode::OK, AnalysisStatus::Processing),
        Err(e) => {
            error!(%session_id, "Failed to read the result store: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                AnalysisStatus::Error {
                    message: e.to_string(),
                },
            )
        }
    };

    (
        status_code,
        [(header::CACHE_CONTROL, "no-store")],
        Json(status),
    )
        .into_response()
}

/// Ingest a finished result set pushed by the analysis worker.
///
/// The bearer token is compared before the body is parsed: a request with a
/// missing or wrong token is rejected with 401 no matter what it carries,
/// and nothing is written. Re-posts for the same session overwrite (the
/// worker retries on its own transient failures).
pub async fn store_results_handler(
    State(app_state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let expected = format!("Bearer {}", app_state.config.callback_secret);
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == expected);
    if !authorized {
        return (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new("Unauthorized")),
        )
            .into_response();
    }

    let request: StoreResultsRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(_) => return bad_request("sessionId and top_prompts are required"),
    };
    if request.session_id.is_empty() {
        return bad_request("sessionId must not be empty");
    }

    match app_state
        .store
        .put(
            &request.session_id,
            request.top_prompts,
            app_state.config.result_ttl,
        )
        .await
    {
        Ok(()) => {
            info!(session_id = %request.session_id, "Stored analysis results");
            Json(AckResponse {
                success: true,
                message: "Results stored".to_string(),
            })
            .into_response()
        }
        Err(e) => {
            error!(session_id = %request.session_id, "Failed to store results: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to store results")),
            )
                .into_response()
        }
    }
}
