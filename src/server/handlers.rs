use crate::checker::check_usernames;
use crate::server::AppState;
use crate::status::UsernameStatus;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Body of a `POST /check` request
#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    #[serde(default)]
    pub usernames: Vec<String>,
}

/// Body of the `GET /status` response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}

/// Error body returned for rejected requests
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Liveness probe
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        message: "fragment-scout is running",
    })
}

/// Checks a batch of usernames and returns the username→status map
///
/// Rejects empty batches and batches over the configured size limit with
/// HTTP 400; everything else always answers 200 with a complete map, with
/// per-username failures encoded as status values.
pub async fn check(
    State(state): State<AppState>,
    Json(request): Json<CheckRequest>,
) -> Result<Json<HashMap<String, UsernameStatus>>, (StatusCode, Json<ErrorResponse>)> {
    if request.usernames.is_empty() {
        return Err(bad_request("no usernames provided"));
    }

    let max_batch = state.config.checker.max_batch_size as usize;
    if request.usernames.len() > max_batch {
        return Err(bad_request(format!(
            "batch size {} exceeds the limit of {}",
            request.usernames.len(),
            max_batch
        )));
    }

    let results = check_usernames(&state.client, &state.config, &request.usernames).await;
    if results.is_empty() {
        return Err(bad_request("no valid usernames after normalization"));
    }

    Ok(Json(results))
}

fn bad_request(message: impl Into<String>) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}
