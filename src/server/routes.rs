// Gateway dispatch route
//
// One POST endpoint: {action, params} in, playlist JSON out. The body is
// parsed by hand so malformed input and unknown actions produce the
// gateway's own error envelope instead of a framework rejection.

use axum::body::Bytes;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use super::GatewayState;
use crate::ai::GeminiClient;
use crate::error::GatewayError;
use crate::youtube::SearchClient;

#[derive(Serialize)]
pub struct HealthResponse {
    pub name: String,
    pub version: String,
}

// ---- Route registration ----

pub fn gateway_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/", post(generate))
        .route("/health", get(health))
}

// ---- Handlers ----

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Top-level request boundary: every failure inside dispatch ends up here
/// as an envelope response, nothing is retried.
async fn generate(State(state): State<Arc<GatewayState>>, body: Bytes) -> Response {
    match dispatch(&state, &body).await {
        Ok(response) => response,
        Err(e) => {
            log::error!("request failed: {}", e);
            e.into_response()
        }
    }
}

async fn dispatch(state: &GatewayState, body: &[u8]) -> Result<Response, GatewayError> {
    let request: Value = serde_json::from_slice(body)
        .map_err(|e| GatewayError::BadRequest(format!("request body is not valid JSON: {}", e)))?;

    // A missing action falls through the match like any other unknown value.
    let action = request
        .get("action")
        .and_then(Value::as_str)
        .unwrap_or_default();

    // Both credentials are required up front, regardless of which action
    // runs, so a half-configured deployment fails loudly on every request.
    let youtube_key = state
        .config
        .youtube_api_key
        .clone()
        .ok_or(GatewayError::NotConfigured("YouTube"))?;
    let gemini_key = state
        .config
        .gemini_api_key
        .clone()
        .ok_or(GatewayError::NotConfigured("Gemini"))?;

    match action {
        "search" => {
            let query = param_str(&request, "query")?;
            let client = SearchClient::new(
                state.http.clone(),
                youtube_key,
                state.config.youtube_api_base.clone(),
            );
            let songs = client.search(query).await?;
            log::info!("search {:?} returned {} results", query, songs.len());
            // Bare array, no envelope; createPlaylist responds differently.
            Ok(Json(songs).into_response())
        }
        "createPlaylist" => {
            let prompt = param_str(&request, "prompt")?;
            let client = GeminiClient::new(
                state.http.clone(),
                gemini_key,
                state.config.gemini_api_base.clone(),
            );
            let result = client.generate_playlist(prompt).await?;
            log::info!("generated a playlist of {} songs", result.playlist.len());
            Ok(Json(result).into_response())
        }
        other => Err(GatewayError::InvalidAction(other.to_string())),
    }
}

/// Pull a required string field out of `params`.
fn param_str<'a>(request: &'a Value, field: &str) -> Result<&'a str, GatewayError> {
    request
        .get("params")
        .and_then(|p| p.get(field))
        .and_then(Value::as_str)
        .ok_or_else(|| GatewayError::BadRequest(format!("missing \"params.{}\" field", field)))
}
