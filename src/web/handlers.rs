//! HTTP handlers for the page, probability API and profile proxy

use crate::error::LineupError;
use crate::metrics::{metrics_content_type, render_metrics};
use crate::service::{AppState, HealthCheck, HealthStatus};
use crate::types::{Rating, WinProbability};
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Query parameters for `/probability`
#[derive(Debug, Deserialize)]
pub struct ProbabilityQuery {
    pub a: Rating,
    pub b: Rating,
}

/// Response body for `/probability`
#[derive(Debug, Serialize, Deserialize)]
pub struct ProbabilityResponse {
    pub a: Rating,
    pub b: Rating,
    pub probability: WinProbability,
}

/// Landing page: the configured matchup's win probability and nothing else
pub async fn page_handler(State(state): State<Arc<AppState>>) -> Html<String> {
    let timer = state.metrics().start_timer();
    let probability = state.page_probability();
    debug!("Rendering page with probability {}", probability);

    state.metrics().record_request("page", timer.stop());
    Html(format!("<h1>{}</h1>", probability))
}

/// Win probability for arbitrary ratings as JSON
pub async fn probability_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ProbabilityQuery>,
) -> Json<ProbabilityResponse> {
    let timer = state.metrics().start_timer();
    let probability = state.win_probability(query.a, query.b);

    state.metrics().record_request("probability", timer.stop());
    Json(ProbabilityResponse {
        a: query.a,
        b: query.b,
        probability,
    })
}

/// Player profile passthrough
pub async fn player_handler(
    State(state): State<Arc<AppState>>,
    Path(player_id): Path<String>,
) -> Response {
    let timer = state.metrics().start_timer();

    let Some(provider) = state.profile_provider() else {
        state
            .metrics()
            .record_profile_lookup("unavailable", timer.stop());
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "error": "Player profile lookups are not configured" })),
        )
            .into_response();
    };

    match provider.get_player(&player_id).await {
        Ok(profile) => {
            state.metrics().record_profile_lookup("success", timer.stop());
            (StatusCode::OK, Json(profile)).into_response()
        }
        Err(e) => {
            state.metrics().record_profile_lookup("failure", timer.stop());
            let code = match e.downcast_ref::<LineupError>() {
                Some(LineupError::InvalidPlayerId { .. }) => {
                    debug!("Rejected profile lookup: {}", e);
                    StatusCode::BAD_REQUEST
                }
                Some(LineupError::ProfileRequestFailed { .. }) => {
                    warn!("Upstream rejected profile lookup: {}", e);
                    StatusCode::BAD_GATEWAY
                }
                _ => {
                    error!("Profile lookup failed: {:#}", e);
                    StatusCode::BAD_GATEWAY
                }
            };
            (
                code,
                Json(json!({ "error": e.to_string(), "player_id": player_id })),
            )
                .into_response()
        }
    }
}

/// Health check handler
pub async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let health = HealthCheck::check(state);
    let code = match health.status {
        HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };
    (code, Json(health))
}

/// Prometheus metrics handler
pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> Response {
    match render_metrics(&state.metrics()) {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, metrics_content_type())],
            body,
        )
            .into_response(),
        Err(e) => {
            error!("Failed to encode metrics: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to encode metrics".to_string(),
            )
                .into_response()
        }
    }
}
