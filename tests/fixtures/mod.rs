//! Test fixtures shared by the integration tests

#![allow(dead_code)]

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use lineup_nash::config::{AppConfig, UtrSettings};
use lineup_nash::types::{Player, Roster};
use serde_json::json;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// A request received by the stand-in profile API
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Request path as sent, before percent-decoding
    pub path: String,
    pub player_id: String,
    pub cookie: Option<String>,
}

#[derive(Clone)]
struct StandInState {
    status: StatusCode,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// Local HTTP server answering `GET /v1/player/{id}/profile`
pub struct ProfileApiStandIn {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl ProfileApiStandIn {
    /// Start a stand-in that answers every profile request with `status`
    pub async fn start(status: StatusCode) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = StandInState {
            status,
            requests: requests.clone(),
        };

        let app = Router::new()
            .route("/v1/player/{player_id}/profile", get(profile))
            .fallback(unexpected_path)
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            requests,
        }
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    /// Client settings pointing at this stand-in
    pub fn settings(&self, jwt: &str) -> UtrSettings {
        UtrSettings {
            base_url: self.base_url.clone(),
            jwt: Some(jwt.to_string()),
        }
    }
}

async fn profile(
    State(state): State<StandInState>,
    Path(player_id): Path<String>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let cookie = headers
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    if let Ok(mut requests) = state.requests.lock() {
        requests.push(RecordedRequest {
            path: uri.path().to_string(),
            player_id: player_id.clone(),
            cookie,
        });
    }

    if state.status.is_success() {
        (
            state.status,
            Json(json!({
                "id": player_id,
                "firstName": "Test",
                "lastName": "Player",
                "singlesUtr": 11.42
            })),
        )
            .into_response()
    } else {
        (state.status, "invalid session").into_response()
    }
}

async fn unexpected_path(State(state): State<StandInState>, uri: Uri) -> StatusCode {
    if let Ok(mut requests) = state.requests.lock() {
        requests.push(RecordedRequest {
            path: uri.path().to_string(),
            player_id: String::new(),
            cookie: None,
        });
    }
    StatusCode::NOT_FOUND
}

/// Build a roster from ratings, naming players `{prefix}1..`
pub fn roster(prefix: &str, ratings: &[f64]) -> Roster {
    Roster::new(
        ratings
            .iter()
            .enumerate()
            .map(|(i, &rating)| Player::new(format!("{}{}", prefix, i + 1), rating))
            .collect(),
    )
}

/// Default configuration with a smaller solver workload
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.solver.iterations = 2_000;
    config
}
