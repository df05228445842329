//! Profile lookups against a local stand-in for the rating provider's API

mod fixtures;

use axum::http::StatusCode;
use lineup_nash::config::{AppConfig, UtrSettings};
use lineup_nash::service::AppState;
use lineup_nash::utr::{PlayerProfileProvider, UtrClient};
use lineup_nash::web::create_router;
use lineup_nash::LineupError;
use std::sync::Arc;
use tokio::net::TcpListener;

use fixtures::ProfileApiStandIn;

#[tokio::test]
async fn test_client_sends_jwt_cookie() {
    let api = ProfileApiStandIn::start(StatusCode::OK).await;
    let client = UtrClient::new(&api.settings("token-123")).unwrap();

    let profile = client.get_player("904826").await.unwrap();
    assert_eq!(profile["id"], "904826");
    assert_eq!(profile["singlesUtr"], 11.42);

    let requests = api.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].player_id, "904826");
    assert_eq!(requests[0].cookie.as_deref(), Some("jwt=token-123;"));
}

#[tokio::test]
async fn test_player_id_stays_inside_profile_path() {
    let api = ProfileApiStandIn::start(StatusCode::OK).await;
    let client = UtrClient::new(&api.settings("token-123")).unwrap();

    let id = "../../admin/users?x=";
    let profile = client.get_player(id).await.unwrap();
    assert_eq!(profile["id"], id);

    let requests = api.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].player_id, id);
    assert_eq!(
        requests[0].path,
        "/v1/player/..%2F..%2Fadmin%2Fusers%3Fx=/profile"
    );
}

#[tokio::test]
async fn test_dot_segment_ids_never_reach_upstream() {
    let api = ProfileApiStandIn::start(StatusCode::OK).await;
    let client = UtrClient::new(&api.settings("token-123")).unwrap();

    let err = client.get_player("..").await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<LineupError>(),
        Some(LineupError::InvalidPlayerId { .. })
    ));
    assert!(api.requests().is_empty());
}

#[tokio::test]
async fn test_rejected_session_is_profile_failure() {
    let api = ProfileApiStandIn::start(StatusCode::UNAUTHORIZED).await;
    let client = UtrClient::new(&api.settings("expired")).unwrap();

    let err = client.get_player("42").await.unwrap_err();
    match err.downcast_ref::<LineupError>() {
        Some(LineupError::ProfileRequestFailed { player_id, message }) => {
            assert_eq!(player_id, "42");
            assert!(message.contains("401"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(api.requests().len(), 1);
}

#[tokio::test]
async fn test_unreachable_api_is_an_error() {
    // Bind and drop to get a port nothing listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = UtrClient::new(&UtrSettings {
        base_url: format!("http://{}", addr),
        jwt: Some("token".to_string()),
    })
    .unwrap();

    let err = client.get_player("1").await.unwrap_err();
    assert!(err.downcast_ref::<LineupError>().is_none());
}

#[test]
fn test_client_requires_credential() {
    let err = UtrClient::new(&UtrSettings {
        base_url: "http://127.0.0.1:1".to_string(),
        jwt: None,
    })
    .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<LineupError>(),
        Some(LineupError::MissingCredential { .. })
    ));
}

#[tokio::test]
async fn test_player_endpoint_proxies_stand_in() {
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    let api = ProfileApiStandIn::start(StatusCode::OK).await;
    let mut config = AppConfig::default();
    config.utr = api.settings("page-token");
    let state = Arc::new(AppState::new(config).unwrap());

    let response = create_router(state)
        .oneshot(
            Request::builder()
                .uri("/players/777")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let profile: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(profile["id"], "777");
    assert_eq!(
        api.requests()[0].cookie.as_deref(),
        Some("jwt=page-token;")
    );
}

#[tokio::test]
async fn test_player_endpoint_encoded_slash_stays_in_segment() {
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    let api = ProfileApiStandIn::start(StatusCode::OK).await;
    let mut config = AppConfig::default();
    config.utr = api.settings("page-token");
    let state = Arc::new(AppState::new(config).unwrap());

    let response = create_router(state)
        .oneshot(
            Request::builder()
                .uri("/players/..%2F..%2Fadmin")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let requests = api.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].player_id, "../../admin");
    assert!(requests[0].path.starts_with("/v1/player/"));
    assert!(requests[0].path.ends_with("/profile"));
}
