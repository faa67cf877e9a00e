use crate::gateway::{
    LeaderboardEntry, ListedEmoji, http_span, router,
    testing::{FailingVotes, InMemoryBackend},
};
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use core::time::Duration;
use emojivoto_core::tally::{EMOJI, FaultConfig, Tally};
use serde::de::DeserializeOwned;
use tonic::Code;
use tower::ServiceExt;
use tower_http::trace::TraceLayer;

async fn get(app: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let resp = app
        .clone()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

async fn get_json<T: DeserializeOwned>(app: &Router, uri: &str) -> T {
    let (status, body) = get(app, uri).await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn list_returns_catalog() {
    let app = router(InMemoryBackend::default());
    let list: Vec<ListedEmoji> = get_json(&app, "/api/list").await;
    assert_eq!(list.len(), EMOJI.len());
    assert_eq!(list[0].shortcode, EMOJI[0].shortcode);
    assert_eq!(list[0].unicode, EMOJI[0].unicode);
}

#[tokio::test]
async fn vote_then_leaderboard() {
    let backend = InMemoryBackend::default();
    let app = router(backend.clone());

    for _ in 0..3 {
        let (status, _) = get(&app, "/api/vote?choice=:doughnut:").await;
        assert_eq!(status, StatusCode::OK);
    }
    let (status, _) = get(&app, "/api/vote?choice=%3Aheart%3A").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(backend.store().total_votes(), 4);

    let board: Vec<LeaderboardEntry> = get_json(&app, "/api/leaderboard").await;
    assert_eq!(
        board,
        vec![
            LeaderboardEntry {
                shortcode: ":doughnut:".into(),
                unicode: "🍩".into(),
                votes: 3,
                share: 0.75,
            },
            LeaderboardEntry {
                shortcode: ":heart:".into(),
                unicode: "❤️".into(),
                votes: 1,
                share: 0.25,
            },
        ]
    );
}

#[tokio::test]
async fn missing_choice_is_bad_request() {
    let backend = InMemoryBackend::default();
    let app = router(backend.clone());
    for uri in ["/api/vote", "/api/vote?choice="] {
        let (status, _) = get(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
    }
    assert!(backend.store().is_empty());
}

#[tokio::test]
async fn unknown_choice_is_not_found() {
    let backend = InMemoryBackend::default();
    let app = router(backend.clone());
    let (status, body) = get(&app, "/api/vote?choice=:not-an-emoji:").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(String::from_utf8(body).unwrap().contains(":not-an-emoji:"));
    assert!(backend.store().is_empty());
}

#[tokio::test]
async fn injected_failure_is_service_unavailable() {
    let backend = InMemoryBackend::new(FaultConfig::new(1.0, Duration::ZERO));
    let app = router(backend.clone());

    let (status, _) = get(&app, "/api/vote?choice=:doughnut:").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    let (status, _) = get(&app, "/api/leaderboard").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(backend.store().results().is_empty());
}

#[tokio::test]
async fn other_backend_errors_are_bad_gateway() {
    let app = router(FailingVotes::new(Code::Internal));
    let (status, _) = get(&app, "/api/vote?choice=:doughnut:").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);

    let app = router(FailingVotes::new(Code::InvalidArgument));
    let (status, _) = get(&app, "/api/vote?choice=:doughnut:").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn leaderboard_starts_empty() {
    let app = router(InMemoryBackend::default());
    let board: Vec<LeaderboardEntry> = get_json(&app, "/api/leaderboard").await;
    assert!(board.is_empty());
}

#[tokio::test]
async fn healthz_is_ok() {
    let app = router(InMemoryBackend::default());
    let (status, body) = get(&app, "/healthz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"ok");
}

#[tokio::test]
async fn traced_request_with_caller_context() {
    let backend = InMemoryBackend::default();
    let app =
        router(backend.clone()).layer(TraceLayer::new_for_http().make_span_with(http_span));
    let req = Request::get("/api/vote?choice=:doughnut:")
        .header(
            "traceparent",
            "00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01",
        )
        .body(Body::empty())
        .unwrap();

    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(backend.store().total_votes(), 1);
}
