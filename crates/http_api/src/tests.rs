use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::util::ServiceExt;

use stackly_app::{AppPaths, AppState, InferenceClient, InferenceConfig, ensure_app_data_dir};

use crate::HttpState;

fn test_state(dir: &tempfile::TempDir) -> HttpState {
    let paths = AppPaths::new(dir.path().to_path_buf());
    ensure_app_data_dir(&paths).expect("ensure app data dir");
    let app_state = AppState::new(paths.db_path, paths.tools_path);
    app_state.initialize().expect("initialize");
    let inference = InferenceClient::new(InferenceConfig::default()).expect("inference client");
    HttpState::new(app_state, Arc::new(inference))
}

#[tokio::test]
async fn health_responds_ok() {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = crate::router(test_state(&dir));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn analytics_requires_a_session() {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = crate::router(test_state(&dir));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/analytics?days=7")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_tool_is_not_found() {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = crate::router(test_state(&dir));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/tools/does-not-exist")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"input":"hello"}"#))
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn tool_invocation_requires_input() {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = crate::router(test_state(&dir));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/tools/text-summarizer")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"input":"   "}"#))
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn tool_invocation_without_api_key_is_an_upstream_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = crate::router(test_state(&dir));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/tools/text-summarizer")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"input":"hello"}"#))
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
