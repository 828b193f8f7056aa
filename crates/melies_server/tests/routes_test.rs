//! HTTP tests driving the router with `oneshot`.

mod test_utils;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use test_utils::{
    FixedGenerator, StalledRenderer, StubRenderer, VALID_SCRIPT, VIDEO_BYTES, body_bytes, body_json,
    build_test_app, get, post_json, test_config,
};
use tower::ServiceExt;

#[tokio::test]
async fn test_generate_returns_video_attachment() {
    let temp_dir = TempDir::new().unwrap();
    let config = test_config(temp_dir.path());
    let app = build_test_app(
        &config,
        Arc::new(FixedGenerator::new(VALID_SCRIPT)),
        Arc::new(StubRenderer::succeeding()),
    );

    let response = post_json(app, "/generate", r#"{"prompt": "binary search"}"#).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "video/mp4");
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"render.mp4\""
    );
    assert_eq!(body_bytes(response).await, VIDEO_BYTES);

    // Request files are removed once the video has been read
    assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_abandoned_request_removes_its_files() {
    let temp_dir = TempDir::new().unwrap();
    let config = test_config(temp_dir.path());
    let generator = Arc::new(FixedGenerator::new(VALID_SCRIPT));
    let app = build_test_app(&config, generator.clone(), Arc::new(StalledRenderer));

    // The client gives up while the render is still running
    let abandoned = tokio::time::timeout(
        Duration::from_millis(200),
        post_json(app, "/generate", r#"{"prompt": "slow topic"}"#),
    )
    .await;
    assert!(abandoned.is_err());
    assert_eq!(generator.call_count(), 1);

    let mut remaining = usize::MAX;
    for _ in 0..100 {
        remaining = std::fs::read_dir(temp_dir.path()).unwrap().count();
        if remaining == 0 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(remaining, 0);
}

#[tokio::test]
async fn test_missing_prompt_is_bad_request() {
    let temp_dir = TempDir::new().unwrap();
    let config = test_config(temp_dir.path());
    let generator = Arc::new(FixedGenerator::new(VALID_SCRIPT));

    for body in ["{}", r#"{"prompt": ""}"#, r#"{"prompt": "   "}"#, "not json", ""] {
        let app = build_test_app(&config, generator.clone(), Arc::new(StubRenderer::succeeding()));
        let response = post_json(app, "/generate", body).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body {:?}", body);
        let json = body_json(response).await;
        assert_eq!(json["error"], "No prompt provided");
    }
    assert_eq!(generator.call_count(), 0);
}

#[tokio::test]
async fn test_exhaustion_is_server_error_with_last_error() {
    let temp_dir = TempDir::new().unwrap();
    let config = test_config(temp_dir.path());
    let generator = Arc::new(FixedGenerator::new(VALID_SCRIPT));
    let app = build_test_app(
        &config,
        generator.clone(),
        Arc::new(StubRenderer::failing(
            "Traceback (most recent call last): ZeroDivisionError",
        )),
    );

    let response = post_json(app, "/generate", r#"{"prompt": "division"}"#).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Generation failed after 3 attempts");
    assert!(
        json["last_error"]
            .as_str()
            .unwrap()
            .contains("ZeroDivisionError")
    );
    assert_eq!(generator.call_count(), 3);
    assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_wake_up() {
    let temp_dir = TempDir::new().unwrap();
    let config = test_config(temp_dir.path());
    let app = build_test_app(
        &config,
        Arc::new(FixedGenerator::new(VALID_SCRIPT)),
        Arc::new(StubRenderer::succeeding()),
    );

    let response = get(app, "/wake-up").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::json!({ "msg": "ok" }));
}

#[tokio::test(start_paused = true)]
async fn test_wake_up_waits_for_configured_delay() {
    let temp_dir = TempDir::new().unwrap();
    let config = test_config(temp_dir.path()).with_wake_up_delay_secs(2);
    let app = build_test_app(
        &config,
        Arc::new(FixedGenerator::new(VALID_SCRIPT)),
        Arc::new(StubRenderer::succeeding()),
    );

    let started = tokio::time::Instant::now();
    let response = get(app, "/wake-up").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(started.elapsed() >= std::time::Duration::from_secs(2));
}

#[tokio::test]
async fn test_cors_preflight_allows_configured_origin() {
    let temp_dir = TempDir::new().unwrap();
    let config = test_config(temp_dir.path());
    let app = build_test_app(
        &config,
        Arc::new(FixedGenerator::new(VALID_SCRIPT)),
        Arc::new(StubRenderer::succeeding()),
    );

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/generate")
                .header(header::ORIGIN, "http://localhost:5173")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let headers = response.headers();
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:5173"
    );
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let config = test_config(temp_dir.path());
    let app = build_test_app(
        &config,
        Arc::new(FixedGenerator::new(VALID_SCRIPT)),
        Arc::new(StubRenderer::succeeding()),
    );

    let response = get(app, "/render").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[test]
fn test_invalid_cors_origin_is_configuration_error() {
    let settings: melies_core::ServerSettings = serde_json::from_value(serde_json::json!({
        "cors_origins": ["bad\norigin"]
    }))
    .unwrap();
    let err = melies_server::build_cors_layer(&settings).unwrap_err();
    assert!(matches!(
        err.kind,
        melies_error::ServerErrorKind::Configuration(_)
    ));
}
