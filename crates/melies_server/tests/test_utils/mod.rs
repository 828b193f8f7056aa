//! Test utilities for HTTP tests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use http_body_util::BodyExt;
use melies_core::{EntryPoint, GenerationRequest, MeliesConfig};
use melies_error::{GenerationError, RenderError, RenderErrorKind};
use melies_interface::{Renderer, ScriptGenerator};
use melies_pipeline::RepairLoop;
use melies_script::SceneInspector;
use melies_server::{AppState, build_router};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tower::ServiceExt;

pub const VALID_SCRIPT: &str =
    "```python\nclass Intro(VoiceoverScene):\n    def construct(self):\n        self.wait(1)\n```";

pub const VIDEO_BYTES: &[u8] = b"fake mp4 bytes";

/// Generator returning the same script every time.
pub struct FixedGenerator {
    script: String,
    calls: AtomicUsize,
}

impl FixedGenerator {
    pub fn new(script: impl Into<String>) -> Self {
        Self {
            script: script.into(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ScriptGenerator for FixedGenerator {
    async fn generate(&self, _req: &GenerationRequest) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.script.clone())
    }
}

/// Renderer that either writes [`VIDEO_BYTES`] or fails with a traceback.
pub struct StubRenderer {
    fail_with: Option<String>,
}

impl StubRenderer {
    pub fn succeeding() -> Self {
        Self { fail_with: None }
    }

    pub fn failing(diagnostic: impl Into<String>) -> Self {
        Self {
            fail_with: Some(diagnostic.into()),
        }
    }
}

#[async_trait]
impl Renderer for StubRenderer {
    async fn render(
        &self,
        _script: &Path,
        entry_point: &EntryPoint,
        output_dir: &Path,
    ) -> Result<PathBuf, RenderError> {
        if let Some(diagnostic) = &self.fail_with {
            return Err(RenderError::new(RenderErrorKind::Failed {
                exit_code: Some(1),
                diagnostic: diagnostic.clone(),
            }));
        }
        let artifact = output_dir.join(format!("{}.mp4", entry_point));
        std::fs::write(&artifact, VIDEO_BYTES).unwrap();
        Ok(artifact)
    }
}

/// Renderer that never finishes within a test's lifetime.
pub struct StalledRenderer;

#[async_trait]
impl Renderer for StalledRenderer {
    async fn render(
        &self,
        _script: &Path,
        _entry_point: &EntryPoint,
        _output_dir: &Path,
    ) -> Result<PathBuf, RenderError> {
        tokio::time::sleep(std::time::Duration::from_secs(60)).await;
        Err(RenderError::new(RenderErrorKind::TimedOut { seconds: 60 }))
    }
}

/// Config with no wake-up delay and a local test origin.
pub fn test_config(work_dir: &Path) -> MeliesConfig {
    let config: MeliesConfig = serde_json::from_value(serde_json::json!({
        "server": {
            "cors_origins": ["http://localhost:5173"],
            "wake_up_delay_secs": 0
        }
    }))
    .unwrap();
    config.with_work_dir(work_dir)
}

/// Router wired to the given doubles.
pub fn build_test_app(
    config: &MeliesConfig,
    generator: Arc<dyn ScriptGenerator>,
    renderer: Arc<dyn Renderer>,
) -> Router {
    let repair_loop = RepairLoop::new(
        generator,
        renderer,
        SceneInspector::new(config.render().scene_base()).unwrap(),
    )
    .with_work_dir(config.pipeline().work_dir().clone())
    .with_max_attempts(*config.pipeline().max_attempts());

    build_router(AppState::new(Arc::new(repair_loop), config.server().clone())).unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
