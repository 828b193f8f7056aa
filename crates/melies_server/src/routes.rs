//! Request handlers.

use crate::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Json, Response},
};
use melies_core::RunOutcome;
use melies_script::WorkspaceGuard;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use tracing::{error, info, instrument, warn};

/// Body of a generate request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateBody {
    /// Topic to animate
    #[serde(default)]
    pub prompt: Option<String>,
}

impl GenerateBody {
    /// The prompt, if present and not blank.
    fn prompt(&self) -> Option<&str> {
        self.prompt
            .as_deref()
            .map(str::trim)
            .filter(|prompt| !prompt.is_empty())
    }
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

/// Run the repair loop and return the video.
#[instrument(skip_all)]
pub(crate) async fn generate(State(state): State<AppState>, body: Bytes) -> Response {
    let prompt = serde_json::from_slice::<GenerateBody>(&body)
        .ok()
        .and_then(|body| body.prompt().map(str::to_string));
    let Some(prompt) = prompt else {
        return error_response(StatusCode::BAD_REQUEST, "No prompt provided");
    };

    let repair_loop = state.repair_loop();
    // Files are removed even if the client disconnects and this future is dropped.
    let workspace = match repair_loop.create_workspace().await {
        Ok(workspace) => WorkspaceGuard::new(workspace),
        Err(e) => {
            error!(error = %e, "Failed to create request workspace");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, e.diagnostic());
        }
    };

    info!(request_id = %workspace.id(), "Generating video");
    let report = repair_loop.run(&workspace, &prompt).await;

    let response = match report.outcome() {
        RunOutcome::Succeeded { artifact } => match tokio::fs::read(artifact).await {
            Ok(video) => {
                let disposition = format!(
                    "attachment; filename=\"{}\"",
                    state.settings().download_name()
                );
                (
                    StatusCode::OK,
                    [
                        (header::CONTENT_TYPE, "video/mp4".to_string()),
                        (header::CONTENT_DISPOSITION, disposition),
                    ],
                    video,
                )
                    .into_response()
            }
            Err(e) => {
                error!(artifact = %artifact.display(), error = %e, "Failed to read rendered video");
                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to read rendered video: {}", e),
                )
            }
        },
        RunOutcome::Failed {
            attempts,
            last_error,
        } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": format!("Generation failed after {} attempts", attempts),
                "last_error": last_error,
            })),
        )
            .into_response(),
    };

    if let Err(e) = workspace.cleanup().await {
        warn!(error = %e, "Request files left behind");
    }
    response
}

/// Liveness probe with an artificial delay.
pub(crate) async fn wake_up(State(state): State<AppState>) -> impl IntoResponse {
    tokio::time::sleep(Duration::from_secs(*state.settings().wake_up_delay_secs())).await;
    (StatusCode::OK, Json(json!({ "msg": "ok" })))
}
