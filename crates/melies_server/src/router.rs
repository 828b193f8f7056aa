//! Router assembly and the server loop.

use crate::{AppState, routes};
use axum::{
    Router,
    http::{
        HeaderValue, Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    routing::{get, post},
};
use melies_core::ServerSettings;
use melies_error::{ServerError, ServerErrorKind};
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info, instrument};

/// Build the application router with CORS and request tracing.
///
/// # Errors
///
/// Returns an error if a configured CORS origin is not a valid header value.
pub fn build_router(state: AppState) -> Result<Router, ServerError> {
    let cors = build_cors_layer(state.settings())?;

    Ok(Router::new()
        .route("/generate", post(routes::generate))
        .route("/wake-up", get(routes::wake_up))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state))
}

/// Build the CORS layer from server settings.
pub fn build_cors_layer(settings: &ServerSettings) -> Result<CorsLayer, ServerError> {
    let origins = settings
        .cors_origins()
        .iter()
        .map(|origin| {
            origin.parse::<HeaderValue>().map_err(|e| {
                ServerError::new(ServerErrorKind::Configuration(format!(
                    "Invalid CORS origin '{}': {}",
                    origin, e
                )))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true))
}

/// Bind the configured address and serve until Ctrl-C or SIGTERM.
#[instrument(skip(state), fields(bind = %state.settings().bind()))]
pub async fn serve(state: AppState) -> Result<(), ServerError> {
    let bind = state.settings().bind().clone();
    let app = build_router(state)?;

    let listener = tokio::net::TcpListener::bind(&bind).await.map_err(|e| {
        ServerError::new(ServerErrorKind::Bind {
            address: bind.clone(),
            message: e.to_string(),
        })
    })?;

    info!(address = %bind, "Listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServerError::new(ServerErrorKind::Serve(e.to_string())))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
