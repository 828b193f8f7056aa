//! HTTP server command handler.

use melies::{AppState, MeliesConfig, MeliesResult, build_repair_loop, serve};
use std::sync::Arc;

/// Handle the `serve` command
pub async fn run_server(config: MeliesConfig, bind: Option<String>) -> MeliesResult<()> {
    let config = match bind {
        Some(bind) => config.with_bind(bind),
        None => config,
    };

    tracing::info!(
        bind = %config.server().bind(),
        max_attempts = config.pipeline().max_attempts(),
        "Starting server"
    );

    let repair_loop = build_repair_loop(&config)?;
    let state = AppState::new(Arc::new(repair_loop), config.server().clone());
    serve(state).await?;
    Ok(())
}
