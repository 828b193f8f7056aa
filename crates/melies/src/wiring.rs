//! Assembling the production repair loop from configuration.

use melies_core::{CredentialPool, MeliesConfig};
use melies_error::MeliesResult;
use melies_models::GeminiClient;
use melies_pipeline::{PromptSet, PromptedGenerator, RepairLoop};
use melies_render::ManimRenderer;
use std::sync::Arc;
use tracing::{info, warn};

/// Build the repair loop, reading credentials from the configured variable.
///
/// # Errors
///
/// Returns an error if the credential variable is unset or empty, or if the
/// configured scene base is unusable.
pub fn build_repair_loop(config: &MeliesConfig) -> MeliesResult<RepairLoop> {
    let pool = config.generation().credential_pool_from_env()?;
    build_repair_loop_with_pool(config, pool)
}

/// Build the repair loop with an already resolved credential pool.
///
/// A missing renderer executable is logged but not fatal; each attempt will
/// report it until it is installed.
pub fn build_repair_loop_with_pool(
    config: &MeliesConfig,
    pool: CredentialPool,
) -> MeliesResult<RepairLoop> {
    info!(
        model = %config.generation().model(),
        keys = pool.len(),
        selection = %config.generation().selection(),
        "Configuring script generator"
    );
    let client = GeminiClient::from_settings(config.generation(), pool);
    let generator = PromptedGenerator::new(client, PromptSet::from_overrides(config.prompts()))
        .with_settings(config.generation());

    let renderer = ManimRenderer::from_settings(config.render());
    match renderer.locate() {
        Ok(path) => info!(renderer = %path.display(), "Found renderer"),
        Err(e) => warn!(error = %e.diagnostic(), "Renderer not available"),
    }

    Ok(RepairLoop::from_config(
        config,
        Arc::new(generator),
        Arc::new(renderer),
    )?)
}
