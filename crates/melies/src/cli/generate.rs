//! Local generation command handler.

use melies::{
    MeliesConfig, MeliesResult, RunReport, ScriptError, ScriptErrorKind, WorkspaceGuard,
    build_repair_loop,
};
use std::path::Path;

/// Handle the `generate` command
pub async fn generate_video(config: &MeliesConfig, prompt: &str, output: &Path) -> MeliesResult<()> {
    let repair_loop = build_repair_loop(config)?;
    let workspace = WorkspaceGuard::new(repair_loop.create_workspace().await?);

    let report = repair_loop.run(&workspace, prompt).await;
    print_history(&report);

    let copied = match report.artifact() {
        Some(artifact) => tokio::fs::copy(artifact, output).await.map(|_| ()).map_err(|e| {
            ScriptError::new(ScriptErrorKind::FileWrite(format!(
                "{}: {}",
                output.display(),
                e
            )))
        }),
        None => Ok(()),
    };

    if let Err(e) = workspace.cleanup().await {
        tracing::warn!(error = %e, "Request files left behind");
    }

    copied?;
    report.into_result()?;
    println!("Saved video to {}", output.display());
    Ok(())
}

fn print_history(report: &RunReport) {
    println!("{:-<80}", "");
    for record in report.attempts() {
        match record.failure() {
            None => println!("Attempt {}: {}", record.attempt(), record.outcome()),
            Some(kind) => {
                println!("Attempt {}: {} ({})", record.attempt(), record.outcome(), kind);
                for line in record.diagnostic().lines() {
                    println!("    {}", line);
                }
            }
        }
    }
    println!("{:-<80}", "");
}
