//! Méliès CLI binary.
//!
//! - Serve the HTTP API
//! - Generate a single video from the command line
//! - Sanitize or inspect a generated script while debugging

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, generate_video, inspect_script, run_server, sanitize_script};

    // Credentials may live in a .env file next to the binary
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    melies::init_logging(
        &melies::LoggingConfig::default()
            .with_verbose(cli.verbose)
            .with_json(cli.log_json),
    )?;

    let config = melies::MeliesConfig::load_with(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve { bind } => {
            run_server(config, bind).await?;
        }

        Commands::Generate { prompt, output } => {
            generate_video(&config, &prompt, &output).await?;
        }

        Commands::Sanitize { file } => {
            sanitize_script(&file).await?;
        }

        Commands::Inspect { file, base } => {
            let base = base.unwrap_or_else(|| config.render().scene_base().clone());
            inspect_script(&file, &base).await?;
        }
    }

    Ok(())
}
