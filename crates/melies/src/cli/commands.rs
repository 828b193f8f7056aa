//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Méliès - turn a topic prompt into a narrated Manim video
#[derive(Parser, Debug)]
#[command(name = "melies")]
#[command(about = "Turn a topic prompt into a narrated Manim video", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Extra configuration file, applied above the user config files
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server
    Serve {
        /// Listen address, overriding server.bind
        #[arg(long)]
        bind: Option<String>,
    },

    /// Generate one video locally
    Generate {
        /// Topic to animate
        #[arg(long)]
        prompt: String,

        /// Where to copy the rendered video
        #[arg(long, default_value = "render.mp4")]
        output: PathBuf,
    },

    /// Strip code fences and backticks from a script file in place
    Sanitize {
        /// Script file
        file: PathBuf,
    },

    /// Print the scene class a script file would render
    Inspect {
        /// Script file
        file: PathBuf,

        /// Base class to look for, overriding render.scene_base
        #[arg(long)]
        base: Option<String>,
    },
}
