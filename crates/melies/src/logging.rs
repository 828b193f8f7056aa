//! Tracing subscriber set-up for the binary.

use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// How log output is filtered and formatted.
#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    verbose: bool,
    json: bool,
}

impl LoggingConfig {
    /// Raise the default level from `info` to `debug`.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Emit one JSON object per event.
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// Filter used when `RUST_LOG` is not set.
    pub fn default_directive(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

/// Install the global subscriber. Logs go to stderr.
///
/// `RUST_LOG` takes precedence over the verbosity flag.
pub fn init_logging(config: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.default_directive()))?;

    let fmt_layer = if config.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
