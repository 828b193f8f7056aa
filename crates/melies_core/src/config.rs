//! Layered configuration.
//!
//! The configuration system supports:
//! - Bundled defaults (include_str! from melies.toml)
//! - User overrides (~/.config/melies/melies.toml, then ./melies.toml)
//! - Environment overrides (`MELIES__SECTION__KEY`)
//!
//! Later sources take precedence over earlier ones.

use crate::{CredentialPool, RenderQuality, SelectionStrategy};
use config::{Config, Environment, File, FileFormat};
use melies_error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../melies.toml");

/// Text provider settings.
///
/// # Example
///
/// ```toml
/// [generation]
/// model = "gemini-2.0-flash"
/// credential_env = "GENAI_API_KEY"
/// selection = "round_robin"
/// temperature = 0.4
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(default)]
pub struct GenerationSettings {
    /// Provider model identifier
    model: String,
    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    /// Output token cap
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    /// Environment variable holding the comma-separated key list
    credential_env: String,
    /// Per-call key selection policy
    selection: SelectionStrategy,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: "gemini-2.0-flash".to_string(),
            temperature: None,
            max_output_tokens: None,
            credential_env: "GENAI_API_KEY".to_string(),
            selection: SelectionStrategy::default(),
        }
    }
}

impl GenerationSettings {
    /// Resolve the credential pool from the configured environment variable.
    ///
    /// Call this once at start-up and hand the pool to the provider client.
    ///
    /// # Errors
    ///
    /// Returns an error if the variable is unset or holds no usable key.
    #[track_caller]
    pub fn credential_pool_from_env(&self) -> Result<CredentialPool, ConfigError> {
        let value = std::env::var(&self.credential_env).map_err(|_| {
            ConfigError::new(format!("{} environment variable not set", self.credential_env))
        })?;
        CredentialPool::from_env_value(&value)
    }
}

/// Renderer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(default)]
pub struct RenderSettings {
    /// Executable name looked up on `PATH`, or an explicit path
    executable: String,
    /// Quality tier
    quality: RenderQuality,
    /// Wall-clock budget for one render
    timeout_secs: u64,
    /// Base class a scene must derive from to be rendered
    scene_base: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            executable: "manim".to_string(),
            quality: RenderQuality::Low,
            timeout_secs: 300,
            scene_base: "VoiceoverScene".to_string(),
        }
    }
}

/// Repair loop settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(default)]
pub struct PipelineSettings {
    /// Maximum attempts per request
    max_attempts: u32,
    /// Root directory for per-request working files
    work_dir: PathBuf,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            work_dir: PathBuf::from("temp"),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(default)]
pub struct ServerSettings {
    /// Listen address
    bind: String,
    /// Origins allowed by CORS
    cors_origins: Vec<String>,
    /// Delay before the liveness probe answers
    wake_up_delay_secs: u64,
    /// Filename suggested for downloaded videos
    download_name: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:5000".to_string(),
            cors_origins: vec!["https://promptanimate.vercel.app".to_string()],
            wake_up_delay_secs: 2,
            download_name: "render.mp4".to_string(),
        }
    }
}

/// Replacement instruction text for the script generator.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, derive_getters::Getters)]
#[serde(default)]
pub struct PromptOverrides {
    /// Instructions used for first attempts
    #[serde(skip_serializing_if = "Option::is_none")]
    fresh: Option<String>,
    /// Instructions used for repair attempts
    #[serde(skip_serializing_if = "Option::is_none")]
    repair: Option<String>,
}

/// Top-level Méliès configuration.
///
/// # Example
///
/// ```no_run
/// use melies_core::MeliesConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = MeliesConfig::load()?;
/// println!("Max attempts: {}", config.pipeline().max_attempts());
/// # Ok(())
/// # }
/// ```
#[derive(
    Debug, Clone, PartialEq, Default, Serialize, Deserialize, derive_getters::Getters,
)]
#[serde(default)]
pub struct MeliesConfig {
    /// Text provider settings
    generation: GenerationSettings,
    /// Renderer settings
    render: RenderSettings,
    /// Repair loop settings
    pipeline: PipelineSettings,
    /// HTTP server settings
    server: ServerSettings,
    /// Optional prompt overrides
    prompts: PromptOverrides,
}

impl MeliesConfig {
    /// Load configuration with precedence: environment > current dir > home dir > bundled defaults.
    ///
    /// User config files are optional and silently skipped if not found.
    #[instrument]
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(None)
    }

    /// Load configuration, adding an explicit file above the user config files.
    ///
    /// # Errors
    ///
    /// Returns an error if the explicit file is missing, any source fails to
    /// parse, or the merged configuration is invalid.
    #[instrument]
    pub fn load_with(extra: Option<&Path>) -> Result<Self, ConfigError> {
        debug!("Loading configuration");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/melies/melies.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("melies").required(false));

        if let Some(path) = extra {
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(
            Environment::with_prefix("MELIES")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("server.cors_origins"),
        );

        let config: Self = builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a single file, without defaults or overrides.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config: Self = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                ))
            })?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns an error for a zero attempt budget, a zero render timeout, or a
    /// blank executable, model, or scene base.
    #[track_caller]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pipeline.max_attempts == 0 {
            return Err(ConfigError::for_key("pipeline.max_attempts", "must be at least 1"));
        }
        if self.render.timeout_secs == 0 {
            return Err(ConfigError::for_key("render.timeout_secs", "must be at least 1"));
        }
        if self.render.executable.trim().is_empty() {
            return Err(ConfigError::for_key("render.executable", "must not be empty"));
        }
        if self.render.scene_base.trim().is_empty() {
            return Err(ConfigError::for_key("render.scene_base", "must not be empty"));
        }
        if self.generation.model.trim().is_empty() {
            return Err(ConfigError::for_key("generation.model", "must not be empty"));
        }
        Ok(())
    }

    /// Override the attempt budget.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.pipeline.max_attempts = max_attempts;
        self
    }

    /// Override the working directory root.
    pub fn with_work_dir(mut self, work_dir: impl Into<PathBuf>) -> Self {
        self.pipeline.work_dir = work_dir.into();
        self
    }

    /// Override the listen address.
    pub fn with_bind(mut self, bind: impl Into<String>) -> Self {
        self.server.bind = bind.into();
        self
    }

    /// Override the wake-up delay.
    pub fn with_wake_up_delay_secs(mut self, secs: u64) -> Self {
        self.server.wake_up_delay_secs = secs;
        self
    }
}
