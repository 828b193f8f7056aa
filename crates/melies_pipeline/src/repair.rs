//! The bounded generate-validate-render-repair loop.

use melies_core::{
    AttemptFailure, AttemptRecord, GenerationRequest, MeliesConfig, PipelineState, RunOutcome,
    RunReport,
};
use melies_error::{ConfigError, ScriptError};
use melies_interface::{Renderer, ScriptGenerator};
use melies_script::{SceneInspector, ScriptWorkspace, sanitize_file};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Drives one request from prompt to rendered video.
///
/// Attempts run strictly one after another. After a failure the next
/// generation call receives the failed script and its diagnostic; only the
/// latest failure is passed on. The loop stops at the first success or after
/// `max_attempts` attempts.
///
/// # Example
///
/// ```no_run
/// use melies_core::{CredentialPool, MeliesConfig};
/// use melies_models::GeminiClient;
/// use melies_pipeline::{PromptSet, PromptedGenerator, RepairLoop};
/// use melies_render::ManimRenderer;
/// use std::sync::Arc;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = MeliesConfig::load()?;
/// let pool = config.generation().credential_pool_from_env()?;
/// let generator = PromptedGenerator::new(
///     GeminiClient::from_settings(config.generation(), pool),
///     PromptSet::from_overrides(config.prompts()),
/// );
/// let renderer = ManimRenderer::from_settings(config.render());
/// let repair_loop = RepairLoop::from_config(&config, Arc::new(generator), Arc::new(renderer))?;
///
/// let workspace = repair_loop.create_workspace().await?;
/// let report = repair_loop.run(&workspace, "the Pythagorean theorem").await;
/// println!("{} attempts", report.attempt_count());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct RepairLoop {
    generator: Arc<dyn ScriptGenerator>,
    renderer: Arc<dyn Renderer>,
    inspector: SceneInspector,
    work_dir: PathBuf,
    max_attempts: u32,
}

impl std::fmt::Debug for RepairLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepairLoop")
            .field("scene_base", &self.inspector.base())
            .field("work_dir", &self.work_dir)
            .field("max_attempts", &self.max_attempts)
            .finish_non_exhaustive()
    }
}

impl RepairLoop {
    /// Create a loop with three attempts and `temp` as the working root.
    pub fn new(
        generator: Arc<dyn ScriptGenerator>,
        renderer: Arc<dyn Renderer>,
        inspector: SceneInspector,
    ) -> Self {
        Self {
            generator,
            renderer,
            inspector,
            work_dir: PathBuf::from("temp"),
            max_attempts: 3,
        }
    }

    /// Create a loop from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured scene base is unusable.
    pub fn from_config(
        config: &MeliesConfig,
        generator: Arc<dyn ScriptGenerator>,
        renderer: Arc<dyn Renderer>,
    ) -> Result<Self, ConfigError> {
        let inspector = SceneInspector::new(config.render().scene_base())?;
        Ok(Self::new(generator, renderer, inspector)
            .with_work_dir(config.pipeline().work_dir().clone())
            .with_max_attempts(*config.pipeline().max_attempts()))
    }

    /// Set the root under which per-request directories are created.
    pub fn with_work_dir(mut self, work_dir: impl Into<PathBuf>) -> Self {
        self.work_dir = work_dir.into();
        self
    }

    /// Set the attempt budget. Values below one are raised to one.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Attempt budget.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Working root.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Create a fresh working directory for one request.
    pub async fn create_workspace(&self) -> Result<ScriptWorkspace, ScriptError> {
        ScriptWorkspace::create(&self.work_dir).await
    }

    /// Run the loop for `prompt`, keeping all files inside `workspace`.
    ///
    /// Never fails: every stage error is captured in the report. On success
    /// the artifact lives inside the workspace, so read or move it before
    /// cleaning the workspace up.
    #[instrument(skip(self, workspace, prompt), fields(request_id = %workspace.id(), max_attempts = self.max_attempts))]
    pub async fn run(&self, workspace: &ScriptWorkspace, prompt: &str) -> RunReport {
        let mut records = Vec::with_capacity(self.max_attempts as usize);
        let mut prior_script: Option<String> = None;
        let mut prior_error: Option<String> = None;
        self.transition(0, PipelineState::Idle);

        for attempt in 1..=self.max_attempts {
            let request =
                GenerationRequest::with_context(prompt, prior_script.clone(), prior_error.clone());
            let mut snapshot = None;

            match self.attempt(workspace, attempt, &request, &mut snapshot).await {
                Ok(artifact) => {
                    self.transition(attempt, PipelineState::Succeeded);
                    info!(attempt, artifact = %artifact.display(), "Attempt succeeded");
                    records.push(AttemptRecord::success(attempt, snapshot, artifact.clone()));
                    return RunReport::new(RunOutcome::Succeeded { artifact }, records);
                }
                Err(failure) => {
                    let diagnostic = failure.diagnostic();
                    warn!(
                        attempt,
                        failure = %failure.kind(),
                        diagnostic = %diagnostic,
                        "Attempt failed"
                    );
                    records.push(AttemptRecord::failed(attempt, &failure, snapshot.clone()));
                    prior_error = Some(diagnostic);
                    // Without a new script, the previous snapshot stays current
                    if snapshot.is_some() {
                        prior_script = snapshot;
                    }
                }
            }
        }

        self.transition(self.max_attempts, PipelineState::Failed);
        let last_error = prior_error.unwrap_or_default();
        warn!(attempts = self.max_attempts, last_error = %last_error, "All attempts failed");
        RunReport::new(
            RunOutcome::Failed {
                attempts: self.max_attempts,
                last_error,
            },
            records,
        )
    }

    /// One pass through generate, sanitize, inspect and render.
    ///
    /// `snapshot` holds the script text most recently written to disk.
    async fn attempt(
        &self,
        workspace: &ScriptWorkspace,
        attempt: u32,
        request: &GenerationRequest,
        snapshot: &mut Option<String>,
    ) -> Result<PathBuf, AttemptFailure> {
        self.transition(attempt, PipelineState::Generating);
        let raw = self.generator.generate(request).await?;
        let path = workspace.write_attempt(attempt, &raw).await?;
        *snapshot = Some(raw);

        self.transition(attempt, PipelineState::Sanitizing);
        let script = sanitize_file(&path).await?;
        *snapshot = Some(script.clone());

        self.transition(attempt, PipelineState::Inspecting);
        let entry_point = self.inspector.find_entry_point(&script)?;
        debug!(attempt, entry_point = %entry_point, "Found entry point");

        self.transition(attempt, PipelineState::Rendering);
        let artifact = self
            .renderer
            .render(&path, &entry_point, workspace.dir())
            .await?;
        Ok(artifact)
    }

    fn transition(&self, attempt: u32, state: PipelineState) {
        debug!(attempt, state = %state, "Pipeline state");
    }
}
