//! Test doubles for the repair loop.
//!
//! - [`ScriptedGenerator`] replays canned responses and records every request.
//! - [`ScriptedRenderer`] replays canned outcomes and records every call.
//! - [`RecordingProvider`] records provider requests for prompt assembly tests.

#![allow(dead_code)]

use async_trait::async_trait;
use melies_core::{EntryPoint, GenerationRequest};
use melies_error::{GenerationError, GenerationErrorKind, RenderError, RenderErrorKind};
use melies_interface::{CompletionRequest, Renderer, ScriptGenerator, TextProvider};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// A script the inspector accepts.
pub const VALID_SCRIPT: &str = "from manim import *\nfrom manim_voiceover import VoiceoverScene\n\nclass Intro(VoiceoverScene):\n    def construct(self):\n        self.wait(1)";

/// A script with no VoiceoverScene class.
pub const SCRIPT_WITHOUT_SCENE: &str = "from manim import *\n\nclass Intro(Scene):\n    def construct(self):\n        self.wait(1)";

/// The valid script wrapped in a fenced code block.
pub fn fenced(script: &str) -> String {
    format!("```python\n{}\n```", script)
}

/// Generator that replays a fixed sequence of responses.
///
/// Once the sequence runs out, the last response is repeated.
pub struct ScriptedGenerator {
    responses: Mutex<VecDeque<Result<String, GenerationError>>>,
    last: Mutex<Option<Result<String, GenerationError>>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedGenerator {
    /// Replay `responses` in order.
    pub fn new(responses: Vec<Result<String, GenerationError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            last: Mutex::new(None),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Always return `script`.
    pub fn always(script: impl Into<String>) -> Self {
        Self::new(vec![Ok(script.into())])
    }

    /// Always fail with an empty response.
    pub fn always_empty() -> Self {
        Self::new(vec![Err(GenerationError::new(
            GenerationErrorKind::EmptyResponse,
        ))])
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of generation calls.
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl ScriptGenerator for ScriptedGenerator {
    async fn generate(&self, req: &GenerationRequest) -> Result<String, GenerationError> {
        self.requests.lock().unwrap().push(req.clone());
        let next = self.responses.lock().unwrap().pop_front();
        let mut last = self.last.lock().unwrap();
        match next {
            Some(response) => {
                *last = Some(response.clone());
                response
            }
            None => last
                .clone()
                .expect("ScriptedGenerator needs at least one response"),
        }
    }
}

/// What a scripted render call does.
#[derive(Debug, Clone)]
pub enum RenderStep {
    /// Write a fake video where Manim would and return it
    Succeed,
    /// Fail with the given stderr text as diagnostic
    Fail(String),
    /// Report the executable as missing
    Unavailable,
    /// Exit cleanly without producing a video
    NoArtifact,
}

/// One recorded render call.
#[derive(Debug, Clone)]
pub struct RenderCall {
    pub script: PathBuf,
    pub script_text: String,
    pub entry_point: EntryPoint,
    pub output_dir: PathBuf,
}

/// Renderer that replays a fixed sequence of outcomes.
///
/// Once the sequence runs out, the last outcome is repeated.
pub struct ScriptedRenderer {
    steps: Mutex<VecDeque<RenderStep>>,
    last: Mutex<RenderStep>,
    calls: Mutex<Vec<RenderCall>>,
}

impl ScriptedRenderer {
    /// Replay `steps` in order.
    pub fn new(steps: Vec<RenderStep>) -> Self {
        let last = steps.last().cloned().unwrap_or(RenderStep::Succeed);
        Self {
            steps: Mutex::new(steps.into()),
            last: Mutex::new(last),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Always succeed.
    pub fn succeeding() -> Self {
        Self::new(vec![RenderStep::Succeed])
    }

    /// Always fail with `diagnostic`.
    pub fn failing(diagnostic: impl Into<String>) -> Self {
        Self::new(vec![RenderStep::Fail(diagnostic.into())])
    }

    /// Calls received so far.
    pub fn calls(&self) -> Vec<RenderCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Renderer for ScriptedRenderer {
    async fn render(
        &self,
        script: &Path,
        entry_point: &EntryPoint,
        output_dir: &Path,
    ) -> Result<PathBuf, RenderError> {
        let script_text = std::fs::read_to_string(script).unwrap_or_default();
        self.calls.lock().unwrap().push(RenderCall {
            script: script.to_path_buf(),
            script_text,
            entry_point: entry_point.clone(),
            output_dir: output_dir.to_path_buf(),
        });

        let step = self
            .steps
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.last.lock().unwrap().clone());

        match step {
            RenderStep::Succeed => {
                let stem = script.file_stem().unwrap().to_string_lossy().into_owned();
                let dir = output_dir.join("videos").join(stem).join("480p15");
                std::fs::create_dir_all(&dir).unwrap();
                let artifact = dir.join(format!("{}.mp4", entry_point));
                std::fs::write(&artifact, b"fake mp4").unwrap();
                Ok(artifact)
            }
            RenderStep::Fail(diagnostic) => Err(RenderError::new(RenderErrorKind::Failed {
                exit_code: Some(1),
                diagnostic,
            })),
            RenderStep::Unavailable => Err(RenderError::new(
                RenderErrorKind::RendererUnavailable("manim".to_string()),
            )),
            RenderStep::NoArtifact => Err(RenderError::new(RenderErrorKind::ArtifactMissing(
                output_dir.join("missing.mp4").display().to_string(),
            ))),
        }
    }
}

/// Provider that records requests and answers with fixed text.
pub struct RecordingProvider {
    response: String,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl RecordingProvider {
    /// Answer every call with `response`.
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextProvider for RecordingProvider {
    async fn complete(&self, req: &CompletionRequest) -> Result<String, GenerationError> {
        self.requests.lock().unwrap().push(req.clone());
        if self.response.is_empty() {
            return Err(GenerationError::new(GenerationErrorKind::EmptyResponse));
        }
        Ok(self.response.clone())
    }

    fn provider_name(&self) -> &'static str {
        "recording"
    }

    fn model_name(&self) -> &str {
        "recording-model"
    }
}
