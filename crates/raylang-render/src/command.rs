use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Instant;

use raylang_core::hash::hash_document;
use raylang_core::{ContentHash, RaylangError, RaylangResult, RendererConfig};
use raylang_ir::codec;

use crate::renderer::{RenderOutcome, Renderer};

/// A wire document written to disk and ready for the renderer process.
#[derive(Debug, Clone, PartialEq)]
pub struct StagedScene {
    pub document: PathBuf,
    pub image: PathBuf,
    pub fingerprint: ContentHash,
}

/// Renderer that shells out to a ray tracer executable taking a scene
/// document path as its last argument.
#[derive(Debug, Clone)]
pub struct CommandRenderer {
    program: String,
    args: Vec<String>,
    staging_dir: PathBuf,
}

impl CommandRenderer {
    pub fn new(program: impl Into<String>, staging_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            staging_dir: staging_dir.into(),
        }
    }

    pub fn from_config(config: &RendererConfig) -> Self {
        Self {
            program: config.program.clone(),
            args: config.args.clone(),
            staging_dir: config.staging_dir.clone(),
        }
    }

    /// Arguments placed before the document path.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn staging_dir(&self) -> &Path {
        &self.staging_dir
    }

    /// Check if the renderer executable can be started.
    pub fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }
}

impl Renderer for CommandRenderer {
    type Handle = StagedScene;

    fn decode(&self, document: &[u8]) -> RaylangResult<StagedScene> {
        let scene = codec::decode(document)?;
        let fingerprint = hash_document(document);

        fs::create_dir_all(&self.staging_dir)?;
        let path = self
            .staging_dir
            .join(format!("scene-{}.json", fingerprint.short()));
        fs::write(&path, document)?;
        tracing::debug!("Staged scene document at {}", path.display());

        Ok(StagedScene {
            document: path,
            image: PathBuf::from(scene.image),
            fingerprint,
        })
    }

    fn render(&self, staged: StagedScene) -> RaylangResult<RenderOutcome> {
        let started = Instant::now();
        tracing::info!(
            "Running {} on {}",
            self.program,
            staged.document.display()
        );

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(&staged.document)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| {
                RaylangError::Render(format!("failed to start {}: {}", self.program, e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RaylangError::Render(format!(
                "{} failed with status {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        Ok(RenderOutcome {
            image: staged.image,
            fingerprint: staged.fingerprint,
            elapsed: started.elapsed(),
        })
    }
}
