//! The renderer seam.

use std::path::{Path, PathBuf};
use std::time::Duration;

use super::error::RenderError;
use crate::params::RenderParameterSet;

/// One label to render.
#[derive(Debug, Clone, Copy)]
pub struct RenderJob<'a> {
    /// Filesystem-safe label name.
    pub name: &'a str,
    pub params: &'a RenderParameterSet,
    /// Where the model file should be written.
    pub output_path: &'a Path,
}

/// What a successful render produced.
#[derive(Debug, Clone)]
pub struct RenderOutput {
    pub output_path: PathBuf,
    pub duration: Duration,
    /// Renderer diagnostics, kept even on success.
    pub stderr: String,
}

/// Turns a parameter set into a model file.
pub trait Renderer {
    /// Render one label. Blocks until the renderer finishes or gives up.
    fn render(&self, job: &RenderJob<'_>) -> Result<RenderOutput, RenderError>;
}

impl<R: Renderer + ?Sized> Renderer for &R {
    fn render(&self, job: &RenderJob<'_>) -> Result<RenderOutput, RenderError> {
        (**self).render(job)
    }
}
