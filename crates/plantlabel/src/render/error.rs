//! Errors from a single renderer invocation.

use std::path::PathBuf;
use thiserror::Error;

/// Why one label failed to render. Never fatal for the batch.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Renderer binary not found.
    #[error("renderer '{}' not found; install OpenSCAD and make sure it is on PATH", binary.display())]
    NotFound { binary: PathBuf },

    /// The process could not be started.
    #[error("failed to start renderer '{}': {source}", binary.display())]
    Spawn {
        binary: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The renderer exited with a non-zero status.
    #[error("renderer exited with {}", code.map(|c| format!("status {}", c)).unwrap_or_else(|| "a signal".to_string()))]
    Failed { code: Option<i32>, stderr: String },

    /// The renderer did not finish in time and was killed.
    #[error("renderer timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// The renderer reported success but wrote nothing.
    #[error("renderer succeeded but '{}' was not written", path.display())]
    MissingOutput { path: PathBuf },

    /// Error writing the per-label model source or waiting on the process.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RenderError {
    /// Renderer diagnostics worth showing to the operator.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            RenderError::Failed { stderr, .. } if !stderr.trim().is_empty() => Some(stderr),
            _ => None,
        }
    }
}
