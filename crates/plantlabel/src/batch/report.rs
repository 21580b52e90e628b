//! Per-record outcomes and the batch summary.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PlantLabelError, Result};
use crate::input::SourceMetadata;
use crate::validation::Finding;

/// Whether one label made it to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    Rendered,
    Failed,
}

/// What happened to one record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordOutcome {
    /// 1-based data row of the record.
    pub row: usize,
    pub common_name: String,
    /// File stem used for the label.
    pub name: String,
    pub output_path: PathBuf,
    pub status: RecordStatus,
    /// Failure description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Renderer diagnostics from a failed run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stderr: Option<String>,
    pub duration_ms: u64,
}

impl RecordOutcome {
    pub fn is_rendered(&self) -> bool {
        self.status == RecordStatus::Rendered
    }
}

/// Summary of a whole run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceMetadata>,
    pub output_dir: PathBuf,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Records attempted.
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Non-fatal validation findings for the run.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub warnings: Vec<Finding>,
    pub outcomes: Vec<RecordOutcome>,
}

impl BatchReport {
    /// A run counts as successful when at least one label was rendered.
    pub fn is_success(&self) -> bool {
        self.succeeded > 0
    }

    /// Process exit code for this run.
    pub fn exit_code(&self) -> i32 {
        if self.is_success() { 0 } else { 1 }
    }

    pub fn failures(&self) -> impl Iterator<Item = &RecordOutcome> {
        self.outcomes.iter().filter(|o| !o.is_rendered())
    }

    /// Save the report as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| PlantLabelError::Io {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let file = File::create(path).map_err(|e| PlantLabelError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    /// Load a previously saved report.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| PlantLabelError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
    }
}
