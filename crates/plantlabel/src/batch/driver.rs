//! Sequential batch driver.

use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use super::report::{BatchReport, RecordOutcome, RecordStatus};
use crate::params::{RenderConfig, RenderParameterSet, derive};
use crate::record::PlantRecord;
use crate::render::{OutputNamer, RenderJob, Renderer};

/// Extension of rendered model files.
pub const MODEL_EXTENSION: &str = "stl";

/// A record paired with everything needed to render it.
#[derive(Debug, Clone, Serialize)]
pub struct LabelJob {
    pub record: PlantRecord,
    /// File stem, unique within the batch.
    pub name: String,
    pub params: RenderParameterSet,
    pub output_path: PathBuf,
}

/// Derive parameters and output paths for every record, in order.
pub fn plan_jobs(records: &[PlantRecord], config: &RenderConfig, output_dir: &Path) -> Vec<LabelJob> {
    let mut namer = OutputNamer::new();
    records
        .iter()
        .map(|record| {
            let name = namer.name_for(record);
            let output_path = output_dir.join(format!("{}.{}", name, MODEL_EXTENSION));
            LabelJob {
                record: record.clone(),
                name,
                params: derive(record, config),
                output_path,
            }
        })
        .collect()
}

/// Progress notifications from [`BatchRunner::run`].
#[derive(Debug)]
pub enum BatchEvent<'a> {
    /// A job is about to be rendered. `index` is 0-based.
    Started {
        index: usize,
        total: usize,
        job: &'a LabelJob,
    },
    /// A job finished, successfully or not.
    Finished {
        index: usize,
        total: usize,
        outcome: &'a RecordOutcome,
    },
}

/// Renders jobs one at a time, isolating failures.
pub struct BatchRunner<R> {
    renderer: R,
}

impl<R: Renderer> BatchRunner<R> {
    pub fn new(renderer: R) -> Self {
        Self { renderer }
    }

    /// Render every job in order. A failed job never stops the ones after it.
    pub fn run<F>(&self, jobs: &[LabelJob], output_dir: &Path, mut on_event: F) -> BatchReport
    where
        F: FnMut(BatchEvent<'_>),
    {
        let started_at = Utc::now();
        let total = jobs.len();
        let mut outcomes = Vec::with_capacity(total);

        for (index, job) in jobs.iter().enumerate() {
            on_event(BatchEvent::Started { index, total, job });

            let outcome = self.render_one(job);
            on_event(BatchEvent::Finished {
                index,
                total,
                outcome: &outcome,
            });
            outcomes.push(outcome);
        }

        let succeeded = outcomes.iter().filter(|o| o.is_rendered()).count();
        let failed = outcomes.len() - succeeded;
        info!(total, succeeded, failed, "batch complete");

        BatchReport {
            source: None,
            output_dir: output_dir.to_path_buf(),
            started_at,
            finished_at: Utc::now(),
            total,
            succeeded,
            failed,
            warnings: Vec::new(),
            outcomes,
        }
    }

    fn render_one(&self, job: &LabelJob) -> RecordOutcome {
        let started = Instant::now();
        let result = self.renderer.render(&RenderJob {
            name: &job.name,
            params: &job.params,
            output_path: &job.output_path,
        });
        let duration_ms = started.elapsed().as_millis() as u64;

        let (status, error, stderr) = match result {
            Ok(output) => {
                info!(
                    row = job.record.row,
                    path = %output.output_path.display(),
                    "rendered label"
                );
                (RecordStatus::Rendered, None, None)
            }
            Err(e) => {
                warn!(row = job.record.row, label = %job.name, error = %e, "label failed");
                let stderr = e.stderr().map(|s| s.trim().to_string());
                (RecordStatus::Failed, Some(e.to_string()), stderr)
            }
        };

        RecordOutcome {
            row: job.record.row,
            common_name: job.record.common_name.clone(),
            name: job.name.clone(),
            output_path: job.output_path.clone(),
            status,
            error,
            stderr,
            duration_ms,
        }
    }
}
