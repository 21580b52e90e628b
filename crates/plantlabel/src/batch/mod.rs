//! Batch rendering of validated records.

mod driver;
mod report;

pub use driver::{BatchEvent, BatchRunner, LabelJob, MODEL_EXTENSION, plan_jobs};
pub use report::{BatchReport, RecordOutcome, RecordStatus};
