//! plantlabel: batch generator for 3D printable plant labels.
//!
//! A plant list (one plant per row, with care levels and mounting options) is
//! validated as a whole, each record is turned into a set of renderer
//! parameters, and OpenSCAD is run once per label to produce an STL file.
//!
//! # Pipeline
//!
//! - **Validate**: required columns are checked before any row; every row
//!   error is collected and a single bad row aborts the whole run.
//! - **Derive**: renderer defaults, operator overrides and record values are
//!   merged, with record values taking precedence.
//! - **Render**: labels are rendered one at a time; a failed label is
//!   reported and the batch moves on.
//!
//! # Example
//!
//! ```no_run
//! use plantlabel::LabelGenerator;
//!
//! let generator = LabelGenerator::new();
//! let report = generator.generate("plant list.csv", |_| {}).unwrap();
//!
//! println!("Rendered: {}/{}", report.succeeded, report.total);
//! ```

pub mod batch;
pub mod error;
pub mod input;
pub mod params;
pub mod record;
pub mod render;
pub mod validation;

mod generator;

pub use crate::generator::{
    DEFAULT_OUTPUT_DIR, DEFAULT_PLANT_LIST, GeneratorConfig, LabelGenerator, PlantList,
};
pub use batch::{BatchEvent, BatchReport, LabelJob, RecordOutcome, RecordStatus};
pub use error::{PlantLabelError, Result};
pub use input::{DataTable, SourceMetadata};
pub use params::{ParamValue, RenderConfig, RenderParameterSet};
pub use record::PlantRecord;
pub use render::{OpenScadConfig, RenderError, Renderer};
pub use validation::{Finding, FindingKind, Severity, ValidatedDataset};
