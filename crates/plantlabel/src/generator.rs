//! Main LabelGenerator struct and public API.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::batch::{BatchEvent, BatchReport, BatchRunner, LabelJob, plan_jobs};
use crate::error::{PlantLabelError, Result};
use crate::input::{Parser, ParserConfig, SourceMetadata};
use crate::params::RenderConfig;
use crate::render::{OpenScadConfig, OpenScadRenderer, Renderer};
use crate::validation::{DatasetValidator, ValidatedDataset, ValidationConfig};

/// Default directory for rendered labels.
pub const DEFAULT_OUTPUT_DIR: &str = "generated_labels";

/// Default plant list file.
pub const DEFAULT_PLANT_LIST: &str = "plant list.csv";

/// Configuration for a label generation run.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Row validation defaults.
    pub validation: ValidationConfig,
    /// Renderer parameter defaults with operator overrides applied.
    pub render: RenderConfig,
    /// OpenSCAD binary, template and timeout.
    pub renderer: OpenScadConfig,
    /// Where rendered labels are written.
    pub output_dir: PathBuf,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            validation: ValidationConfig::default(),
            render: RenderConfig::default(),
            renderer: OpenScadConfig::default(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

/// A parsed and validated plant list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlantList {
    /// Metadata about the source file.
    pub source: SourceMetadata,
    /// Valid records and non-fatal findings.
    pub dataset: ValidatedDataset,
}

impl PlantList {
    pub fn len(&self) -> usize {
        self.dataset.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dataset.records.is_empty()
    }
}

/// Reads plant lists and turns them into printable labels.
pub struct LabelGenerator {
    config: GeneratorConfig,
    parser: Parser,
    validator: DatasetValidator,
}

impl LabelGenerator {
    /// Create a generator with default configuration.
    pub fn new() -> Self {
        Self::with_config(GeneratorConfig::default())
    }

    pub fn with_config(config: GeneratorConfig) -> Self {
        let parser = Parser::with_config(config.parser.clone());
        let validator = DatasetValidator::new(config.validation.clone());

        Self {
            config,
            parser,
            validator,
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Parse and validate a plant list.
    ///
    /// Fails with a schema error when a required column is missing and with
    /// a dataset validation error carrying every row-level finding when any
    /// row is invalid.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<PlantList> {
        let path = path.as_ref();

        let (table, source) = self.parser.parse_file(path)?;
        let dataset = self.validator.validate(&table)?;
        info!(
            records = dataset.records.len(),
            duplicates = dataset.duplicates_removed,
            "plant list validated"
        );

        Ok(PlantList { source, dataset })
    }

    /// Derive the render jobs for a plant list without rendering anything.
    pub fn plan(&self, list: &PlantList) -> Vec<LabelJob> {
        plan_jobs(&list.dataset.records, &self.config.render, &self.config.output_dir)
    }

    /// Render every record of a plant list with the given renderer.
    ///
    /// Individual render failures are recorded in the report; only failing to
    /// create the output directory is an error.
    pub fn render_with<R, F>(&self, list: &PlantList, renderer: R, on_event: F) -> Result<BatchReport>
    where
        R: Renderer,
        F: FnMut(BatchEvent<'_>),
    {
        let output_dir = &self.config.output_dir;
        std::fs::create_dir_all(output_dir).map_err(|e| PlantLabelError::Io {
            path: output_dir.clone(),
            source: e,
        })?;

        let jobs = self.plan(list);
        let mut report = BatchRunner::new(renderer).run(&jobs, output_dir, on_event);
        report.source = Some(list.source.clone());
        report.warnings = list.dataset.warnings.clone();
        Ok(report)
    }

    /// Start the configured OpenSCAD renderer and check that it answers.
    pub fn renderer(&self) -> Result<(OpenScadRenderer, String)> {
        let renderer = OpenScadRenderer::new(self.config.renderer.clone())?;
        let version = renderer.check_available()?;
        info!(version = %version, "renderer available");
        Ok((renderer, version))
    }

    /// Load, validate and render a plant list with OpenSCAD.
    pub fn generate<F>(&self, path: impl AsRef<Path>, on_event: F) -> Result<BatchReport>
    where
        F: FnMut(BatchEvent<'_>),
    {
        let list = self.load(path)?;
        let (renderer, _) = self.renderer()?;

        let report = self.render_with(&list, &renderer, on_event)?;
        renderer.cleanup()?;
        Ok(report)
    }
}

impl Default for LabelGenerator {
    fn default() -> Self {
        Self::new()
    }
}
