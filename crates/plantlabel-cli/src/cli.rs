//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// plantlabel: batch generator for 3D printable plant labels
#[derive(Parser)]
#[command(name = "plantlabel")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a plant list and render one STL label per plant
    Generate {
        #[command(flatten)]
        input: InputArgs,

        /// OpenSCAD label template
        #[arg(long, default_value = "Enhanced Plant Labeler.scad")]
        template: PathBuf,

        /// Directory for the rendered labels
        #[arg(short, long, default_value = plantlabel::DEFAULT_OUTPUT_DIR)]
        output_dir: PathBuf,

        /// OpenSCAD executable
        #[arg(long, default_value = "openscad")]
        openscad: PathBuf,

        /// Seconds allowed per label before the renderer is killed
        #[arg(long, default_value = "120")]
        timeout: u64,

        /// Write a per-label copy of the template into DIR instead of passing -D definitions
        #[arg(long, value_name = "DIR")]
        emit_scad: Option<PathBuf>,

        /// Keep the per-label templates after the run
        #[arg(long, requires = "emit_scad")]
        keep_scad: bool,

        /// Save a JSON run report
        #[arg(long, value_name = "FILE")]
        report: Option<PathBuf>,

        #[command(flatten)]
        overrides: OverrideArgs,
    },

    /// Check a plant list without rendering
    Validate {
        #[command(flatten)]
        input: InputArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the renderer parameters of every label as JSON
    Plan {
        #[command(flatten)]
        input: InputArgs,

        /// Directory the labels would be written to
        #[arg(short, long, default_value = plantlabel::DEFAULT_OUTPUT_DIR)]
        output_dir: PathBuf,

        #[command(flatten)]
        overrides: OverrideArgs,
    },

    /// Check that OpenSCAD can be run
    Check {
        /// OpenSCAD executable
        #[arg(long, default_value = "openscad")]
        openscad: PathBuf,

        /// OpenSCAD label template
        #[arg(long, default_value = "Enhanced Plant Labeler.scad")]
        template: PathBuf,
    },
}

/// Where the plant list comes from.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Plant list (CSV/TSV)
    #[arg(long, value_name = "FILE", default_value = plantlabel::DEFAULT_PLANT_LIST)]
    pub csv: PathBuf,

    /// Field delimiter (detected when omitted; use "tab" or "\t" for TSV)
    #[arg(short, long)]
    pub delimiter: Option<String>,
}

/// Global label settings applied to every label.
#[derive(Args, Debug, Clone, Default)]
pub struct OverrideArgs {
    /// Width in mm for plants without a Width value
    #[arg(long, help_heading = "Label settings")]
    pub label_width: Option<f64>,

    /// Height in mm for plants without a Height value
    #[arg(long, help_heading = "Label settings")]
    pub label_height: Option<f64>,

    /// Label thickness in mm
    #[arg(long, help_heading = "Label settings")]
    pub label_thickness: Option<f64>,

    /// Corner radius in mm
    #[arg(long, help_heading = "Label settings")]
    pub corner_radius: Option<f64>,

    /// Depth of raised text in mm
    #[arg(long, help_heading = "Label settings")]
    pub text_depth: Option<f64>,

    /// Font size of the plant name
    #[arg(long, help_heading = "Label settings")]
    pub plant_name_size: Option<f64>,

    /// Font size of the scientific name
    #[arg(long, help_heading = "Label settings")]
    pub scientific_name_size: Option<f64>,

    /// Font size of the nickname
    #[arg(long, help_heading = "Label settings")]
    pub nickname_size: Option<f64>,

    /// Scale factor for the care symbols
    #[arg(long, help_heading = "Label settings")]
    pub symbol_size: Option<f64>,

    /// Leave the scientific name off
    #[arg(long, help_heading = "Label settings")]
    pub hide_scientific_name: bool,

    /// Leave the nickname off
    #[arg(long, help_heading = "Label settings")]
    pub hide_nickname: bool,

    /// Leave the water/light symbols off
    #[arg(long, help_heading = "Label settings")]
    pub hide_care_symbols: bool,

    /// Render without the raised frame
    #[arg(long, help_heading = "Label settings")]
    pub no_frame: bool,

    /// Frame width in mm
    #[arg(long, help_heading = "Label settings")]
    pub frame_width: Option<f64>,

    /// Spike length in mm
    #[arg(long, help_heading = "Label settings")]
    pub spike_length: Option<f64>,

    /// Spike width in mm
    #[arg(long, help_heading = "Label settings")]
    pub spike_width: Option<f64>,

    /// Hanging hole diameter in mm
    #[arg(long, help_heading = "Label settings")]
    pub hole_diameter: Option<f64>,

    /// Font name, e.g. "Liberation Sans:style=Bold"
    #[arg(long, help_heading = "Label settings")]
    pub font: Option<String>,

    /// Set any template parameter (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE", help_heading = "Label settings")]
    pub set: Vec<String>,

    /// JSON file of parameter overrides
    #[arg(long, value_name = "FILE", help_heading = "Label settings")]
    pub params: Option<PathBuf>,
}
