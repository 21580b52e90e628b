//! CLI command implementations.

pub mod check;
pub mod generate;
pub mod plan;
pub mod validate;

use std::path::PathBuf;

use colored::Colorize;
use plantlabel::input::ParserConfig;
use plantlabel::params::RenderConfigBuilder;
use plantlabel::validation::ValidationConfig;
use plantlabel::{Finding, GeneratorConfig, ParamValue, RenderConfig, Severity};
use tracing::debug;

use crate::cli::{InputArgs, OverrideArgs};

/// Assemble the library configuration from command-line arguments.
///
/// Parameter files are applied first, then the dedicated flags, then `--set`.
pub fn generator_config(
    input: &InputArgs,
    overrides: &OverrideArgs,
    output_dir: PathBuf,
) -> Result<GeneratorConfig, Box<dyn std::error::Error>> {
    let mut parser = ParserConfig::default();
    if let Some(ref d) = input.delimiter {
        parser = parser.with_delimiter(d)?;
    }

    let mut validation = ValidationConfig::default();
    if let Some(width) = overrides.label_width {
        validation.default_width_mm = width;
    }
    if let Some(height) = overrides.label_height {
        validation.default_height_mm = height;
    }

    let render = render_config(overrides)?;
    debug!(
        output_dir = %output_dir.display(),
        default_width = validation.default_width_mm,
        default_height = validation.default_height_mm,
        parameters = render.base().len(),
        "assembled generator configuration"
    );

    Ok(GeneratorConfig {
        parser,
        validation,
        render,
        output_dir,
        ..Default::default()
    })
}

fn render_config(args: &OverrideArgs) -> Result<RenderConfig, Box<dyn std::error::Error>> {
    let mut builder = RenderConfig::builder();

    if let Some(ref path) = args.params {
        if !path.exists() {
            return Err(format!("Parameter file not found: {}", path.display()).into());
        }
        builder = builder.load_file(path)?;
    }

    let numbers = [
        ("label_thickness", args.label_thickness),
        ("corner_radius", args.corner_radius),
        ("text_depth", args.text_depth),
        ("plant_name_size", args.plant_name_size),
        ("scientific_name_size", args.scientific_name_size),
        ("nickname_size", args.nickname_size),
        ("symbol_size_multiplier", args.symbol_size),
        ("frame_width", args.frame_width),
        ("spike_length", args.spike_length),
        ("spike_width", args.spike_width),
        ("hole_diameter", args.hole_diameter),
    ];
    for (key, value) in numbers {
        if let Some(v) = value {
            builder = builder.set(key, ParamValue::Number(v));
        }
    }

    let hidden = [
        ("show_scientific_name", args.hide_scientific_name),
        ("show_nickname", args.hide_nickname),
        ("show_care_symbols", args.hide_care_symbols),
        ("frame_enabled", args.no_frame),
    ];
    for (key, off) in hidden {
        if off {
            builder = builder.set(key, ParamValue::Bool(false));
        }
    }

    if let Some(ref font) = args.font {
        builder = builder.set("font", ParamValue::Text(font.clone()));
    }

    builder = apply_assignments(builder, &args.set)?;
    Ok(builder.build()?)
}

fn apply_assignments(
    mut builder: RenderConfigBuilder,
    assignments: &[String],
) -> Result<RenderConfigBuilder, Box<dyn std::error::Error>> {
    for assignment in assignments {
        builder = builder.set_assignment(assignment)?;
    }
    Ok(builder)
}

/// Print findings, one per line, colored by severity.
pub fn print_findings(findings: &[Finding]) {
    for finding in findings {
        let tag = match finding.severity {
            Severity::Error => "error".red().bold(),
            Severity::Warning => "warning".yellow().bold(),
            Severity::Info => "note".blue(),
        };
        println!("  {}: {}", tag, finding);
    }
}
