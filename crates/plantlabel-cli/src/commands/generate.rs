//! Generate command - validate a plant list and render every label.

use std::path::PathBuf;
use std::time::Duration;

use colored::Colorize;
use plantlabel::render::ScadSource;
use plantlabel::{BatchEvent, LabelGenerator, OpenScadConfig, PlantLabelError};

use super::{generator_config, print_findings};
use crate::cli::{InputArgs, OverrideArgs};

pub struct GenerateOptions {
    pub template: PathBuf,
    pub output_dir: PathBuf,
    pub openscad: PathBuf,
    pub timeout: u64,
    pub emit_scad: Option<PathBuf>,
    pub keep_scad: bool,
    pub report: Option<PathBuf>,
}

pub fn run(
    input: InputArgs,
    options: GenerateOptions,
    overrides: OverrideArgs,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !input.csv.exists() {
        return Err(format!("Plant list not found: {}", input.csv.display()).into());
    }
    if !options.template.exists() {
        return Err(format!("Template not found: {}", options.template.display()).into());
    }
    if options.timeout == 0 {
        return Err("--timeout must be at least 1 second".into());
    }

    let mut config = generator_config(&input, &overrides, options.output_dir)?;
    config.renderer = OpenScadConfig {
        binary: options.openscad,
        template: options.template,
        timeout: Duration::from_secs(options.timeout),
        source: match options.emit_scad {
            Some(dir) => ScadSource::Materialized {
                dir,
                keep: options.keep_scad,
            },
            None => ScadSource::Definitions,
        },
    };
    let generator = LabelGenerator::with_config(config);

    println!(
        "{} {}",
        "Reading".cyan().bold(),
        input.csv.display().to_string().white()
    );

    let list = match generator.load(&input.csv) {
        Ok(list) => list,
        Err(e @ PlantLabelError::DatasetValidation { .. }) => {
            print_findings(e.findings());
            println!();
            return Err(format!("{}; no labels were generated", e).into());
        }
        Err(e) => return Err(e.into()),
    };

    let warnings: Vec<_> = list
        .dataset
        .warnings
        .iter()
        .filter(|w| verbose || w.severity != plantlabel::Severity::Info)
        .cloned()
        .collect();
    print_findings(&warnings);

    if list.is_empty() {
        return Err("Plant list contains no plants".into());
    }

    let (renderer, version) = generator.renderer()?;
    println!("{} {}", "Renderer".cyan().bold(), version.dimmed());
    println!(
        "Generating {} label(s) into {}",
        list.len().to_string().white().bold(),
        generator.config().output_dir.display().to_string().white()
    );
    println!();

    let report = generator.render_with(&list, &renderer, |event| match event {
        BatchEvent::Started { index, total, job } => {
            if verbose {
                println!(
                    "  [{}/{}] {} ({})",
                    index + 1,
                    total,
                    job.record.common_name,
                    job.name.dimmed()
                );
            }
        }
        BatchEvent::Finished {
            index,
            total,
            outcome,
        } => {
            let progress = format!("[{}/{}]", index + 1, total);
            if outcome.is_rendered() {
                println!(
                    "  {} {} {} {}",
                    progress.dimmed(),
                    "ok".green().bold(),
                    outcome.output_path.display(),
                    format!("({:.1}s)", outcome.duration_ms as f64 / 1000.0).dimmed()
                );
            } else {
                println!(
                    "  {} {} {}: {}",
                    progress.dimmed(),
                    "failed".red().bold(),
                    outcome.common_name,
                    outcome.error.as_deref().unwrap_or("unknown error")
                );
                if let Some(ref stderr) = outcome.stderr {
                    for line in stderr.lines() {
                        println!("      {}", line.dimmed());
                    }
                }
            }
        }
    })?;
    renderer.cleanup()?;

    println!();
    let summary = format!(
        "{} succeeded, {} failed, {} total",
        report.succeeded, report.failed, report.total
    );
    if report.failed == 0 {
        println!("{} {}", "Done:".green().bold(), summary);
    } else if report.is_success() {
        println!("{} {}", "Done:".yellow().bold(), summary);
    } else {
        println!("{} {}", "Failed:".red().bold(), summary);
    }

    if let Some(ref path) = options.report {
        report.save(path)?;
        println!(
            "{} {}",
            "Report saved to".green(),
            path.display().to_string().white()
        );
    }

    if !report.is_success() {
        return Err("No labels were generated".into());
    }

    Ok(())
}
