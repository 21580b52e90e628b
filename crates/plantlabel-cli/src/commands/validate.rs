//! Validate command - check a plant list without rendering.

use colored::Colorize;
use plantlabel::{LabelGenerator, PlantLabelError, Severity};

use super::{generator_config, print_findings};
use crate::cli::{InputArgs, OverrideArgs};

pub fn run(input: InputArgs, json_output: bool, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !input.csv.exists() {
        return Err(format!("Plant list not found: {}", input.csv.display()).into());
    }

    let config = generator_config(&input, &OverrideArgs::default(), Default::default())?;
    let generator = LabelGenerator::with_config(config);

    match generator.load(&input.csv) {
        Ok(list) => {
            if json_output {
                let status = serde_json::json!({
                    "file": list.source.file,
                    "valid": true,
                    "rows_read": list.dataset.rows_read,
                    "records": list.dataset.records.len(),
                    "duplicates_removed": list.dataset.duplicates_removed,
                    "findings": list.dataset.warnings,
                });
                println!("{}", serde_json::to_string_pretty(&status)?);
                return Ok(());
            }

            println!(
                "{} {}",
                "Validated".green().bold(),
                input.csv.display().to_string().white()
            );
            println!(
                "  {} plant(s) from {} row(s), {} duplicate(s) removed",
                list.len().to_string().white().bold(),
                list.dataset.rows_read,
                list.dataset.duplicates_removed
            );

            let shown: Vec<_> = list
                .dataset
                .warnings
                .iter()
                .filter(|w| verbose || w.severity != Severity::Info)
                .cloned()
                .collect();
            if !shown.is_empty() {
                println!();
                print_findings(&shown);
            }

            if verbose {
                println!();
                for record in &list.dataset.records {
                    println!(
                        "  {:4} {:30} {:30} water {} light {}",
                        record.row,
                        record.common_name,
                        record.scientific_name.dimmed(),
                        record.water_level,
                        record.light_level
                    );
                }
            }
            Ok(())
        }
        Err(e @ PlantLabelError::DatasetValidation { .. }) => {
            if json_output {
                let status = serde_json::json!({
                    "file": input.csv.display().to_string(),
                    "valid": false,
                    "findings": e.findings(),
                });
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                println!(
                    "{} {}",
                    "Invalid".red().bold(),
                    input.csv.display().to_string().white()
                );
                print_findings(e.findings());
                println!();
            }
            Err(e.into())
        }
        Err(e) => Err(e.into()),
    }
}
