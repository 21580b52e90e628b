//! Plan command - show the renderer parameters each label would get.

use std::path::PathBuf;

use plantlabel::LabelGenerator;

use super::generator_config;
use crate::cli::{InputArgs, OverrideArgs};

pub fn run(
    input: InputArgs,
    output_dir: PathBuf,
    overrides: OverrideArgs,
    _verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !input.csv.exists() {
        return Err(format!("Plant list not found: {}", input.csv.display()).into());
    }

    let config = generator_config(&input, &overrides, output_dir)?;
    let generator = LabelGenerator::with_config(config);

    let list = generator.load(&input.csv)?;
    let jobs: Vec<_> = generator
        .plan(&list)
        .into_iter()
        .map(|job| {
            serde_json::json!({
                "row": job.record.row,
                "name": job.name,
                "output": job.output_path,
                "parameters": job.params,
            })
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&jobs)?);
    Ok(())
}
