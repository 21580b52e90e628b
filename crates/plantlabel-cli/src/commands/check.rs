//! Check command - make sure OpenSCAD and the template are usable.

use std::path::PathBuf;

use colored::Colorize;
use plantlabel::OpenScadConfig;
use plantlabel::render::OpenScadRenderer;

pub fn run(
    openscad: PathBuf,
    template: PathBuf,
    _verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !template.exists() {
        return Err(format!("Template not found: {}", template.display()).into());
    }

    let renderer = OpenScadRenderer::new(OpenScadConfig {
        binary: openscad.clone(),
        template: template.clone(),
        ..Default::default()
    })?;
    let version = renderer.check_available()?;

    println!(
        "{} {} ({})",
        "Renderer".green().bold(),
        openscad.display().to_string().white(),
        version
    );
    println!(
        "{} {}",
        "Template".green().bold(),
        template.display().to_string().white()
    );
    Ok(())
}
