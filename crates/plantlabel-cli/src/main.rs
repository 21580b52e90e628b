//! plantlabel CLI - batch generator for 3D printable plant labels.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Generate {
            input,
            template,
            output_dir,
            openscad,
            timeout,
            emit_scad,
            keep_scad,
            report,
            overrides,
        } => commands::generate::run(
            input,
            commands::generate::GenerateOptions {
                template,
                output_dir,
                openscad,
                timeout,
                emit_scad,
                keep_scad,
                report,
            },
            overrides,
            cli.verbose,
        ),

        Commands::Validate { input, json } => commands::validate::run(input, json, cli.verbose),

        Commands::Plan {
            input,
            output_dir,
            overrides,
        } => commands::plan::run(input, output_dir, overrides, cli.verbose),

        Commands::Check { openscad, template } => {
            commands::check::run(openscad, template, cli.verbose)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
