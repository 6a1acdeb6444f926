mod cli;
mod logging;

use std::{fs::read_to_string, process::ExitCode};

use anyhow::{Context, Result};
use clap::Parser;
use minidecaf::{check_source, render_diagnostic};
use tracing::{debug, info};

use crate::cli::Cli;
use crate::logging::init_logging;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(&cli);

    let source = read_to_string(&cli.file)
        .with_context(|| format!("failed to read {}", cli.file.display()))?;
    let file_name = cli
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| cli.file.display().to_string());

    debug!(file = %file_name, bytes = source.len(), "checking");

    let analysis = match check_source(&source, &file_name) {
        Ok(analysis) => analysis,
        Err(error) => {
            print!("{}", render_diagnostic(&error, &source, &file_name));
            return Ok(ExitCode::FAILURE);
        }
    };

    if cli.dump_ast {
        print!("{}", analysis.program);
    }

    for error in analysis.diagnostics.iter() {
        print!("{}", render_diagnostic(error, &source, &file_name));
    }

    if analysis.diagnostics.is_empty() {
        info!(file = %file_name, "no errors");
        Ok(ExitCode::SUCCESS)
    } else {
        info!(
            file = %file_name,
            errors = analysis.diagnostics.len(),
            "semantic errors found"
        );
        Ok(ExitCode::FAILURE)
    }
}
