//! `refinery apply` command - apply operation-history JSON to a project

use console::style;
use miette::{IntoDiagnostic, Result, WrapErr};
use std::fs;
use std::path::PathBuf;

use crate::cli::helpers::connect;
use crate::cli::GlobalOpts;

#[derive(clap::Args, Debug)]
pub struct ApplyArgs {
    /// Project name or id
    pub project: String,

    /// Operation-history JSON file (as extracted from the server's
    /// undo/redo history)
    pub operations: PathBuf,
}

pub fn run(args: ApplyArgs, global: &GlobalOpts) -> Result<()> {
    let client = connect(global);
    let project = client.open_project(&args.project).into_diagnostic()?;

    let operations = fs::read_to_string(&args.operations)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to read {}", args.operations.display()))?;

    // Reject malformed JSON before uploading
    serde_json::from_str::<serde_json::Value>(&operations)
        .into_diagnostic()
        .wrap_err_with(|| format!("{} is not valid JSON", args.operations.display()))?;

    project.apply_operations(&operations).into_diagnostic()?;

    if !global.quiet {
        println!(
            "{} Applied {} to project {}",
            style("✓").green(),
            args.operations.display(),
            style(&project.id).bold()
        );
    }
    Ok(())
}
