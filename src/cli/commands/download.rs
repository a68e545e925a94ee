//! `refinery download` command - fetch a file over HTTP
//!
//! Convenience for grabbing example datasets and operation-history files
//! referenced in documentation.

use console::style;
use miette::{miette, IntoDiagnostic, Result, WrapErr};
use std::fs;
use std::io::Read;
use std::path::PathBuf;

use crate::cli::GlobalOpts;

#[derive(clap::Args, Debug)]
pub struct DownloadArgs {
    /// URL to fetch
    pub url: String,

    /// Output filename (default: last URL path segment)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

/// Last path segment of a URL, without query or fragment
fn filename_from_url(url: &str) -> Option<String> {
    url.split('/')
        .next_back()
        .map(|s| s.split(['?', '#']).next().unwrap_or(""))
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

pub fn run(args: DownloadArgs, global: &GlobalOpts) -> Result<()> {
    let output = match args.output {
        Some(output) => output,
        None => filename_from_url(&args.url)
            .map(PathBuf::from)
            .ok_or_else(|| miette!("cannot derive a filename from {}; use --output", args.url))?,
    };

    let response = ureq::get(&args.url)
        .call()
        .map_err(|e| miette!("failed to download {}: {}", args.url, e))?;
    let mut bytes = Vec::new();
    response
        .into_reader()
        .read_to_end(&mut bytes)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to read response from {}", args.url))?;

    fs::write(&output, &bytes)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to write {}", output.display()))?;

    if !global.quiet {
        println!(
            "{} Downloaded {} ({} bytes)",
            style("✓").green(),
            output.display(),
            bytes.len()
        );
    }
    Ok(())
}
