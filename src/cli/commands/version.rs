//! `refinery version` command - server version

use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::connect;
use crate::cli::{GlobalOpts, OutputFormat};

#[derive(clap::Args, Debug)]
pub struct VersionArgs {}

pub fn run(_args: VersionArgs, global: &GlobalOpts) -> Result<()> {
    let client = connect(global);
    let info = client.get_version().into_diagnostic()?;

    if global.format == OutputFormat::Json {
        let out = serde_json::json!({
            "revision": info.revision,
            "version": info.version,
            "full_version": info.full_version,
            "full_name": info.full_name,
        });
        println!("{}", serde_json::to_string_pretty(&out).into_diagnostic()?);
    } else if info.full_name.is_empty() {
        println!("{}", info.version);
    } else {
        println!("{}", info.full_name);
    }
    Ok(())
}
