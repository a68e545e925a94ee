//! `refinery delete` command - delete a project

use console::style;
use miette::{miette, IntoDiagnostic, Result};

use crate::cli::helpers::connect;
use crate::cli::GlobalOpts;

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    /// Project name or id
    pub project: String,
}

pub fn run(args: DeleteArgs, global: &GlobalOpts) -> Result<()> {
    let client = connect(global);
    let project = client.open_project(&args.project).into_diagnostic()?;
    let id = project.id.clone();

    if !project.delete().into_diagnostic()? {
        return Err(miette!("server did not confirm deletion of project {id}"));
    }
    if !global.quiet {
        println!(
            "{} Deleted project {}",
            style("✓").green(),
            style(&id).bold()
        );
    }
    Ok(())
}
