//! `refinery info` command - project metadata and column layout

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::connect;
use crate::cli::{table, GlobalOpts, OutputFormat};

#[derive(clap::Args, Debug)]
pub struct InfoArgs {
    /// Project name or id
    pub project: String,
}

pub fn run(args: InfoArgs, global: &GlobalOpts) -> Result<()> {
    let client = connect(global);
    let project = client.open_project(&args.project).into_diagnostic()?;
    let metadata = project.get_metadata().into_diagnostic()?;
    let models = project.get_models().into_diagnostic()?;

    if global.format == OutputFormat::Json {
        let columns: Vec<serde_json::Value> = models
            .column_model
            .columns
            .iter()
            .map(|c| serde_json::json!({"name": c.name, "cellIndex": c.cell_index}))
            .collect();
        let out = serde_json::json!({
            "id": project.id,
            "metadata": metadata,
            "keyColumn": models.key_column(),
            "columns": columns,
        });
        println!("{}", serde_json::to_string_pretty(&out).into_diagnostic()?);
        return Ok(());
    }

    println!("{:>10}: {}", style("id").bold(), project.id);
    println!("{:>10}: {}", style("name").bold(), metadata.name);
    if let Some(created) = metadata.created {
        println!("{:>10}: {}", style("created").bold(), created.to_rfc3339());
    }
    if let Some(modified) = metadata.modified {
        println!("{:>10}: {}", style("modified").bold(), modified.to_rfc3339());
    }
    if let Some(rows) = metadata.row_count {
        println!("{:>10}: {}", style("rows").bold(), rows);
    }
    if !metadata.tags.is_empty() {
        println!("{:>10}: {}", style("tags").bold(), metadata.tags.join(", "));
    }
    if let Some(key) = models.key_column() {
        println!("{:>10}: {}", style("key column").bold(), key);
    }
    println!();

    let rows: Vec<Vec<String>> = models
        .column_model
        .columns
        .iter()
        .map(|c| vec![c.cell_index.to_string(), c.name.clone()])
        .collect();
    print!("{}", table::render(global.format, &["INDEX", "COLUMN"], &rows));

    Ok(())
}
