//! `refinery list` command - list projects on the server

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{connect, truncate_str};
use crate::cli::{table, GlobalOpts, OutputFormat};

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Only show projects with this tag
    #[arg(long)]
    pub tag: Option<String>,

    /// Limit output to N projects
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}

pub fn run(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let client = connect(global);
    let projects = client.list_projects().into_diagnostic()?;

    let mut entries: Vec<_> = projects
        .into_iter()
        .filter(|(_, meta)| match &args.tag {
            Some(tag) => meta.tags.iter().any(|t| t == tag),
            None => true,
        })
        .collect();

    // Most recently modified first, like the server's own project index
    entries.sort_by(|a, b| b.1.modified.cmp(&a.1.modified));
    if let Some(limit) = args.limit {
        entries.truncate(limit);
    }

    if entries.is_empty() {
        match global.format {
            OutputFormat::Json => println!("{{}}"),
            _ if global.quiet => {}
            _ => println!("No projects found."),
        }
        return Ok(());
    }

    match global.format {
        OutputFormat::Json => {
            let map: serde_json::Map<String, serde_json::Value> = entries
                .iter()
                .map(|(id, meta)| {
                    (
                        id.clone(),
                        serde_json::to_value(meta).unwrap_or(serde_json::Value::Null),
                    )
                })
                .collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&map).into_diagnostic()?
            );
        }
        format => {
            let rows: Vec<Vec<String>> = entries
                .iter()
                .map(|(id, meta)| {
                    vec![
                        id.clone(),
                        truncate_str(&meta.name, 48),
                        meta.modified
                            .map(|m| m.format("%Y-%m-%d %H:%M").to_string())
                            .unwrap_or_default(),
                        meta.row_count.map(|n| n.to_string()).unwrap_or_default(),
                    ]
                })
                .collect();
            print!(
                "{}",
                table::render(format, &["ID", "NAME", "MODIFIED", "ROWS"], &rows)
            );
            if !global.quiet && matches!(format, OutputFormat::Auto | OutputFormat::Table) {
                println!(
                    "{} project(s) on {}",
                    style(rows.len()).bold(),
                    client.server().base_url()
                );
            }
        }
    }

    Ok(())
}
