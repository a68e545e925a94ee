//! `refinery facet` command - server-computed choice counts

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{connect, engine_from_selections, parse_selection};
use crate::cli::{table, GlobalOpts, OutputFormat};
use crate::core::engine::Mode;

#[derive(clap::Args, Debug)]
pub struct FacetArgs {
    /// Project name or id
    pub project: String,

    /// Columns to facet
    #[arg(required = true)]
    pub columns: Vec<String>,

    /// Facet selection COLUMN=VALUE; repeat to refine. Selected columns are
    /// faceted even when not listed.
    #[arg(long, value_parser = parse_selection)]
    pub select: Vec<(String, String)>,

    /// Sort choices by count (descending) instead of label
    #[arg(long)]
    pub by_count: bool,
}

pub fn run(args: FacetArgs, global: &GlobalOpts) -> Result<()> {
    let client = connect(global);
    let project = client.open_project(&args.project).into_diagnostic()?;

    let mut engine = engine_from_selections(&args.select, Mode::RowBased);
    for column in &args.columns {
        engine.facet_mut(column);
    }
    let response = project.compute_facets(&engine).into_diagnostic()?;

    if global.format == OutputFormat::Json {
        let facets: Vec<serde_json::Value> = response
            .facets
            .iter()
            .map(|facet| {
                let choices: Vec<serde_json::Value> = facet
                    .choices
                    .iter()
                    .map(|c| {
                        serde_json::json!({
                            "label": c.value.label,
                            "count": c.count,
                            "selected": c.selected,
                        })
                    })
                    .collect();
                serde_json::json!({
                    "column": facet.column_name,
                    "choices": choices,
                    "blankCount": facet.blank_choice.as_ref().map(|b| b.count),
                    "error": facet.error,
                })
            })
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({ "facets": facets }))
                .into_diagnostic()?
        );
        return Ok(());
    }

    for facet in &response.facets {
        if !global.quiet {
            println!("{}", style(&facet.name).bold().underlined());
        }
        if let Some(error) = &facet.error {
            println!("{} {}", style("!").yellow(), error);
            println!();
            continue;
        }

        let mut choices = facet.choices.clone();
        if args.by_count {
            choices.sort_by(|a, b| b.count.cmp(&a.count).then(a.value.label.cmp(&b.value.label)));
        } else {
            choices.sort_by(|a, b| a.value.label.cmp(&b.value.label));
        }

        let mut rows: Vec<Vec<String>> = choices
            .iter()
            .map(|c| {
                vec![
                    c.value.label.clone(),
                    c.count.to_string(),
                    if c.selected { "*".to_string() } else { String::new() },
                ]
            })
            .collect();
        if let Some(blank) = &facet.blank_choice {
            rows.push(vec![
                style("(blank)").dim().to_string(),
                blank.count.to_string(),
                if blank.selected { "*".to_string() } else { String::new() },
            ]);
        }
        print!(
            "{}",
            table::render(global.format, &["CHOICE", "COUNT", "SELECTED"], &rows)
        );
        println!();
    }

    Ok(())
}
