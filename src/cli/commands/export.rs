//! `refinery export` command - export a project to a file or stdout

use console::style;
use miette::{miette, IntoDiagnostic, Result, WrapErr};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::cli::commands::rows::EngineMode;
use crate::cli::helpers::{connect, engine_from_selections, parse_selection};
use crate::cli::GlobalOpts;
use crate::core::engine::{regex_filter, Engine};
use crate::core::project::{Project, TemplateOptions};

#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    /// Project name or id
    pub project: String,

    /// Write to a file instead of stdout. The extension picks the export
    /// format (csv, tsv, html, xls, xlsx, ods) unless --export-format
    /// overrides it.
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Export format (default: from --output extension, else tsv)
    #[arg(long, value_name = "FORMAT")]
    pub export_format: Option<String>,

    /// Facet selection COLUMN=VALUE; repeat to refine
    #[arg(long, value_parser = parse_selection)]
    pub select: Vec<(String, String)>,

    /// Facet config in engine JSON format (array or single facet), as
    /// extracted with the browser dev tools
    #[arg(long)]
    pub facets: Option<String>,

    /// Regex filter applied to --filter-column
    #[arg(long, value_name = "REGEX")]
    pub filter_query: Option<String>,

    /// Column for --filter-query (default: key column)
    #[arg(long, value_name = "COLUMN")]
    pub filter_column: Option<String>,

    /// Engine mode
    #[arg(long, value_enum, default_value = "row-based")]
    pub mode: EngineMode,

    /// Row template for the templating exporter; switches the export to
    /// template mode
    #[arg(long)]
    pub template: Option<String>,

    /// Text prepended to the templating output
    #[arg(long)]
    pub prefix: Option<String>,

    /// Text appended to the templating output
    #[arg(long)]
    pub suffix: Option<String>,

    /// Separator between rendered rows (default: newline)
    #[arg(long)]
    pub row_separator: Option<String>,

    /// Split the templating output into one file per row
    #[arg(long)]
    pub split_to_files: bool,

    /// Name split files by the key-column value instead of a counter
    #[arg(long)]
    pub suffix_by_id: bool,
}

pub fn run(args: ExportArgs, global: &GlobalOpts) -> Result<()> {
    let client = connect(global);
    let project = client.open_project(&args.project).into_diagnostic()?;

    let mut engine = engine_from_selections(&args.select, args.mode.into());
    if let Some(facets) = &args.facets {
        let parsed: serde_json::Value = serde_json::from_str(facets)
            .into_diagnostic()
            .wrap_err("--facets is not valid JSON")?;
        match parsed {
            serde_json::Value::Array(facets) => {
                for facet in facets {
                    engine.add_raw_facet(facet);
                }
            }
            facet => {
                engine.add_raw_facet(facet);
            }
        }
    }
    if let Some(query) = &args.filter_query {
        let column = match &args.filter_column {
            Some(column) => column.clone(),
            None => {
                let models = project.get_models().into_diagnostic()?;
                models
                    .key_column()
                    .map(str::to_string)
                    .ok_or_else(|| miette!("project has no columns to filter on"))?
            }
        };
        engine.add_raw_facet(regex_filter(&column, query));
    }

    if args.template.is_some() {
        export_template(&project, &engine, &args, global)
    } else {
        export_tabular(&project, &engine, &args, global)
    }
}

fn export_tabular(
    project: &Project<'_>,
    engine: &Engine,
    args: &ExportArgs,
    global: &GlobalOpts,
) -> Result<()> {
    let format = args
        .export_format
        .clone()
        .or_else(|| {
            args.output
                .as_deref()
                .and_then(Path::extension)
                .and_then(|e| e.to_str())
                .map(|e| e.to_ascii_lowercase())
        })
        .unwrap_or_else(|| "tsv".to_string());

    let bytes = project.export_rows(engine, &format).into_diagnostic()?;
    write_output(args.output.as_deref(), &bytes)?;

    if let Some(output) = &args.output {
        if !global.quiet {
            println!(
                "{} Exported project {} to {}",
                style("✓").green(),
                style(&project.id).bold(),
                output.display()
            );
        }
    }
    Ok(())
}

fn export_template(
    project: &Project<'_>,
    engine: &Engine,
    args: &ExportArgs,
    global: &GlobalOpts,
) -> Result<()> {
    let template = args.template.clone().unwrap_or_default();
    let separator = args.row_separator.clone().unwrap_or_else(|| "\n".to_string());

    if !args.split_to_files {
        let options = TemplateOptions {
            template,
            prefix: args.prefix.clone(),
            suffix: args.suffix.clone(),
            row_separator: args.row_separator.clone(),
        };
        let bytes = project.export_template(engine, &options).into_diagnostic()?;
        return write_output(args.output.as_deref(), &bytes);
    }

    // Split mode: fetch the body bare, then frame each part locally
    let options = TemplateOptions {
        template,
        prefix: None,
        suffix: None,
        row_separator: Some(separator.clone()),
    };
    let bytes = project.export_template(engine, &options).into_diagnostic()?;
    let body = String::from_utf8_lossy(&bytes);
    let parts: Vec<&str> = body
        .split(separator.as_str())
        .filter(|part| !part.trim().is_empty())
        .collect();

    let (stem, extension) = match &args.output {
        Some(output) => (
            output.with_extension("").display().to_string(),
            output
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| format!(".{e}"))
                .unwrap_or_default(),
        ),
        None => ("part".to_string(), ".txt".to_string()),
    };

    let suffixes: Vec<String> = if args.suffix_by_id {
        key_column_values(project, engine, parts.len())?
    } else {
        (1..=parts.len()).map(|n| n.to_string()).collect()
    };

    for (part, suffix) in parts.iter().zip(&suffixes) {
        let path = format!("{stem}_{suffix}{extension}");
        let mut contents = String::new();
        if let Some(prefix) = &args.prefix {
            contents.push_str(prefix);
        }
        contents.push_str(part);
        if let Some(file_suffix) = &args.suffix {
            contents.push_str(file_suffix);
        }
        fs::write(&path, contents)
            .into_diagnostic()
            .wrap_err_with(|| format!("failed to write {path}"))?;
    }
    if !global.quiet {
        println!(
            "{} Wrote {} file(s) from project {}",
            style("✓").green(),
            parts.len(),
            style(&project.id).bold()
        );
    }
    Ok(())
}

/// Key-column cell values for the first `count` filtered rows, sanitized
/// for use in filenames
fn key_column_values(
    project: &Project<'_>,
    engine: &Engine,
    count: usize,
) -> Result<Vec<String>> {
    let models = project.get_models().into_diagnostic()?;
    let key_index = models.column_model.key_cell_index.unwrap_or(0);
    let response = project
        .get_rows(engine, 0, count as u64)
        .into_diagnostic()?;
    Ok(response
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let value: String = row
                .cell_text(key_index)
                .chars()
                .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
                .collect();
            if value.is_empty() {
                (i + 1).to_string()
            } else {
                value
            }
        })
        .collect())
}

fn write_output(output: Option<&Path>, bytes: &[u8]) -> Result<()> {
    match output {
        Some(path) => fs::write(path, bytes)
            .into_diagnostic()
            .wrap_err_with(|| format!("failed to write {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(bytes).into_diagnostic()?;
            stdout.flush().into_diagnostic()
        }
    }
}
