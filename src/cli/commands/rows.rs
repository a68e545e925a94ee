//! `refinery rows` command - fetch rows through the server's engine

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{connect, engine_from_selections, parse_selection};
use crate::cli::{table, GlobalOpts, OutputFormat};
use crate::core::engine::Mode;

#[derive(clap::Args, Debug)]
pub struct RowsArgs {
    /// Project name or id
    pub project: String,

    /// Index of the first row to fetch
    #[arg(long, default_value_t = 0)]
    pub start: u64,

    /// Number of rows to fetch
    #[arg(long, short = 'n', default_value_t = 10)]
    pub limit: u64,

    /// Facet selection COLUMN=VALUE; repeat to refine (values on the same
    /// column are OR-ed, different columns are AND-ed)
    #[arg(long, value_parser = parse_selection)]
    pub select: Vec<(String, String)>,

    /// Engine mode
    #[arg(long, value_enum, default_value = "row-based")]
    pub mode: EngineMode,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum EngineMode {
    RowBased,
    RecordBased,
}

impl From<EngineMode> for Mode {
    fn from(mode: EngineMode) -> Self {
        match mode {
            EngineMode::RowBased => Mode::RowBased,
            EngineMode::RecordBased => Mode::RecordBased,
        }
    }
}

pub fn run(args: RowsArgs, global: &GlobalOpts) -> Result<()> {
    let client = connect(global);
    let project = client.open_project(&args.project).into_diagnostic()?;
    let models = project.get_models().into_diagnostic()?;
    let engine = engine_from_selections(&args.select, args.mode.into());
    let response = project
        .get_rows(&engine, args.start, args.limit)
        .into_diagnostic()?;

    let columns = models.column_model.columns.clone();

    match global.format {
        OutputFormat::Json => {
            let rows: Vec<serde_json::Value> = response
                .rows
                .iter()
                .map(|row| {
                    let mut record = serde_json::Map::new();
                    record.insert("index".to_string(), row.index.into());
                    for column in &columns {
                        record.insert(
                            column.name.clone(),
                            serde_json::Value::String(row.cell_text(column.cell_index)),
                        );
                    }
                    serde_json::Value::Object(record)
                })
                .collect();
            let out = serde_json::json!({
                "rows": rows,
                "start": response.start,
                "limit": response.limit,
                "filtered": response.filtered,
                "total": response.total,
            });
            println!("{}", serde_json::to_string_pretty(&out).into_diagnostic()?);
        }
        OutputFormat::Csv | OutputFormat::Tsv => {
            let delimiter = if global.format == OutputFormat::Csv {
                b','
            } else {
                b'\t'
            };
            let mut writer = csv::WriterBuilder::new()
                .delimiter(delimiter)
                .from_writer(std::io::stdout());
            let mut header = vec!["index".to_string()];
            header.extend(columns.iter().map(|c| c.name.clone()));
            writer.write_record(&header).into_diagnostic()?;
            for row in &response.rows {
                let mut record = vec![row.index.to_string()];
                record.extend(columns.iter().map(|c| row.cell_text(c.cell_index)));
                writer.write_record(&record).into_diagnostic()?;
            }
            writer.flush().into_diagnostic()?;
        }
        format => {
            let mut header: Vec<&str> = vec!["ROW"];
            header.extend(columns.iter().map(|c| c.name.as_str()));
            let rows: Vec<Vec<String>> = response
                .rows
                .iter()
                .map(|row| {
                    let mut record = vec![row.index.to_string()];
                    record.extend(columns.iter().map(|c| row.cell_text(c.cell_index)));
                    record
                })
                .collect();
            print!("{}", table::render(format, &header, &rows));
            if !global.quiet {
                println!(
                    "{} of {} rows (filtered: {})",
                    style(response.rows.len()).bold(),
                    response.total,
                    response.filtered
                );
            }
        }
    }

    Ok(())
}
