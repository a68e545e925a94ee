//! `refinery create` command - create a project from a local file

use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::helpers::connect;
use crate::cli::GlobalOpts;
use crate::core::CreateOptions;

#[derive(clap::Args, Debug)]
pub struct CreateArgs {
    /// File to upload (extension determines the import format:
    /// csv, tsv, txt, xml, json, xls, xlsx, ods)
    pub file: PathBuf,

    /// Project name (default: filename)
    #[arg(long)]
    pub project_name: Option<String>,

    /// Project tags (comma-separated or repeated)
    #[arg(long, value_delimiter = ',')]
    pub project_tags: Vec<String>,

    /// Override import format detection (e.g. text/line-based/*sv)
    #[arg(long, value_name = "FORMAT")]
    pub import_format: Option<String>,

    /// Character encoding (csv, tsv, txt), e.g. UTF-8
    #[arg(long)]
    pub encoding: Option<String>,

    /// Column separator (csv, tsv)
    #[arg(long)]
    pub separator: Option<String>,

    /// Header line count (default: 1)
    #[arg(long)]
    pub header_lines: Option<i64>,

    /// Initial lines to ignore (default: -1)
    #[arg(long)]
    pub ignore_lines: Option<i64>,

    /// Data lines to skip after the header (default: 0)
    #[arg(long)]
    pub skip_data_lines: Option<i64>,

    /// Maximum rows to import (default: -1, no limit)
    #[arg(long)]
    pub limit: Option<i64>,

    /// Lines per row (line-based text)
    #[arg(long)]
    pub lines_per_row: Option<i64>,

    /// Fixed column widths (txt), repeat per column
    #[arg(long = "column-width", value_name = "WIDTH")]
    pub column_widths: Vec<i64>,

    /// Sheet indexes to import (xls, xlsx, ods), repeat per sheet
    #[arg(long = "sheet", value_name = "INDEX")]
    pub sheets: Vec<i64>,

    /// Record path segment (xml, json), repeat per segment
    #[arg(long = "record-path", value_name = "SEGMENT")]
    pub record_path: Vec<String>,

    /// Guess cell value types (xml, csv, tsv, txt, json)
    #[arg(long)]
    pub guess_cell_value_types: Option<bool>,

    /// Honor quote characters (csv, tsv)
    #[arg(long)]
    pub process_quotes: Option<bool>,

    /// Keep blank rows (csv, tsv, txt, xls, xlsx, ods)
    #[arg(long)]
    pub store_blank_rows: Option<bool>,

    /// Store blank cells as nulls
    #[arg(long)]
    pub store_blank_cells_as_nulls: Option<bool>,

    /// Store empty strings (xml, json)
    #[arg(long)]
    pub store_empty_strings: Option<bool>,

    /// Trim leading/trailing whitespace (xml, json)
    #[arg(long)]
    pub trim_strings: Option<bool>,

    /// Record the source filename in a column
    #[arg(long)]
    pub include_file_sources: Option<bool>,
}

impl CreateArgs {
    fn to_options(&self) -> CreateOptions {
        CreateOptions {
            project_name: self.project_name.clone(),
            project_tags: self.project_tags.clone(),
            format: self.import_format.clone(),
            encoding: self.encoding.clone(),
            separator: self.separator.clone(),
            header_lines: self.header_lines,
            ignore_lines: self.ignore_lines,
            skip_data_lines: self.skip_data_lines,
            limit: self.limit,
            lines_per_row: self.lines_per_row,
            column_widths: self.column_widths.clone(),
            sheets: self.sheets.clone(),
            record_path: self.record_path.clone(),
            guess_cell_value_types: self.guess_cell_value_types,
            process_quotes: self.process_quotes,
            store_blank_rows: self.store_blank_rows,
            store_blank_cells_as_nulls: self.store_blank_cells_as_nulls,
            store_empty_strings: self.store_empty_strings,
            trim_strings: self.trim_strings,
            include_file_sources: self.include_file_sources,
        }
    }
}

pub fn run(args: CreateArgs, global: &GlobalOpts) -> Result<()> {
    let client = connect(global);
    let options = args.to_options();

    if global.verbose {
        eprintln!(
            "Uploading {} to {}",
            args.file.display(),
            client.server().base_url()
        );
    }

    let project = client
        .create_project(&args.file, &options)
        .into_diagnostic()?;

    if global.quiet {
        println!("{}", project.id);
    } else {
        println!(
            "{} Created project {}",
            style("✓").green(),
            style(&project.id).bold()
        );
    }
    Ok(())
}
