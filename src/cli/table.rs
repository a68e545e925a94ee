//! Table formatting utilities for CLI list commands
//!
//! One renderer for all list-shaped output: aligned tables for humans,
//! CSV/TSV for piping, JSON left to the individual commands.

use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::escape_csv;
use crate::cli::OutputFormat;

/// Render header + rows in the requested format.
///
/// `Auto` falls through to `Table`; `Json` is not handled here because each
/// command serializes its own typed records.
pub fn render(format: OutputFormat, header: &[&str], rows: &[Vec<String>]) -> String {
    match format {
        OutputFormat::Csv => delimited(header, rows, ","),
        OutputFormat::Tsv => delimited(header, rows, "\t"),
        _ => {
            let mut builder = Builder::default();
            builder.push_record(header.iter().copied());
            for row in rows {
                builder.push_record(row.iter().map(String::as_str));
            }
            let mut out = builder.build().with(Style::sharp()).to_string();
            out.push('\n');
            out
        }
    }
}

fn delimited(header: &[&str], rows: &[Vec<String>], sep: &str) -> String {
    let mut out = String::new();
    let escape = |s: &str| {
        if sep == "," {
            escape_csv(s)
        } else {
            s.replace('\t', " ")
        }
    };
    out.push_str(
        &header
            .iter()
            .map(|h| escape(h))
            .collect::<Vec<_>>()
            .join(sep),
    );
    out.push('\n');
    for row in rows {
        out.push_str(
            &row.iter()
                .map(|cell| escape(cell))
                .collect::<Vec<_>>()
                .join(sep),
        );
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_render_escapes() {
        let rows = vec![vec!["1".to_string(), "a,b".to_string()]];
        let out = render(OutputFormat::Csv, &["id", "name"], &rows);
        assert_eq!(out, "id,name\n1,\"a,b\"\n");
    }

    #[test]
    fn test_tsv_render_flattens_tabs() {
        let rows = vec![vec!["1".to_string(), "a\tb".to_string()]];
        let out = render(OutputFormat::Tsv, &["id", "name"], &rows);
        assert_eq!(out, "id\tname\n1\ta b\n");
    }

    #[test]
    fn test_table_render_contains_cells() {
        let rows = vec![vec!["42".to_string(), "duplicates".to_string()]];
        let out = render(OutputFormat::Auto, &["ID", "NAME"], &rows);
        assert!(out.contains("42"));
        assert!(out.contains("duplicates"));
        assert!(out.contains("ID"));
    }
}
