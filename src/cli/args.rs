//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};

use crate::cli::commands::{
    apply::ApplyArgs,
    completions::CompletionsArgs,
    create::CreateArgs,
    delete::DeleteArgs,
    download::DownloadArgs,
    export::ExportArgs,
    facet::FacetArgs,
    info::InfoArgs,
    list::ListArgs,
    rows::RowsArgs,
    version::VersionArgs,
};

#[derive(Parser)]
#[command(name = "refinery")]
#[command(author, version, about = "Command-line client for OpenRefine-compatible servers")]
#[command(
    long_about = "Issues HTTP requests against a remote data-cleaning server to create, list,\n\
                  inspect, transform, export, and delete projects, and to drive the server's\n\
                  faceted-filtering engine."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Server hostname (default: 127.0.0.1)
    #[arg(long, short = 'H', global = true, env = "REFINERY_HOST")]
    pub host: Option<String>,

    /// Server port (default: 3333)
    #[arg(long, short = 'P', global = true, env = "REFINERY_PORT")]
    pub port: Option<u16>,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List projects on the server
    List(ListArgs),

    /// Create a project from a local file
    Create(CreateArgs),

    /// Show project metadata and column layout
    Info(InfoArgs),

    /// Fetch rows, optionally filtered by facet selections
    Rows(RowsArgs),

    /// Compute facet choice counts for columns
    Facet(FacetArgs),

    /// Apply an operation-history JSON file to a project
    Apply(ApplyArgs),

    /// Export a project to a file or stdout
    Export(ExportArgs),

    /// Delete a project
    Delete(DeleteArgs),

    /// Download a file over HTTP (e.g. example data)
    Download(DownloadArgs),

    /// Show the server version
    Version(VersionArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Automatically pick based on the command (tables for humans)
    #[default]
    Auto,
    /// Aligned tables
    Table,
    /// JSON (for programming)
    Json,
    /// Comma-separated values (for spreadsheets)
    Csv,
    /// Tab-separated values (for piping)
    Tsv,
}
