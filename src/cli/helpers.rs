//! Shared helper functions for CLI commands

use crate::cli::GlobalOpts;
use crate::core::engine::{Engine, Mode};
use crate::core::{Client, Config, Server};

/// Build a client from config plus the global connection flags
pub fn connect(global: &GlobalOpts) -> Client {
    let config = Config::load();
    let base_url = config.base_url(global.host.as_deref(), global.port);
    Client::new(Server::new(base_url))
}

/// Parse a `COLUMN=VALUE` facet selection
pub fn parse_selection(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((column, value)) if !column.is_empty() => {
            Ok((column.to_string(), value.to_string()))
        }
        _ => Err(format!(
            "invalid selection '{s}': expected COLUMN=VALUE"
        )),
    }
}

/// Build an engine from repeated `--select COLUMN=VALUE` flags
pub fn engine_from_selections(selections: &[(String, String)], mode: Mode) -> Engine {
    let mut engine = Engine::with_mode(mode);
    for (column, value) in selections {
        engine.facet_mut(column).include(value);
    }
    engine
}

/// Truncate a string to max_len, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

/// Escape a string for CSV output (RFC 4180)
pub fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
