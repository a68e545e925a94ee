//! Client-side mirror of the server's faceted-filtering engine
//!
//! The engine never computes anything locally. It is request configuration:
//! a set of facets with include/exclude selections, serialized into the
//! `engine` form parameter of row, facet, and export requests.

use serde::Serialize;

/// Engine mode: rows are filtered individually or grouped into records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Mode {
    #[default]
    #[serde(rename = "row-based")]
    RowBased,
    #[serde(rename = "record-based")]
    RecordBased,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::RowBased => write!(f, "row-based"),
            Mode::RecordBased => write!(f, "record-based"),
        }
    }
}

/// A text (list) facet over one column, with an optional choice selection
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextFacet {
    #[serde(rename = "type")]
    facet_type: &'static str,

    pub name: String,

    pub column_name: String,

    expression: &'static str,

    pub omit_blank: bool,

    pub omit_error: bool,

    selection: Vec<Selection>,

    pub select_blank: bool,

    pub select_error: bool,

    pub invert: bool,
}

#[derive(Debug, Clone, Serialize)]
struct Selection {
    v: SelectionValue,
}

#[derive(Debug, Clone, Serialize)]
struct SelectionValue {
    v: serde_json::Value,
    l: String,
}

impl TextFacet {
    pub fn new(column: &str) -> Self {
        TextFacet {
            facet_type: "list",
            name: column.to_string(),
            column_name: column.to_string(),
            expression: "value",
            omit_blank: false,
            omit_error: false,
            selection: Vec::new(),
            select_blank: false,
            select_error: false,
            invert: false,
        }
    }

    /// Add a choice to the selection (idempotent)
    pub fn include(&mut self, value: &str) -> &mut Self {
        if !self.is_selected(value) {
            self.selection.push(Selection {
                v: SelectionValue {
                    v: serde_json::Value::String(value.to_string()),
                    l: value.to_string(),
                },
            });
        }
        self
    }

    /// Remove a choice from the selection
    pub fn exclude(&mut self, value: &str) -> &mut Self {
        self.selection.retain(|s| s.v.l != value);
        self
    }

    /// Clear the selection entirely
    pub fn reset(&mut self) -> &mut Self {
        self.selection.clear();
        self
    }

    pub fn is_selected(&self, value: &str) -> bool {
        self.selection.iter().any(|s| s.v.l == value)
    }

    pub fn selection_len(&self) -> usize {
        self.selection.len()
    }
}

/// A regex text filter over one column, as a raw facet config
pub fn regex_filter(column: &str, query: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "text",
        "name": column,
        "columnName": column,
        "mode": "regex",
        "caseSensitive": false,
        "invert": false,
        "query": query,
    })
}

/// The active set of facets applied to a project's rows
#[derive(Debug, Clone, Default)]
pub struct Engine {
    facets: Vec<TextFacet>,
    /// Verbatim facet configs (e.g. extracted from the server's UI or a
    /// regex filter); appended after the typed facets on the wire
    raw_facets: Vec<serde_json::Value>,
    pub mode: Mode,
}

impl Engine {
    pub fn new() -> Self {
        Engine::default()
    }

    pub fn with_mode(mode: Mode) -> Self {
        Engine {
            mode,
            ..Engine::default()
        }
    }

    pub fn add_facet(&mut self, facet: TextFacet) -> &mut Self {
        self.facets.push(facet);
        self
    }

    /// Append a facet config verbatim
    pub fn add_raw_facet(&mut self, facet: serde_json::Value) -> &mut Self {
        self.raw_facets.push(facet);
        self
    }

    /// Facet for a column, creating it if not yet present
    pub fn facet_mut(&mut self, column: &str) -> &mut TextFacet {
        if let Some(pos) = self.facets.iter().position(|f| f.column_name == column) {
            &mut self.facets[pos]
        } else {
            self.facets.push(TextFacet::new(column));
            self.facets
                .last_mut()
                .expect("facet was just pushed")
        }
    }

    pub fn facets(&self) -> &[TextFacet] {
        &self.facets
    }

    pub fn is_empty(&self) -> bool {
        self.facets.is_empty() && self.raw_facets.is_empty()
    }

    /// Wire form of the engine, as sent in the `engine` form parameter.
    ///
    /// Facet and selection order is insertion order, so the output is
    /// deterministic for a given sequence of calls.
    pub fn to_json(&self) -> String {
        let mut facets: Vec<serde_json::Value> = self
            .facets
            .iter()
            .map(|f| serde_json::to_value(f).expect("facet serialization is infallible"))
            .collect();
        facets.extend(self.raw_facets.iter().cloned());
        serde_json::json!({ "facets": facets, "mode": self.mode }).to_string()
    }
}
