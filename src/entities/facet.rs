//! Facet records from the `compute-facets` command

use serde::Deserialize;

/// All facets the server computed for the current engine
#[derive(Debug, Clone, Deserialize)]
pub struct FacetsResponse {
    #[serde(default)]
    pub facets: Vec<Facet>,
}

/// One server-computed facet: choice labels with row counts
#[derive(Debug, Clone, Deserialize)]
pub struct Facet {
    #[serde(default)]
    pub name: String,

    #[serde(default, rename = "columnName")]
    pub column_name: String,

    #[serde(default)]
    pub choices: Vec<FacetChoice>,

    /// Count of rows with a blank value in this column, when present
    #[serde(default, rename = "blankChoice")]
    pub blank_choice: Option<ChoiceCount>,

    /// Set when the server refuses to facet (e.g. too many choices)
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FacetChoice {
    #[serde(rename = "v")]
    pub value: ChoiceValue,

    /// Rows matching this choice
    #[serde(rename = "c")]
    pub count: u64,

    /// Whether this choice is part of the engine's selection
    #[serde(default, rename = "s")]
    pub selected: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceValue {
    /// Raw cell value backing this choice
    #[serde(default, rename = "v")]
    pub value: serde_json::Value,

    /// Display label
    #[serde(default, rename = "l")]
    pub label: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceCount {
    #[serde(rename = "c")]
    pub count: u64,

    #[serde(default, rename = "s")]
    pub selected: bool,
}

impl Facet {
    /// Count for a choice by label, if the server reported it
    pub fn choice_count(&self, label: &str) -> Option<u64> {
        self.choices
            .iter()
            .find(|c| c.value.label == label)
            .map(|c| c.count)
    }
}
