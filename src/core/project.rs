//! Per-project façade over the command API

use serde::Deserialize;

use crate::core::engine::Engine;
use crate::core::server::{Server, ServerError};
use crate::entities::{FacetsResponse, ProjectMetadata, ProjectModels, RowsResponse};

/// Options for templating exports.
///
/// The row template plus optional framing text, all posted verbatim; the
/// server renders one chunk per row (or record, in record mode).
#[derive(Debug, Clone, Default)]
pub struct TemplateOptions {
    pub template: String,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub row_separator: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CodeResponse {
    #[serde(default)]
    code: String,
}

/// Handle to one server-hosted project
pub struct Project<'a> {
    server: &'a Server,
    pub id: String,
}

impl<'a> Project<'a> {
    pub fn new(server: &'a Server, id: String) -> Self {
        Project { server, id }
    }

    /// Project metadata (name, timestamps, row count)
    pub fn get_metadata(&self) -> Result<ProjectMetadata, ServerError> {
        self.server
            .get("get-project-metadata", &[("project", &self.id)])
    }

    /// Column layout and key column
    pub fn get_models(&self) -> Result<ProjectModels, ServerError> {
        self.server.get("get-models", &[("project", &self.id)])
    }

    /// One page of rows under the given engine
    pub fn get_rows(
        &self,
        engine: &Engine,
        start: u64,
        limit: u64,
    ) -> Result<RowsResponse, ServerError> {
        let engine_json = engine.to_json();
        let start = start.to_string();
        let limit = limit.to_string();
        self.server.post(
            "get-rows",
            &[("project", &self.id), ("start", &start), ("limit", &limit)],
            &[("engine", &engine_json)],
        )
    }

    /// Choice counts for every facet in the engine
    pub fn compute_facets(&self, engine: &Engine) -> Result<FacetsResponse, ServerError> {
        let engine_json = engine.to_json();
        self.server.post(
            "compute-facets",
            &[("project", &self.id)],
            &[("engine", &engine_json)],
        )
    }

    /// Submit an operation-history JSON array.
    ///
    /// The server answers `ok` when applied synchronously and `pending` when
    /// queued; both mean the submission was accepted.
    pub fn apply_operations(&self, operations: &str) -> Result<(), ServerError> {
        let response: CodeResponse = self.server.post(
            "apply-operations",
            &[],
            &[("project", &self.id), ("operations", operations)],
        )?;
        match response.code.as_str() {
            "ok" | "pending" => Ok(()),
            other => Err(ServerError::Remote {
                command: "apply-operations".to_string(),
                message: format!("unexpected result code '{other}'"),
            }),
        }
    }

    /// Export the (engine-filtered) rows in the given format, returning the
    /// file bytes.
    ///
    /// `format` is the filename extension the server keys its exporters on
    /// (csv, tsv, html, xls, xlsx, ods).
    pub fn export_rows(&self, engine: &Engine, format: &str) -> Result<Vec<u8>, ServerError> {
        let command = format!("export-rows/{}.{}", self.id, format);
        let engine_json = engine.to_json();
        self.server.post_raw(
            &command,
            &[],
            &[
                ("project", &self.id),
                ("engine", &engine_json),
                ("format", format),
            ],
        )
    }

    /// Export through the templating exporter
    pub fn export_template(
        &self,
        engine: &Engine,
        options: &TemplateOptions,
    ) -> Result<Vec<u8>, ServerError> {
        let command = format!("export-rows/{}.txt", self.id);
        let engine_json = engine.to_json();
        let mut form: Vec<(&str, &str)> = vec![
            ("project", &self.id),
            ("engine", &engine_json),
            ("format", "template"),
            ("template", &options.template),
        ];
        if let Some(prefix) = options.prefix.as_deref() {
            form.push(("prefix", prefix));
        }
        if let Some(suffix) = options.suffix.as_deref() {
            form.push(("suffix", suffix));
        }
        if let Some(separator) = options.row_separator.as_deref() {
            form.push(("separator", separator));
        }
        self.server.post_raw(&command, &[], &form)
    }

    /// Delete this project; true means the server confirmed it
    pub fn delete(self) -> Result<bool, ServerError> {
        let response: CodeResponse =
            self.server
                .post("delete-project", &[], &[("project", &self.id)])?;
        Ok(response.code == "ok")
    }
}
