//! Server-level operations: list, version, create, and project lookup

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

use crate::core::multipart::MultipartBody;
use crate::core::project::Project;
use crate::core::server::{project_id_from_location, Server, ServerError};
use crate::entities::{ProjectMetadata, VersionInfo};

/// Errors from project-level lookup and creation
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Server(#[from] ServerError),

    #[error("no project found with name '{name}'; try `refinery list`")]
    NoSuchProject { name: String },

    #[error("found {count} projects named '{name}' ({ids}); specify the project by id")]
    AmbiguousProject {
        name: String,
        count: usize,
        ids: String,
    },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

/// Import options for project creation.
///
/// Only fields the user set are serialized; the server fills in its own
/// defaults for the rest. Field names match the server's import option keys.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub project_tags: Vec<String>,

    /// Import format id; guessed from the file extension when unset
    #[serde(skip)]
    pub format: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub separator: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_lines: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_lines: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_data_lines: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines_per_row: Option<i64>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub column_widths: Vec<i64>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sheets: Vec<i64>,

    /// Record path for tree-shaped imports (xml, json)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub record_path: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub guess_cell_value_types: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub process_quotes: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_blank_rows: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_blank_cells_as_nulls: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_empty_strings: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub trim_strings: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_file_sources: Option<bool>,
}

/// Map a filename extension to the server's import format id
pub fn guess_format(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "csv" | "tsv" => Some("text/line-based/*sv"),
        "txt" => Some("text/line-based"),
        "xml" => Some("text/xml"),
        "json" => Some("text/json"),
        "xls" | "xlsx" => Some("binary/text/xml/xls/xlsx"),
        "ods" => Some("text/xml/ods"),
        _ => None,
    }
}

#[derive(Debug, Deserialize)]
struct ProjectList {
    #[serde(default)]
    projects: BTreeMap<String, ProjectMetadata>,
}

/// Client for operations that are not bound to one project
pub struct Client {
    server: Server,
}

impl Client {
    pub fn new(server: Server) -> Self {
        Client { server }
    }

    pub fn server(&self) -> &Server {
        &self.server
    }

    /// All projects on the server, keyed by id
    pub fn list_projects(&self) -> Result<BTreeMap<String, ProjectMetadata>, ClientError> {
        let list: ProjectList = self.server.get("get-all-project-metadata", &[])?;
        Ok(list.projects)
    }

    /// Server version strings
    pub fn get_version(&self) -> Result<VersionInfo, ClientError> {
        Ok(self.server.get("get-version", &[])?)
    }

    /// Upload a file as a new project and return a handle to it.
    ///
    /// The new project's id arrives in the redirect location of the upload
    /// response; anything but a redirect is a failed import.
    pub fn create_project(
        &self,
        path: &Path,
        options: &CreateOptions,
    ) -> Result<Project<'_>, ClientError> {
        let contents = std::fs::read(path).map_err(|source| ClientError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let project_name = options
            .project_name
            .clone()
            .unwrap_or_else(|| filename.clone());
        let format = options
            .format
            .clone()
            .or_else(|| guess_format(path).map(str::to_string));

        let mut body = MultipartBody::new();
        body.add_text("project-name", &project_name);
        if let Some(format) = format.as_deref() {
            body.add_text("format", format);
        }
        let options_json =
            serde_json::to_string(options).expect("create options serialization is infallible");
        body.add_text("options", &options_json);
        body.add_file("project-file", &filename, &contents);

        let response = self
            .server
            .post_multipart("create-project-from-upload", &[], body)?;
        if !(300..400).contains(&response.status()) {
            return Err(ServerError::MissingRedirect.into());
        }
        let location = response
            .header("Location")
            .ok_or(ServerError::MissingRedirect)?;
        let id = project_id_from_location(location)?;
        Ok(Project::new(&self.server, id))
    }

    /// Open a project by numeric id or by name.
    ///
    /// Names resolve through the project list; zero matches and multiple
    /// matches are distinct errors, the latter listing candidate ids.
    pub fn open_project(&self, name_or_id: &str) -> Result<Project<'_>, ClientError> {
        if !name_or_id.is_empty() && name_or_id.chars().all(|c| c.is_ascii_digit()) {
            return Ok(Project::new(&self.server, name_or_id.to_string()));
        }
        let projects = self.list_projects()?;
        let ids: Vec<&String> = projects
            .iter()
            .filter(|(_, meta)| meta.name == name_or_id)
            .map(|(id, _)| id)
            .collect();
        match ids.as_slice() {
            [] => Err(ClientError::NoSuchProject {
                name: name_or_id.to_string(),
            }),
            [id] => Ok(Project::new(&self.server, (*id).clone())),
            many => Err(ClientError::AmbiguousProject {
                name: name_or_id.to_string(),
                count: many.len(),
                ids: many
                    .iter()
                    .map(|s| s.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            }),
        }
    }
}
