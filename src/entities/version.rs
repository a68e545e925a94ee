//! Server version record

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct VersionInfo {
    #[serde(default)]
    pub revision: String,

    #[serde(default)]
    pub version: String,

    #[serde(default)]
    pub full_version: String,

    /// Human-readable product name and version
    #[serde(default)]
    pub full_name: String,
}
