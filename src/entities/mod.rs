//! Wire-shape records mirrored from server responses
//!
//! Every type here is a transient reflection of the last server response:
//!
//! - [`ProjectMetadata`] - name, timestamps, row count, tags
//! - [`ProjectModels`] / [`Column`] - column layout and key column
//! - [`Row`] / [`RowsResponse`] - row data with flags and filter counts
//! - [`Facet`] / [`FacetChoice`] - server-computed choice aggregations
//! - [`VersionInfo`] - server version strings
//!
//! Deserialization is tolerant of unknown fields so the client keeps working
//! as the server grows its payloads.

pub mod facet;
pub mod project;
pub mod row;
pub mod version;

pub use facet::{Facet, FacetChoice, FacetsResponse};
pub use project::{Column, ProjectMetadata, ProjectModels};
pub use row::{Cell, Row, RowsResponse};
pub use version::VersionInfo;
