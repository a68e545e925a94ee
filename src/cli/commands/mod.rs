//! CLI command implementations

pub mod apply;
pub mod completions;
pub mod create;
pub mod delete;
pub mod download;
pub mod export;
pub mod facet;
pub mod info;
pub mod list;
pub mod rows;
pub mod version;
