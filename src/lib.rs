//! Refinery: command-line client for OpenRefine-compatible servers
//!
//! Issues HTTP requests against a remote data-cleaning server to create,
//! list, inspect, transform, export, and delete projects, and to drive the
//! server's faceted-filtering engine. All parsing and facet computation
//! happen server-side; this crate reflects server state per invocation.

pub mod cli;
pub mod core;
pub mod entities;
