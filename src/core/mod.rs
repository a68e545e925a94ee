//! Core module - client library for the remote data-cleaning server

pub mod client;
pub mod config;
pub mod engine;
pub mod multipart;
pub mod project;
pub mod server;

pub use client::{Client, ClientError, CreateOptions};
pub use config::Config;
pub use engine::{Engine, Mode, TextFacet};
pub use multipart::MultipartBody;
pub use project::Project;
pub use server::{Server, ServerError};
