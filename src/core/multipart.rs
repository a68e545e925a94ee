//! multipart/form-data body framing for project uploads
//!
//! The create endpoint takes the dataset as a file upload. The body is
//! framed by hand (RFC 7578): text fields, then the file part, then the
//! closing boundary.

use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

/// An in-memory multipart/form-data request body
#[derive(Debug)]
pub struct MultipartBody {
    boundary: String,
    buf: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        // Unique per process and request
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.subsec_nanos())
            .unwrap_or(0);
        let boundary = format!("----refinery-{}-{:08x}", process::id(), nanos);
        MultipartBody {
            boundary,
            buf: Vec::new(),
        }
    }

    #[cfg(test)]
    fn with_boundary(boundary: &str) -> Self {
        MultipartBody {
            boundary: boundary.to_string(),
            buf: Vec::new(),
        }
    }

    /// Append a plain text field
    pub fn add_text(&mut self, name: &str, value: &str) -> &mut Self {
        self.buf.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                self.boundary, name, value
            )
            .as_bytes(),
        );
        self
    }

    /// Append a file field with raw contents
    pub fn add_file(&mut self, name: &str, filename: &str, contents: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n",
                self.boundary, name, filename
            )
            .as_bytes(),
        );
        self.buf.extend_from_slice(contents);
        self.buf.extend_from_slice(b"\r\n");
        self
    }

    /// Content-Type header value for this body
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Close the body and return the final bytes
    pub fn finish(mut self) -> Vec<u8> {
        self.buf
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        self.buf
    }
}

impl Default for MultipartBody {
    fn default() -> Self {
        MultipartBody::new()
    }
}
