//! HTTP transport against the server's command API
//!
//! Every operation is a GET or POST to `/command/core/<command>`. Responses
//! are JSON except exports, which stream raw bytes. Mutating POSTs carry a
//! CSRF token on servers that issue one; servers without the token endpoint
//! are tolerated.

use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::io::Read;
use std::time::Duration;
use thiserror::Error;

use crate::core::multipart::MultipartBody;

/// Errors that can occur while talking to the server
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to reach {url}: {message}")]
    Transport { url: String, message: String },

    #[error("server returned HTTP {status} for '{command}'")]
    Status { command: String, status: u16 },

    #[error("server error from '{command}': {message}")]
    Remote { command: String, message: String },

    #[error("malformed response from '{command}': {message}")]
    Malformed { command: String, message: String },

    #[error("project creation returned no redirect location")]
    MissingRedirect,

    #[error("no project id in redirect location '{location}'")]
    BadRedirect { location: String },
}

/// Connection to one server: base URL plus a blocking HTTP agent.
///
/// Redirects are disabled on the agent so the create endpoint's redirect
/// (which carries the new project id) can be inspected.
pub struct Server {
    base_url: String,
    agent: ureq::Agent,
    /// None = not fetched yet; Some(None) = server has no CSRF endpoint
    csrf: RefCell<Option<Option<String>>>,
}

impl Server {
    pub fn new(base_url: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .redirects(0)
            .timeout_connect(Duration::from_secs(10))
            .build();
        Server {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            agent,
            csrf: RefCell::new(None),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn command_url(&self, command: &str) -> String {
        format!("{}/command/core/{}", self.base_url, command)
    }

    /// GET a command endpoint and deserialize the JSON response
    pub fn get<T: DeserializeOwned>(
        &self,
        command: &str,
        params: &[(&str, &str)],
    ) -> Result<T, ServerError> {
        let url = self.command_url(command);
        let mut request = self.agent.get(&url);
        for (key, value) in params {
            request = request.query(key, value);
        }
        let response = request.call().map_err(|e| map_ureq(&url, command, e))?;
        decode(command, read_json(command, response)?)
    }

    /// POST a command endpoint with URL-encoded form fields and deserialize
    /// the JSON response. A CSRF token is attached when the server issues one.
    pub fn post<T: DeserializeOwned>(
        &self,
        command: &str,
        params: &[(&str, &str)],
        form: &[(&str, &str)],
    ) -> Result<T, ServerError> {
        let url = self.command_url(command);
        let token = self.csrf_token()?;
        let mut fields: Vec<(&str, &str)> = form.to_vec();
        if let Some(token) = token.as_deref() {
            fields.push(("csrf_token", token));
        }
        let mut request = self.agent.post(&url);
        for (key, value) in params {
            request = request.query(key, value);
        }
        let response = request
            .send_form(&fields)
            .map_err(|e| map_ureq(&url, command, e))?;
        decode(command, read_json(command, response)?)
    }

    /// POST a command endpoint and return the raw response body.
    ///
    /// Used by exports, where the body is the exported file, not JSON.
    pub fn post_raw(
        &self,
        command: &str,
        params: &[(&str, &str)],
        form: &[(&str, &str)],
    ) -> Result<Vec<u8>, ServerError> {
        let url = self.command_url(command);
        let token = self.csrf_token()?;
        let mut fields: Vec<(&str, &str)> = form.to_vec();
        if let Some(token) = token.as_deref() {
            fields.push(("csrf_token", token));
        }
        let mut request = self.agent.post(&url);
        for (key, value) in params {
            request = request.query(key, value);
        }
        let response = request
            .send_form(&fields)
            .map_err(|e| map_ureq(&url, command, e))?;
        let mut body = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut body)
            .map_err(|e| ServerError::Malformed {
                command: command.to_string(),
                message: e.to_string(),
            })?;
        Ok(body)
    }

    /// POST a multipart body and return the raw response, leaving redirect
    /// handling to the caller.
    pub fn post_multipart(
        &self,
        command: &str,
        params: &[(&str, &str)],
        body: MultipartBody,
    ) -> Result<ureq::Response, ServerError> {
        let url = self.command_url(command);
        let token = self.csrf_token()?;
        let mut request = self
            .agent
            .post(&url)
            .set("Content-Type", &body.content_type());
        for (key, value) in params {
            request = request.query(key, value);
        }
        if let Some(token) = token.as_deref() {
            request = request.query("csrf_token", token);
        }
        request
            .send_bytes(&body.finish())
            .map_err(|e| map_ureq(&url, command, e))
    }

    /// Fetch the CSRF token, caching the result for the process lifetime.
    ///
    /// A 404 or 400 from `get-csrf-token` marks the server as pre-CSRF.
    fn csrf_token(&self) -> Result<Option<String>, ServerError> {
        if let Some(cached) = self.csrf.borrow().clone() {
            return Ok(cached);
        }
        let url = self.command_url("get-csrf-token");
        let token = match self.agent.get(&url).call() {
            Ok(response) => {
                let value = read_json("get-csrf-token", response)?;
                value
                    .get("token")
                    .and_then(|t| t.as_str())
                    .map(str::to_string)
            }
            Err(ureq::Error::Status(404 | 400, _)) => None,
            Err(e) => return Err(map_ureq(&url, "get-csrf-token", e)),
        };
        *self.csrf.borrow_mut() = Some(token.clone());
        Ok(token)
    }
}

fn map_ureq(url: &str, command: &str, error: ureq::Error) -> ServerError {
    match error {
        ureq::Error::Status(status, _) => ServerError::Status {
            command: command.to_string(),
            status,
        },
        ureq::Error::Transport(t) => ServerError::Transport {
            url: url.to_string(),
            message: t.to_string(),
        },
    }
}

fn read_json(command: &str, response: ureq::Response) -> Result<serde_json::Value, ServerError> {
    response
        .into_json::<serde_json::Value>()
        .map_err(|e| ServerError::Malformed {
            command: command.to_string(),
            message: e.to_string(),
        })
}

/// Check the error envelope, then deserialize into the caller's shape.
///
/// The server reports command failures as a 200 with
/// `{"code": "error", "message": …}`.
fn decode<T: DeserializeOwned>(command: &str, value: serde_json::Value) -> Result<T, ServerError> {
    if value.get("code").and_then(|c| c.as_str()) == Some("error") {
        let message = value
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("unknown error")
            .to_string();
        return Err(ServerError::Remote {
            command: command.to_string(),
            message,
        });
    }
    serde_json::from_value(value).map_err(|e| ServerError::Malformed {
        command: command.to_string(),
        message: e.to_string(),
    })
}

/// Pull the project id out of a create redirect location
/// (`…/project?project=<id>`).
pub fn project_id_from_location(location: &str) -> Result<String, ServerError> {
    let query = location.split_once('?').map(|(_, q)| q).unwrap_or("");
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "project")
        .map(|(_, id)| id.to_string())
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ServerError::BadRedirect {
            location: location.to_string(),
        })
}
