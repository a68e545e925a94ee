//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::PathBuf;

/// Default server address when nothing else is configured
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3333;

/// Connection configuration with layered hierarchy
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server hostname
    pub host: Option<String>,

    /// Server port
    pub port: Option<u16>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (applied at resolution time)

        // 2. Global user config (~/.config/refinery/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                if let Ok(contents) = std::fs::read_to_string(&global_path) {
                    if let Ok(global) = serde_yml::from_str::<Config>(&contents) {
                        config.merge(global);
                    }
                }
            }
        }

        // 3. Environment variables (REFINERY_HOST / REFINERY_PORT are also
        //    picked up by clap; this covers library callers)
        if let Ok(host) = std::env::var("REFINERY_HOST") {
            if !host.is_empty() {
                config.host = Some(host);
            }
        }
        if let Ok(port) = std::env::var("REFINERY_PORT") {
            if let Ok(port) = port.parse() {
                config.port = Some(port);
            }
        }

        config
    }

    /// Get the path to the global config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "refinery")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.host.is_some() {
            self.host = other.host;
        }
        if other.port.is_some() {
            self.port = other.port;
        }
    }

    /// Resolve the server base URL, giving explicit overrides (CLI flags)
    /// precedence over config and defaults.
    pub fn base_url(&self, host_override: Option<&str>, port_override: Option<u16>) -> String {
        let host = host_override
            .map(str::to_string)
            .or_else(|| self.host.clone())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = port_override
            .or(self.port)
            .unwrap_or(DEFAULT_PORT);

        // Accept a full URL in the host slot (e.g. "https://refine.example")
        if host.contains("://") {
            host.trim_end_matches('/').to_string()
        } else {
            format!("http://{}:{}", host, port)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_defaults() {
        let config = Config::default();
        assert_eq!(config.base_url(None, None), "http://127.0.0.1:3333");
    }

    #[test]
    fn test_base_url_overrides_win() {
        let config = Config {
            host: Some("refine.internal".to_string()),
            port: Some(8080),
        };
        assert_eq!(config.base_url(None, None), "http://refine.internal:8080");
        assert_eq!(
            config.base_url(Some("10.0.0.1"), Some(3334)),
            "http://10.0.0.1:3334"
        );
    }

    #[test]
    fn test_base_url_full_url_host() {
        let config = Config::default();
        assert_eq!(
            config.base_url(Some("https://refine.example/"), None),
            "https://refine.example"
        );
    }

    #[test]
    fn test_merge_precedence() {
        let mut config = Config {
            host: Some("a".to_string()),
            port: None,
        };
        config.merge(Config {
            host: None,
            port: Some(9000),
        });
        assert_eq!(config.host.as_deref(), Some("a"));
        assert_eq!(config.port, Some(9000));
    }
}
