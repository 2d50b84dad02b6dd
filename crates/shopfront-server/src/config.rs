//! Server configuration.

use std::net::SocketAddr;

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

use crate::logging::LogFormat;

/// Server configuration file.
///
/// Every field has a default, so an empty file (or no file) is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Completed orders between generated discount codes.
    #[serde(default = "default_discount_every")]
    pub discount_every: i64,

    /// Log output format.
    #[serde(default)]
    pub log_format: LogFormat,

    /// `tracing` filter directive, e.g. `info` or `shopfront_server=debug`.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Allow cross-origin requests from any origin.
    #[serde(default = "default_true")]
    pub cors: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_discount_every() -> i64 {
    3
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            discount_every: default_discount_every(),
            log_format: LogFormat::default(),
            log_filter: default_log_filter(),
            cors: true,
        }
    }
}

impl ServerConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        Self::parse(path, &content)
    }

    /// Parse config text, choosing JSON or TOML by the file extension.
    pub fn parse(path: &str, content: &str) -> Result<Self> {
        if path.ends_with(".json") {
            serde_json::from_str(content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(content).with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Check values that serde cannot.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.discount_every >= 1 && u32::try_from(self.discount_every).is_ok(),
            "discount_every must be a positive integer, got {}",
            self.discount_every
        );
        ensure!(!self.log_filter.trim().is_empty(), "log_filter must not be empty");
        self.socket_addr()?;
        Ok(())
    }

    /// Address to bind.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid listen address: {}:{}", self.host, self.port))
    }
}
