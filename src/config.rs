//! Server configuration.
//!
//! Loaded from the YAML file named by `HEARTH_CONFIG` when set; every field
//! has a default, so an empty file (or no file) is a valid configuration.
//! `LISTEN` overrides the listen address last.

use std::path::PathBuf;

use anyhow::Context;
use serde::Deserialize;

use crate::http::connection::DEFAULT_READ_BUFFER_SIZE;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub static_files: StaticConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    /// Bytes taken from the socket in the single read per connection
    pub read_buffer_size: usize,
    /// Cap on connections handled at once; unbounded when absent
    pub max_connections: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StaticConfig {
    pub root: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
            max_connections: None,
        }
    }
}

impl Default for StaticConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("static"),
        }
    }
}

impl Config {
    pub fn load() -> Self {
        let mut cfg = match std::env::var("HEARTH_CONFIG") {
            Ok(path) => Self::from_file(&path).unwrap_or_else(|e| {
                tracing::warn!("Using default configuration: {:#}", e);
                Self::default()
            }),
            Err(_) => Self::default(),
        };

        if let Ok(listen_addr) = std::env::var("LISTEN") {
            cfg.server.listen_addr = listen_addr;
        }

        cfg
    }

    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path))?;
        Self::from_yaml(&raw).with_context(|| format!("invalid config file {}", path))
    }

    pub fn from_yaml(raw: &str) -> anyhow::Result<Self> {
        // An empty document deserializes to unit, not to a mapping.
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }

        let cfg: Config = serde_yaml::from_str(raw)?;

        if cfg.server.read_buffer_size == 0 {
            anyhow::bail!("server.read_buffer_size must be greater than zero");
        }
        if cfg.server.max_connections == Some(0) {
            anyhow::bail!("server.max_connections must be greater than zero");
        }

        Ok(cfg)
    }
}
