//! Workbench configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::{DEFAULT_LISTEN_PORT, DEFAULT_RPC_URL};
use crate::crypto::HeaderDigest;
use crate::error::{Error, Result};
use crate::logging::LogFormat;

/// Configuration for the workbench server and CLI.
///
/// Every field has a default, so an empty file is a valid config.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// JSON-RPC endpoint of the node blocks are loaded from.
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,

    /// Port the workbench API listens on.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// Digest used to rehash edited headers.
    #[serde(default)]
    pub digest: HeaderDigest,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter, e.g. "info" or "debug,honey_core=trace".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Timeout for each upstream request.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Load at most this many blocks from the tip backwards; 0 loads all.
    #[serde(default)]
    pub max_blocks: u64,
}

fn default_rpc_url() -> String {
    DEFAULT_RPC_URL.to_string()
}

fn default_listen_port() -> u16 {
    DEFAULT_LISTEN_PORT
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| Error::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            listen_port: default_listen_port(),
            digest: HeaderDigest::default(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            request_timeout_secs: default_request_timeout_secs(),
            max_blocks: 0,
        }
    }
}
