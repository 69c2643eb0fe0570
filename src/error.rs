//! Errors for the workbench's outer layers
//!
//! Hashing and validation never fail; these cover loading configuration,
//! talking to the upstream node and reading header files.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Config error: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Upstream RPC error: {0}")]
    Rpc(String),
    #[error("Upstream node returned error {code}: {message}")]
    RpcResponse { code: i64, message: String },
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Rpc(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
