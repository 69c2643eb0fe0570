//! HoneyMoney chain workbench core library
//!
//! Re-derives Ethereum-style block header hashes from their fields, cascades
//! the effect of an edited field down the hash chain, and reports where the
//! chain's integrity breaks.

pub mod chain;
pub mod config;
pub mod crypto;
pub mod encoding;
pub mod error;
pub mod header;
pub mod logging;
pub mod rpc;

pub use error::{Error, Result};

/// Workbench constants
pub mod constants {
    /// Number of header fields in the canonical encoding
    pub const HEADER_FIELD_COUNT: usize = 15;

    /// Default upstream node (a local development chain)
    pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";

    /// Default port for the workbench JSON-RPC API
    pub const DEFAULT_LISTEN_PORT: u16 = 8546;

    /// Version reported by `getinfo`
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
}
