//! JSON-RPC Module
//!
//! Upstream client for loading blocks, plus the HTTP API the explorer UI
//! drives the workbench through.

mod client;
mod methods;
mod server;

pub use client::*;
pub use methods::*;
pub use server::*;
