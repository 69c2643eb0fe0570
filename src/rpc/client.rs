//! Upstream node client
//!
//! Fetches raw blocks over Ethereum JSON-RPC. Blocks are requested one at a
//! time, oldest first, so the resulting list is already in chain order.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::header::{BlockHeader, RpcBlock};

#[derive(Debug, Serialize)]
struct EthRequest<'a> {
    jsonrpc: &'static str,
    method: &'a str,
    params: serde_json::Value,
    id: u64,
}

#[derive(Debug, Deserialize)]
struct EthResponse {
    result: Option<serde_json::Value>,
    error: Option<EthError>,
}

#[derive(Debug, Deserialize)]
struct EthError {
    code: i64,
    message: String,
}

/// JSON-RPC client for an Ethereum-style node
#[derive(Debug, Clone)]
pub struct EthClient {
    http: reqwest::Client,
    url: String,
}

impl EthClient {
    /// Create a client for the given endpoint
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| Error::Rpc(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn call(&self, method: &str, params: serde_json::Value) -> Result<serde_json::Value> {
        let request = EthRequest {
            jsonrpc: "2.0",
            method,
            params,
            id: 1,
        };

        let response: EthResponse = self
            .http
            .post(&self.url)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(err) = response.error {
            return Err(Error::RpcResponse {
                code: err.code,
                message: err.message,
            });
        }
        response
            .result
            .ok_or_else(|| Error::Rpc(format!("{method}: response has no result")))
    }

    /// Current chain head number
    pub async fn block_number(&self) -> Result<u64> {
        let result = self.call("eth_blockNumber", serde_json::json!([])).await?;
        let hex = result
            .as_str()
            .ok_or_else(|| Error::Rpc("eth_blockNumber: expected hex string".into()))?;
        crate::encoding::parse_u64(hex)
            .ok_or_else(|| Error::Rpc(format!("eth_blockNumber: bad quantity {hex}")))
    }

    /// Raw block by number, with full transaction objects
    pub async fn block_by_number(&self, number: u64) -> Result<RpcBlock> {
        let result = self
            .call(
                "eth_getBlockByNumber",
                serde_json::json!([format!("0x{number:x}"), true]),
            )
            .await?;
        if result.is_null() {
            return Err(Error::Rpc(format!("block {number} not found")));
        }
        Ok(serde_json::from_value(result)?)
    }

    /// Load the chain up to the current head.
    ///
    /// With `max_blocks > 0` only the newest `max_blocks` blocks are loaded.
    pub async fn load_blocks(&self, max_blocks: u64) -> Result<Vec<BlockHeader>> {
        let latest = self.block_number().await?;
        let first = match max_blocks {
            0 => 0,
            limit => latest.saturating_sub(limit - 1),
        };
        let total = latest - first + 1;
        tracing::info!(url = %self.url, first, latest, total, "loading blocks");

        let mut headers = Vec::with_capacity(total as usize);
        for number in first..=latest {
            let block = self.block_by_number(number).await?;
            headers.push(BlockHeader::from_rpc(block));
            tracing::debug!(loaded = number - first + 1, total, "block loaded");
        }

        tracing::info!(count = headers.len(), latest, "blocks loaded");
        Ok(headers)
    }
}
