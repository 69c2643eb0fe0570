//! Block header as loaded from the node
//!
//! Fields are kept as text, the way they are displayed and edited. Numeric
//! fields hold decimal text and the timestamp holds ISO-8601 text once a raw
//! RPC block has been converted; the canonicalizer accepts every form.

use serde::{Deserialize, Serialize};

use super::HeaderField;
use crate::encoding::{format_timestamp, hex_field_bytes, parse_u64, strip_hex_prefix};

/// Placeholder for absent hash-like fields
const MISSING_HASH: &str = "0x0";
/// Placeholder for absent identity fields
const MISSING_TEXT: &str = "N/A";

/// Raw block record as returned by `eth_getBlockByNumber`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcBlock {
    pub number: Option<String>,
    pub hash: Option<String>,
    pub parent_hash: Option<String>,
    pub sha3_uncles: Option<String>,
    pub miner: Option<String>,
    pub state_root: Option<String>,
    pub transactions_root: Option<String>,
    pub receipts_root: Option<String>,
    pub logs_bloom: Option<String>,
    pub difficulty: Option<String>,
    pub gas_limit: Option<String>,
    pub gas_used: Option<String>,
    pub timestamp: Option<String>,
    pub extra_data: Option<String>,
    pub mix_hash: Option<String>,
    pub nonce: Option<String>,
    #[serde(default)]
    pub transactions: Vec<serde_json::Value>,
}

/// Block header with every field as text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockHeader {
    pub number: String,
    pub timestamp: String,
    pub miner: String,
    pub parent_hash: String,
    pub hash: String,
    pub gas_limit: String,
    pub gas_used: String,
    pub difficulty: String,
    pub nonce: String,
    pub extra_data: String,
    pub state_root: String,
    pub transactions_root: String,
    pub receipts_root: String,
    pub logs_bloom: String,
    pub sha3_uncles: String,
    pub mix_hash: String,
    /// Transactions are carried along untouched; they are not hashed.
    #[serde(default)]
    pub transactions: Vec<serde_json::Value>,
}

impl BlockHeader {
    /// Convert a raw RPC block into its display form.
    pub fn from_rpc(block: RpcBlock) -> Self {
        let timestamp = block
            .timestamp
            .as_deref()
            .and_then(parse_u64)
            .map(format_timestamp)
            .unwrap_or_else(|| "0".to_string());

        Self {
            number: quantity_to_decimal(block.number.as_deref()),
            timestamp,
            miner: block.miner.unwrap_or_else(|| MISSING_TEXT.to_string()),
            parent_hash: block.parent_hash.unwrap_or_else(|| MISSING_HASH.to_string()),
            hash: block.hash.unwrap_or_else(|| MISSING_TEXT.to_string()),
            gas_limit: quantity_to_decimal(block.gas_limit.as_deref()),
            gas_used: quantity_to_decimal(block.gas_used.as_deref()),
            difficulty: quantity_to_decimal(block.difficulty.as_deref()),
            nonce: block.nonce.unwrap_or_else(|| MISSING_HASH.to_string()),
            extra_data: block.extra_data.unwrap_or_else(|| "0x".to_string()),
            state_root: block.state_root.unwrap_or_else(|| MISSING_HASH.to_string()),
            transactions_root: block
                .transactions_root
                .unwrap_or_else(|| MISSING_HASH.to_string()),
            receipts_root: block.receipts_root.unwrap_or_else(|| MISSING_HASH.to_string()),
            logs_bloom: block.logs_bloom.unwrap_or_else(|| MISSING_HASH.to_string()),
            sha3_uncles: block.sha3_uncles.unwrap_or_else(|| MISSING_HASH.to_string()),
            mix_hash: block.mix_hash.unwrap_or_else(|| MISSING_HASH.to_string()),
            transactions: block.transactions,
        }
    }

    /// Read a field by name
    pub fn field(&self, field: HeaderField) -> &str {
        match field {
            HeaderField::ParentHash => &self.parent_hash,
            HeaderField::Sha3Uncles => &self.sha3_uncles,
            HeaderField::Miner => &self.miner,
            HeaderField::StateRoot => &self.state_root,
            HeaderField::TransactionsRoot => &self.transactions_root,
            HeaderField::ReceiptsRoot => &self.receipts_root,
            HeaderField::LogsBloom => &self.logs_bloom,
            HeaderField::Difficulty => &self.difficulty,
            HeaderField::Number => &self.number,
            HeaderField::GasLimit => &self.gas_limit,
            HeaderField::GasUsed => &self.gas_used,
            HeaderField::Timestamp => &self.timestamp,
            HeaderField::ExtraData => &self.extra_data,
            HeaderField::MixHash => &self.mix_hash,
            HeaderField::Nonce => &self.nonce,
            HeaderField::Hash => &self.hash,
        }
    }

    /// Overwrite a field by name
    pub fn set_field(&mut self, field: HeaderField, value: impl Into<String>) {
        let slot = match field {
            HeaderField::ParentHash => &mut self.parent_hash,
            HeaderField::Sha3Uncles => &mut self.sha3_uncles,
            HeaderField::Miner => &mut self.miner,
            HeaderField::StateRoot => &mut self.state_root,
            HeaderField::TransactionsRoot => &mut self.transactions_root,
            HeaderField::ReceiptsRoot => &mut self.receipts_root,
            HeaderField::LogsBloom => &mut self.logs_bloom,
            HeaderField::Difficulty => &mut self.difficulty,
            HeaderField::Number => &mut self.number,
            HeaderField::GasLimit => &mut self.gas_limit,
            HeaderField::GasUsed => &mut self.gas_used,
            HeaderField::Timestamp => &mut self.timestamp,
            HeaderField::ExtraData => &mut self.extra_data,
            HeaderField::MixHash => &mut self.mix_hash,
            HeaderField::Nonce => &mut self.nonce,
            HeaderField::Hash => &mut self.hash,
        };
        *slot = value.into();
    }

    /// Block number as an integer, if it parses
    pub fn block_number(&self) -> Option<u64> {
        parse_u64(&self.number)
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }
}

/// Hex quantity to decimal text. Values wider than 128 bits keep their hex
/// form, which the canonicalizer accepts unchanged.
fn quantity_to_decimal(value: Option<&str>) -> String {
    let Some(value) = value else {
        return "0".to_string();
    };
    let bytes = hex_field_bytes(value);
    let significant: Vec<u8> = bytes.iter().copied().skip_while(|b| *b == 0).collect();
    if significant.len() > 16 {
        return format!("0x{}", strip_hex_prefix(value));
    }
    let mut buf = [0u8; 16];
    buf[16 - significant.len()..].copy_from_slice(&significant);
    u128::from_be_bytes(buf).to_string()
}
