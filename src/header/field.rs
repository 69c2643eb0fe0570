//! Named header fields
//!
//! Edit events address fields by their JSON-RPC (camelCase) names.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a field is turned into bytes for the canonical encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Hex text decoded to raw bytes
    Bytes,
    /// Unsigned integer as minimal big-endian bytes
    Scalar,
    /// Timestamp, normalized then encoded as a scalar
    Timestamp,
    /// Not part of the canonical encoding
    Identity,
}

/// A block header field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HeaderField {
    ParentHash,
    Sha3Uncles,
    Miner,
    StateRoot,
    TransactionsRoot,
    ReceiptsRoot,
    LogsBloom,
    Difficulty,
    Number,
    GasLimit,
    GasUsed,
    Timestamp,
    ExtraData,
    MixHash,
    Nonce,
    Hash,
}

impl HeaderField {
    /// Every field, canonical order first, then the block hash
    pub const ALL: [HeaderField; 16] = [
        HeaderField::ParentHash,
        HeaderField::Sha3Uncles,
        HeaderField::Miner,
        HeaderField::StateRoot,
        HeaderField::TransactionsRoot,
        HeaderField::ReceiptsRoot,
        HeaderField::LogsBloom,
        HeaderField::Difficulty,
        HeaderField::Number,
        HeaderField::GasLimit,
        HeaderField::GasUsed,
        HeaderField::Timestamp,
        HeaderField::ExtraData,
        HeaderField::MixHash,
        HeaderField::Nonce,
        HeaderField::Hash,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HeaderField::ParentHash => "parentHash",
            HeaderField::Sha3Uncles => "sha3Uncles",
            HeaderField::Miner => "miner",
            HeaderField::StateRoot => "stateRoot",
            HeaderField::TransactionsRoot => "transactionsRoot",
            HeaderField::ReceiptsRoot => "receiptsRoot",
            HeaderField::LogsBloom => "logsBloom",
            HeaderField::Difficulty => "difficulty",
            HeaderField::Number => "number",
            HeaderField::GasLimit => "gasLimit",
            HeaderField::GasUsed => "gasUsed",
            HeaderField::Timestamp => "timestamp",
            HeaderField::ExtraData => "extraData",
            HeaderField::MixHash => "mixHash",
            HeaderField::Nonce => "nonce",
            HeaderField::Hash => "hash",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            HeaderField::Difficulty
            | HeaderField::Number
            | HeaderField::GasLimit
            | HeaderField::GasUsed => FieldKind::Scalar,
            HeaderField::Timestamp => FieldKind::Timestamp,
            HeaderField::Hash => FieldKind::Identity,
            _ => FieldKind::Bytes,
        }
    }

    /// Whether an edit event may change this field.
    ///
    /// The block number identifies the block and the hash is derived.
    pub fn is_editable(&self) -> bool {
        !matches!(self, HeaderField::Number | HeaderField::Hash)
    }
}

impl fmt::Display for HeaderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HeaderField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HeaderField::ALL
            .iter()
            .find(|field| field.as_str() == s)
            .copied()
            .ok_or_else(|| format!("unknown header field: {s}"))
    }
}
