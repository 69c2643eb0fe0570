//! Header canonicalization and hashing
//!
//! A header hashes as the RLP list of fifteen byte strings in a fixed order.
//! Malformed fields never abort hashing: they encode as empty strings and the
//! damage shows up as a hash mismatch instead.

use super::{BlockHeader, FieldKind, HeaderField};
use crate::constants::HEADER_FIELD_COUNT;
use crate::crypto::{Hash, HeaderDigest};
use crate::encoding::{hex_field_bytes, normalize_timestamp, numeric_field_bytes};

/// Canonical field order. Changing it changes every hash.
pub const CANONICAL_FIELD_ORDER: [HeaderField; HEADER_FIELD_COUNT] = [
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
];

/// Byte string for a single field
pub fn field_bytes(header: &BlockHeader, field: HeaderField) -> Vec<u8> {
    let value = header.field(field);
    match field.kind() {
        FieldKind::Bytes => hex_field_bytes(value),
        FieldKind::Scalar => numeric_field_bytes(value),
        FieldKind::Timestamp => numeric_field_bytes(&normalize_timestamp(value)),
        FieldKind::Identity => Vec::new(),
    }
}

/// The fifteen byte strings that make up the canonical encoding
pub fn canonical_fields(header: &BlockHeader) -> [Vec<u8>; HEADER_FIELD_COUNT] {
    CANONICAL_FIELD_ORDER.map(|field| field_bytes(header, field))
}

/// RLP-encode the header's canonical fields
pub fn encode_header(header: &BlockHeader) -> Vec<u8> {
    let fields = canonical_fields(header);
    let mut out = Vec::new();
    alloy_rlp::encode_list::<_, [u8]>(&fields[..], &mut out);
    out
}

/// Digest of the canonical encoding
pub fn header_digest(header: &BlockHeader, digest: HeaderDigest) -> Hash {
    digest.digest(&encode_header(header))
}

/// Recompute a header's hash as `0x`-prefixed hex
pub fn compute_header_hash(header: &BlockHeader, digest: HeaderDigest) -> String {
    header_digest(header, digest).to_hex()
}
