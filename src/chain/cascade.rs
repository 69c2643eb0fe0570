//! Hash recomputation cascades
//!
//! An edit to block `i` changes its hash, which changes block `i + 1`'s
//! parent reference, which changes its hash, and so on to the tip.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::EditableBlock;
use crate::crypto::{hashes_match, HeaderDigest};
use crate::header::{compute_header_hash, HeaderField};

/// Rejected edit events
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("Block index {index} out of range (chain has {len} blocks)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Field {0} cannot be edited")]
    ReadOnlyField(HeaderField),
}

/// A single field edit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditEvent {
    pub block_index: usize,
    pub field: HeaderField,
    pub value: String,
}

impl EditEvent {
    pub fn new(block_index: usize, field: HeaderField, value: impl Into<String>) -> Self {
        Self {
            block_index,
            field,
            value: value.into(),
        }
    }
}

/// Hash verdict for one block.
///
/// Untouched blocks are never checked. A modified block can only be valid
/// under the network-native digest, and then only if its stored hash matches
/// the recomputed one.
pub fn verify_block_hash(block: &EditableBlock, digest: HeaderDigest) -> bool {
    if !block.is_modified {
        return true;
    }

    let calculated = compute_header_hash(&block.header, digest);
    let is_valid = digest.is_network_native() && hashes_match(&calculated, &block.header.hash);

    if !is_valid {
        tracing::warn!(
            block = %block.header.number,
            expected = %block.header.hash,
            calculated = %calculated,
            digest = %digest,
            "hash mismatch on modified block"
        );
    }

    is_valid
}

/// Recompute the edited block and every block after it.
///
/// Blocks before `edited_index` are left alone. An out-of-range index is a
/// no-op.
pub fn recalculate_from(blocks: &mut [EditableBlock], edited_index: usize, digest: HeaderDigest) {
    if edited_index >= blocks.len() {
        return;
    }

    rehash(&mut blocks[edited_index], digest);

    for i in edited_index + 1..blocks.len() {
        let parent_hash = blocks[i - 1].header.hash.clone();
        let block = &mut blocks[i];
        block.header.parent_hash = parent_hash;
        rehash(block, digest);
    }
}

/// Recompute every block from the first
pub fn recalculate_all(blocks: &mut [EditableBlock], digest: HeaderDigest) {
    recalculate_from(blocks, 0, digest);
}

/// Apply an edit event and cascade it down the chain
pub fn apply_edit(
    blocks: &mut [EditableBlock],
    edit: &EditEvent,
    digest: HeaderDigest,
) -> Result<(), EditError> {
    if !edit.field.is_editable() {
        return Err(EditError::ReadOnlyField(edit.field));
    }
    let len = blocks.len();
    let block = blocks
        .get_mut(edit.block_index)
        .ok_or(EditError::IndexOutOfRange { index: edit.block_index, len })?;

    block.header.set_field(edit.field, edit.value.clone());
    tracing::debug!(
        index = edit.block_index,
        field = %edit.field,
        value = %edit.value,
        "applying block edit"
    );

    recalculate_from(blocks, edit.block_index, digest);
    Ok(())
}

/// Put a block's snapshot back. Does not cascade.
pub fn restore_original(block: &EditableBlock) -> EditableBlock {
    block.restored()
}

fn rehash(block: &mut EditableBlock, digest: HeaderDigest) {
    block.is_modified = true;
    block.header.hash = compute_header_hash(&block.header, digest);
    block.is_valid_hash = verify_block_hash(block, digest);
    tracing::debug!(block = %block.header.number, hash = %block.header.hash, "recomputed block hash");
}
