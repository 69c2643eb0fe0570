//! Chain session state
//!
//! Holds the loaded block list and the digest in use. Owned by whoever
//! drives the workbench; there is no process-wide chain state.

use serde::Serialize;

use super::{
    apply_edit, restore_original, validate_chain, ChainReport, EditError, EditEvent,
    EditableBlock,
};
use crate::crypto::HeaderDigest;
use crate::header::BlockHeader;

/// Summary counters for the loaded chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    pub block_count: usize,
    pub latest_block: Option<u64>,
    pub modified_count: usize,
    pub digest: HeaderDigest,
}

/// Editable chain plus the digest used to rehash it
#[derive(Debug, Clone, Default)]
pub struct ChainSession {
    blocks: Vec<EditableBlock>,
    digest: HeaderDigest,
}

impl ChainSession {
    /// Create an empty session
    pub fn new(digest: HeaderDigest) -> Self {
        Self {
            blocks: Vec::new(),
            digest,
        }
    }

    /// Create a session over freshly loaded headers
    pub fn with_headers(headers: Vec<BlockHeader>, digest: HeaderDigest) -> Self {
        let mut session = Self::new(digest);
        session.load(headers);
        session
    }

    /// Discard every block and rebuild from fresh headers
    pub fn load(&mut self, headers: Vec<BlockHeader>) {
        self.blocks = headers.into_iter().map(EditableBlock::new).collect();
        tracing::info!(blocks = self.blocks.len(), "chain session loaded");
    }

    pub fn digest(&self) -> HeaderDigest {
        self.digest
    }

    pub fn blocks(&self) -> &[EditableBlock] {
        &self.blocks
    }

    pub fn get(&self, index: usize) -> Option<&EditableBlock> {
        self.blocks.get(index)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Find a block by its number
    pub fn block_by_number(&self, number: u64) -> Option<&EditableBlock> {
        self.blocks
            .iter()
            .find(|block| block.header.block_number() == Some(number))
    }

    /// The block with the highest number
    pub fn latest_block(&self) -> Option<&EditableBlock> {
        self.blocks
            .iter()
            .enumerate()
            .max_by_key(|(i, block)| block.number_or(*i))
            .map(|(_, block)| block)
    }

    /// Apply an edit and cascade it through the following blocks
    pub fn edit(&mut self, edit: &EditEvent) -> Result<(), EditError> {
        apply_edit(&mut self.blocks, edit, self.digest)
    }

    /// Flip a block's edit mode and return the new state
    pub fn toggle_edit_mode(&mut self, index: usize) -> Result<bool, EditError> {
        let block = self.block_mut(index)?;
        block.is_editing = !block.is_editing;
        Ok(block.is_editing)
    }

    /// Leave edit mode, keeping the edits
    pub fn save_changes(&mut self, index: usize) -> Result<(), EditError> {
        self.block_mut(index)?.is_editing = false;
        Ok(())
    }

    /// Leave edit mode, discarding the block's edits. Does not cascade.
    pub fn cancel_changes(&mut self, index: usize) -> Result<(), EditError> {
        self.restore(index)
    }

    /// Restore one block to its loaded state. Does not cascade.
    pub fn restore(&mut self, index: usize) -> Result<(), EditError> {
        let block = self.block_mut(index)?;
        *block = restore_original(block);
        Ok(())
    }

    /// Restore every block
    pub fn restore_all(&mut self) {
        for block in &mut self.blocks {
            *block = restore_original(block);
        }
    }

    /// Run the whole-chain validation pass
    pub fn validate(&self) -> ChainReport {
        validate_chain(&self.blocks, self.digest)
    }

    pub fn stats(&self) -> SessionStats {
        SessionStats {
            block_count: self.blocks.len(),
            latest_block: self
                .latest_block()
                .and_then(|block| block.header.block_number()),
            modified_count: self.blocks.iter().filter(|b| b.is_modified).count(),
            digest: self.digest,
        }
    }

    fn block_mut(&mut self, index: usize) -> Result<&mut EditableBlock, EditError> {
        let len = self.blocks.len();
        self.blocks
            .get_mut(index)
            .ok_or(EditError::IndexOutOfRange { index, len })
    }
}
