//! Editable block wrapper
//!
//! Pairs a live header with the snapshot taken when it was loaded.

use serde::Serialize;

use crate::header::BlockHeader;

/// A loaded block that may be edited and restored
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditableBlock {
    /// Current, possibly edited, header
    #[serde(flatten)]
    pub header: BlockHeader,
    /// Snapshot taken at load time. Never mutated.
    original_data: BlockHeader,
    /// Whether an editor currently has this block open
    pub is_editing: bool,
    /// Set on the first edit, cleared only by restoring
    pub is_modified: bool,
    /// Verdict of the last hash check; fresh blocks are not checked
    pub is_valid_hash: bool,
}

impl EditableBlock {
    /// Wrap a freshly loaded header.
    ///
    /// No validation happens on load: the block starts out valid.
    pub fn new(header: BlockHeader) -> Self {
        Self {
            original_data: header.clone(),
            header,
            is_editing: false,
            is_modified: false,
            is_valid_hash: true,
        }
    }

    /// The header as it was loaded
    pub fn original(&self) -> &BlockHeader {
        &self.original_data
    }

    /// Block number for reports, falling back to the list position
    pub fn number_or(&self, index: usize) -> u64 {
        self.header.block_number().unwrap_or(index as u64)
    }

    /// A copy of this block with the snapshot fields put back.
    ///
    /// Clears the modified flag and marks the hash valid without checking it.
    /// Linkage to neighbouring blocks is not repaired.
    pub fn restored(&self) -> Self {
        Self::new(self.original_data.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::{HeaderField, RpcBlock};

    fn header() -> BlockHeader {
        let mut header = BlockHeader::from_rpc(RpcBlock::default());
        header.number = "4".into();
        header.hash = "0xaa".into();
        header
    }

    #[test]
    fn test_new_block_is_clean() {
        let block = EditableBlock::new(header());
        assert!(!block.is_modified);
        assert!(!block.is_editing);
        assert!(block.is_valid_hash);
        assert_eq!(block.original(), &block.header);
    }

    #[test]
    fn test_restored_drops_edits() {
        let mut block = EditableBlock::new(header());
        block.header.set_field(HeaderField::Miner, "0x01");
        block.is_modified = true;
        block.is_valid_hash = false;
        block.is_editing = true;

        let restored = block.restored();
        assert_eq!(restored.header, header());
        assert!(!restored.is_modified);
        assert!(!restored.is_editing);
        assert!(restored.is_valid_hash);
    }

    #[test]
    fn test_number_fallback() {
        let mut block = EditableBlock::new(header());
        assert_eq!(block.number_or(9), 4);
        block.header.number = "N/A".into();
        assert_eq!(block.number_or(9), 9);
    }

    #[test]
    fn test_serializes_flat() {
        let block = EditableBlock::new(header());
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["number"], "4");
        assert_eq!(json["isValidHash"], true);
        assert_eq!(json["originalData"]["hash"], "0xaa");
    }
}
