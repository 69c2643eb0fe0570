//! Whole-chain validation
//!
//! Independent of editing: walks the list once, checking each block's hash
//! verdict and its link to the block before it.

use serde::Serialize;

use super::{verify_block_hash, EditableBlock};
use crate::crypto::{hashes_match, HeaderDigest};

/// Result of validating a block list. Entries are block numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainReport {
    /// Whether no block failed either check
    pub is_valid: bool,
    /// Blocks that passed both checks
    pub valid_blocks: Vec<u64>,
    /// Blocks whose hash check failed
    pub hash_mismatches: Vec<u64>,
    /// Blocks whose parent hash differs from the previous block's hash
    pub broken_links: Vec<u64>,
}

/// Overall verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainStatus {
    Valid,
    Invalid,
}

/// Human-readable validation summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationStatus {
    pub status: ChainStatus,
    pub message: String,
    pub details: Vec<String>,
}

impl ChainReport {
    /// Summarize the report for display
    pub fn status(&self) -> ValidationStatus {
        if self.is_valid {
            return ValidationStatus {
                status: ChainStatus::Valid,
                message: "Blockchain is valid".to_string(),
                details: vec![
                    "All blocks have correct hashes".to_string(),
                    "All parent hash references are correct".to_string(),
                ],
            };
        }

        let mut details = Vec::new();
        if !self.hash_mismatches.is_empty() {
            details.push(format!("Blocks with invalid hashes: {}", join(&self.hash_mismatches)));
        }
        if !self.broken_links.is_empty() {
            details.push(format!(
                "Blocks with broken parent hash chain: {}",
                join(&self.broken_links)
            ));
        }

        ValidationStatus {
            status: ChainStatus::Invalid,
            message: "Blockchain integrity compromised".to_string(),
            details,
        }
    }
}

/// Validate hash verdicts and parent linkage across the whole list.
///
/// The first block has no predecessor in the list and is never a broken link.
pub fn validate_chain(blocks: &[EditableBlock], digest: HeaderDigest) -> ChainReport {
    let mut report = ChainReport::default();

    for (i, block) in blocks.iter().enumerate() {
        let number = block.number_or(i);

        let hash_ok = verify_block_hash(block, digest);
        if !hash_ok {
            report.hash_mismatches.push(number);
        }

        let link_ok = match i.checked_sub(1).map(|p| &blocks[p]) {
            Some(previous) => hashes_match(&block.header.parent_hash, &previous.header.hash),
            None => true,
        };
        if !link_ok {
            report.broken_links.push(number);
        }

        if hash_ok && link_ok {
            report.valid_blocks.push(number);
        }
    }

    report.is_valid = report.hash_mismatches.is_empty() && report.broken_links.is_empty();
    report
}

fn join(numbers: &[u64]) -> String {
    numbers
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::{apply_edit, EditEvent};
    use crate::header::{BlockHeader, HeaderField, RpcBlock};

    fn chain(len: usize) -> Vec<EditableBlock> {
        let mut blocks = Vec::with_capacity(len);
        let mut parent = format!("0x{}", "00".repeat(32));
        for n in 0..len {
            let mut header = BlockHeader::from_rpc(RpcBlock::default());
            header.number = (n + 10).to_string();
            header.parent_hash = parent.clone();
            header.hash = format!("0x{:064X}", n + 0xabc);
            parent = header.hash.to_lowercase();
            blocks.push(EditableBlock::new(header));
        }
        blocks
    }

    #[test]
    fn test_fresh_chain_is_valid() {
        let report = validate_chain(&chain(3), HeaderDigest::Sha256);
        assert!(report.is_valid);
        assert_eq!(report.valid_blocks, vec![10, 11, 12]);
        assert!(report.hash_mismatches.is_empty());
        assert!(report.broken_links.is_empty());
    }

    #[test]
    fn test_empty_chain_is_valid() {
        assert!(validate_chain(&[], HeaderDigest::Sha256).is_valid);
    }

    #[test]
    fn test_broken_link_detected_without_edit() {
        let mut blocks = chain(3);
        blocks[2].header.parent_hash = "0x1234".into();
        let report = validate_chain(&blocks, HeaderDigest::Sha256);
        assert!(!report.is_valid);
        assert_eq!(report.broken_links, vec![12]);
        assert!(report.hash_mismatches.is_empty());
    }

    #[test]
    fn test_edited_blocks_reported_as_mismatches() {
        let mut blocks = chain(3);
        apply_edit(&mut blocks, &EditEvent::new(1, HeaderField::GasUsed, "21000"), HeaderDigest::Sha256)
            .unwrap();
        let report = validate_chain(&blocks, HeaderDigest::Sha256);
        assert_eq!(report.hash_mismatches, vec![11, 12]);
        assert!(report.broken_links.is_empty());
        assert_eq!(report.valid_blocks, vec![10]);
    }

    #[test]
    fn test_status_messages() {
        let mut blocks = chain(2);
        assert_eq!(
            validate_chain(&blocks, HeaderDigest::Sha256).status().message,
            "Blockchain is valid"
        );

        blocks[1].header.parent_hash = "0x00".into();
        let status = validate_chain(&blocks, HeaderDigest::Sha256).status();
        assert_eq!(status.status, ChainStatus::Invalid);
        assert_eq!(status.message, "Blockchain integrity compromised");
        assert_eq!(status.details, vec!["Blocks with broken parent hash chain: 11".to_string()]);
    }
}
