//! Tamper-cascade scenarios over small chains
//!
//! Chains are built so that every stored hash is the Keccak-256 header hash,
//! the way a real node reports them.

use honey_core::chain::{
    apply_edit, recalculate_all, recalculate_from, restore_original, validate_chain, ChainSession,
    ChainStatus, EditEvent, EditableBlock,
};
use honey_core::crypto::HeaderDigest;
use honey_core::header::{compute_header_hash, BlockHeader, HeaderField, RpcBlock};

const EMPTY_UNCLES: &str = "0x1dcc4de8dec75d7aab85b567b6ccd41ad312451b948a7413f0a142fd40d49347";
const EMPTY_TRIE: &str = "0x56e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b421";
const HARDHAT_MINER: &str = "0xc014ba5ec014ba5ec014ba5ec014ba5ec014ba5e";

/// A self-consistent chain of `len` headers with network-native hashes
fn native_chain(len: usize) -> Vec<BlockHeader> {
    let mut parent = format!("0x{}", "00".repeat(32));
    (0..len)
        .map(|n| {
            let mut header = BlockHeader::from_rpc(RpcBlock {
                number: Some(format!("0x{n:x}")),
                parent_hash: Some(parent.clone()),
                sha3_uncles: Some(EMPTY_UNCLES.into()),
                miner: Some(HARDHAT_MINER.into()),
                state_root: Some(format!("0x{:064x}", 0xfeed + n)),
                transactions_root: Some(EMPTY_TRIE.into()),
                receipts_root: Some(EMPTY_TRIE.into()),
                logs_bloom: Some(format!("0x{}", "00".repeat(256))),
                difficulty: Some("0x0".into()),
                gas_limit: Some("0x1c9c380".into()),
                gas_used: Some("0x0".into()),
                timestamp: Some(format!("0x{:x}", 1_748_516_761 + n as u64 * 12)),
                extra_data: Some("0x".into()),
                mix_hash: Some(format!("0x{:064x}", n)),
                nonce: Some("0x0000000000000000".into()),
                ..RpcBlock::default()
            });
            header.hash = compute_header_hash(&header, HeaderDigest::Keccak256);
            parent = header.hash.clone();
            header
        })
        .collect()
}

fn editable(headers: Vec<BlockHeader>) -> Vec<EditableBlock> {
    headers.into_iter().map(EditableBlock::new).collect()
}

#[test]
fn test_loaded_timestamps_hash_like_raw_ones() {
    // from_rpc turns hex seconds into ISO text; the hash must not care.
    let headers = native_chain(2);
    assert!(headers[0].timestamp.ends_with('Z'));
    for header in &headers {
        assert_eq!(compute_header_hash(header, HeaderDigest::Keccak256), header.hash);
    }
}

#[test]
fn test_fresh_chain_reports_nothing() {
    let blocks = editable(native_chain(5));
    let report = validate_chain(&blocks, HeaderDigest::Sha256);
    assert!(report.is_valid);
    assert_eq!(report.valid_blocks, vec![0, 1, 2, 3, 4]);
    assert!(blocks.iter().all(|b| b.is_valid_hash && !b.is_modified));
}

#[test]
fn test_three_block_miner_edit() {
    let mut blocks = editable(native_chain(3));
    let b0 = blocks[0].clone();
    let b1_hash = blocks[1].header.hash.clone();
    let b2_hash = blocks[2].header.hash.clone();

    let edit = EditEvent::new(1, HeaderField::Miner, "0x00000000000000000000000000000000000000aa");
    apply_edit(&mut blocks, &edit, HeaderDigest::Sha256).unwrap();

    assert_eq!(blocks[0], b0);
    assert_ne!(blocks[1].header.hash, b1_hash);
    assert_eq!(blocks[2].header.parent_hash, blocks[1].header.hash);
    assert_ne!(blocks[2].header.hash, b2_hash);

    let report = validate_chain(&blocks, HeaderDigest::Sha256);
    assert_eq!(report.hash_mismatches, vec![1, 2]);
    assert!(report.broken_links.is_empty());
    assert_eq!(report.status().status, ChainStatus::Invalid);
}

#[test]
fn test_keccak_edit_keeps_chain_valid() {
    let mut blocks = editable(native_chain(4));
    apply_edit(
        &mut blocks,
        &EditEvent::new(2, HeaderField::GasUsed, "21000"),
        HeaderDigest::Keccak256,
    )
    .unwrap();

    assert!(blocks[2..].iter().all(|b| b.is_modified && b.is_valid_hash));
    assert!(validate_chain(&blocks, HeaderDigest::Keccak256).is_valid);
}

#[test]
fn test_noop_recompute_under_keccak_keeps_hashes() {
    // Recomputing an untouched chain with the native digest reproduces it.
    let headers = native_chain(3);
    let mut blocks = editable(headers.clone());
    recalculate_all(&mut blocks, HeaderDigest::Keccak256);
    for (block, header) in blocks.iter().zip(&headers) {
        assert_eq!(block.header.hash, header.hash);
        assert!(block.is_modified);
        assert!(block.is_valid_hash);
    }
}

#[test]
fn test_edit_of_tip_touches_only_tip() {
    let mut blocks = editable(native_chain(4));
    let before = blocks.clone();
    recalculate_from(&mut blocks, 3, HeaderDigest::Sha256);
    assert_eq!(&blocks[..3], &before[..3]);
    assert!(blocks[3].is_modified);
}

#[test]
fn test_parent_hash_edit_breaks_nothing_downstream_but_marks_it() {
    let mut blocks = editable(native_chain(3));
    apply_edit(
        &mut blocks,
        &EditEvent::new(1, HeaderField::ParentHash, format!("0x{}", "ab".repeat(32))),
        HeaderDigest::Sha256,
    )
    .unwrap();

    let report = validate_chain(&blocks, HeaderDigest::Sha256);
    // Block 1 no longer points at block 0; block 2 was relinked.
    assert_eq!(report.broken_links, vec![1]);
    assert_eq!(report.hash_mismatches, vec![1, 2]);
}

#[test]
fn test_restore_leaves_siblings_broken() {
    let mut blocks = editable(native_chain(3));
    apply_edit(
        &mut blocks,
        &EditEvent::new(0, HeaderField::Timestamp, "2030-01-01T00:00:00.000Z"),
        HeaderDigest::Sha256,
    )
    .unwrap();

    let others = blocks[1..].to_vec();
    blocks[0] = restore_original(&blocks[0]);

    assert!(!blocks[0].is_modified);
    assert!(blocks[0].is_valid_hash);
    assert_eq!(&blocks[1..], &others[..]);

    let report = validate_chain(&blocks, HeaderDigest::Sha256);
    assert_eq!(report.broken_links, vec![1]);
    assert_eq!(report.hash_mismatches, vec![1, 2]);
}

#[test]
fn test_session_reload_discards_edits() {
    let headers = native_chain(3);
    let mut session = ChainSession::with_headers(headers.clone(), HeaderDigest::Sha256);
    session
        .edit(&EditEvent::new(1, HeaderField::ExtraData, "0xbeef"))
        .unwrap();
    assert!(!session.validate().is_valid);

    session.load(headers);
    assert!(session.validate().is_valid);
    assert_eq!(session.stats().modified_count, 0);
    assert_eq!(session.stats().latest_block, Some(2));
}
