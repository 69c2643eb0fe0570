//! Header digest selection
//!
//! The workbench hashes canonical header encodings with a general-purpose
//! digest by default. Only Keccak-256 reproduces the hashes a real node
//! reports; the other digests make every edited block read as tampered.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use sha3::Keccak256;
use std::fmt;
use std::str::FromStr;

use super::Hash;

/// Digest applied to the RLP-encoded header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderDigest {
    /// SHA-256, the teaching digest
    #[default]
    Sha256,
    /// BLAKE3
    Blake3,
    /// Keccak-256, the digest the network itself uses for header hashes
    Keccak256,
}

impl HeaderDigest {
    /// Hash arbitrary bytes with this digest
    pub fn digest(&self, data: &[u8]) -> Hash {
        match self {
            HeaderDigest::Sha256 => Hash(Sha256::digest(data).into()),
            HeaderDigest::Blake3 => Hash(*blake3::hash(data).as_bytes()),
            HeaderDigest::Keccak256 => Hash(Keccak256::digest(data).into()),
        }
    }

    /// Whether recomputed hashes can ever equal the hashes the node reported.
    pub fn is_network_native(&self) -> bool {
        matches!(self, HeaderDigest::Keccak256)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HeaderDigest::Sha256 => "sha256",
            HeaderDigest::Blake3 => "blake3",
            HeaderDigest::Keccak256 => "keccak256",
        }
    }
}

impl fmt::Display for HeaderDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HeaderDigest {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha256" | "sha-256" => Ok(HeaderDigest::Sha256),
            "blake3" => Ok(HeaderDigest::Blake3),
            "keccak256" | "keccak-256" | "keccak" => Ok(HeaderDigest::Keccak256),
            other => Err(format!("unknown digest: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_vector() {
        let hash = HeaderDigest::Sha256.digest(b"abc");
        assert_eq!(
            hash.to_hex(),
            "0xba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_keccak_empty_vector() {
        let hash = HeaderDigest::Keccak256.digest(b"");
        assert_eq!(
            hash.to_hex(),
            "0xc5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_digests_differ() {
        let data = b"honey";
        let sha = HeaderDigest::Sha256.digest(data);
        let blake = HeaderDigest::Blake3.digest(data);
        let keccak = HeaderDigest::Keccak256.digest(data);
        assert_ne!(sha, blake);
        assert_ne!(sha, keccak);
        assert_ne!(blake, keccak);
    }

    #[test]
    fn test_only_keccak_is_native() {
        assert!(HeaderDigest::Keccak256.is_network_native());
        assert!(!HeaderDigest::Sha256.is_network_native());
        assert!(!HeaderDigest::Blake3.is_network_native());
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("SHA256".parse::<HeaderDigest>().unwrap(), HeaderDigest::Sha256);
        assert_eq!("keccak".parse::<HeaderDigest>().unwrap(), HeaderDigest::Keccak256);
        assert!("md5".parse::<HeaderDigest>().is_err());
    }
}
