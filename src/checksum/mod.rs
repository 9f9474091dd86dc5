//! Pluggable checksum algorithms
//!
//! Handlers never hash payloads directly. They receive a shared
//! [`ChecksumAlgorithm`] from their provider and use it to stamp every
//! configuration artifact they serve, so the concrete digest can be switched
//! in configuration without touching provider or handler code.

mod algorithms;
mod manager;

pub use algorithms::{Sha256Algorithm, Sha512Algorithm};
pub use manager::{ChecksumAlgorithmManager, ChecksumError};

use serde::Serialize;
use std::fmt;

/// Name of the algorithm selected when configuration does not name one
pub const DEFAULT_ALGORITHM: &str = "SHA-256";

/// Stateless digest function shared read-only across providers and handlers
pub trait ChecksumAlgorithm: Send + Sync + fmt::Debug {
    /// Canonical algorithm name (e.g. `SHA-256`)
    fn name(&self) -> &'static str;

    /// Compute the digest of `payload`
    fn compute(&self, payload: &[u8]) -> Checksum;

    /// Check `payload` against a hex-encoded digest, ignoring case
    fn verify(&self, payload: &[u8], expected_hex: &str) -> bool {
        self.compute(payload).matches_hex(expected_hex)
    }
}

/// Digest produced by a [`ChecksumAlgorithm`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Checksum {
    algorithm: &'static str,
    #[serde(serialize_with = "serialize_hex")]
    digest: Vec<u8>,
}

impl Checksum {
    pub fn new(algorithm: &'static str, digest: Vec<u8>) -> Self {
        Self { algorithm, digest }
    }

    pub fn algorithm(&self) -> &'static str {
        self.algorithm
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.digest
    }

    /// Upper-case hex, the form DSC agents send and expect
    pub fn to_hex(&self) -> String {
        hex::encode_upper(&self.digest)
    }

    pub fn matches_hex(&self, expected: &str) -> bool {
        match hex::decode(expected.trim()) {
            Ok(bytes) => bytes == self.digest,
            Err(_) => false,
        }
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.algorithm, self.to_hex())
    }
}

fn serialize_hex<S>(digest: &[u8], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&hex::encode_upper(digest))
}
