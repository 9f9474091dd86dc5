use sha2::{Digest, Sha256, Sha512};

use super::{Checksum, ChecksumAlgorithm};

#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Algorithm;

impl ChecksumAlgorithm for Sha256Algorithm {
    fn name(&self) -> &'static str {
        "SHA-256"
    }

    fn compute(&self, payload: &[u8]) -> Checksum {
        Checksum::new(self.name(), Sha256::digest(payload).to_vec())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Sha512Algorithm;

impl ChecksumAlgorithm for Sha512Algorithm {
    fn name(&self) -> &'static str {
        "SHA-512"
    }

    fn compute(&self, payload: &[u8]) -> Checksum {
        Checksum::new(self.name(), Sha512::digest(payload).to_vec())
    }
}
