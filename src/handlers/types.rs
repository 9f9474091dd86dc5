use serde::Serialize;

use crate::checksum::{Checksum, ChecksumAlgorithm};

/// Configuration document served to a pulling node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigurationArtifact {
    pub name: String,
    #[serde(skip)]
    pub content: Vec<u8>,
    pub size: usize,
    pub checksum: Checksum,
}

impl ConfigurationArtifact {
    pub fn new(
        name: impl Into<String>,
        content: Vec<u8>,
        algorithm: &dyn ChecksumAlgorithm,
    ) -> Self {
        let checksum = algorithm.compute(&content);
        Self {
            name: name.into(),
            size: content.len(),
            content,
            checksum,
        }
    }

    /// Recompute the digest and compare with the stamped checksum
    pub fn is_intact(&self, algorithm: &dyn ChecksumAlgorithm) -> bool {
        algorithm.name() == self.checksum.algorithm()
            && algorithm.compute(&self.content) == self.checksum
    }
}
