use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

use super::{ChecksumAlgorithm, DEFAULT_ALGORITHM, Sha256Algorithm, Sha512Algorithm};

#[derive(Debug, Error)]
pub enum ChecksumError {
    #[error("unknown checksum algorithm: {0}")]
    UnknownAlgorithm(String),
}

/// Lookup of checksum algorithms by name, consulted once at startup
#[derive(Clone)]
pub struct ChecksumAlgorithmManager {
    // Keyed by upper-cased name so lookups are case-insensitive
    algorithms: BTreeMap<String, Arc<dyn ChecksumAlgorithm>>,
}

impl ChecksumAlgorithmManager {
    pub fn new() -> Self {
        Self {
            algorithms: BTreeMap::new(),
        }
    }

    /// Manager with the built-in SHA-2 family registered
    pub fn with_defaults() -> Self {
        let mut manager = Self::new();
        manager.register(Arc::new(Sha256Algorithm));
        manager.register(Arc::new(Sha512Algorithm));
        manager
    }

    pub fn register(&mut self, algorithm: Arc<dyn ChecksumAlgorithm>) {
        self.algorithms
            .insert(algorithm.name().to_ascii_uppercase(), algorithm);
    }

    pub fn get(&self, name: &str) -> Result<Arc<dyn ChecksumAlgorithm>, ChecksumError> {
        self.algorithms
            .get(&name.trim().to_ascii_uppercase())
            .cloned()
            .ok_or_else(|| ChecksumError::UnknownAlgorithm(name.to_string()))
    }

    pub fn default_algorithm(&self) -> Result<Arc<dyn ChecksumAlgorithm>, ChecksumError> {
        self.get(DEFAULT_ALGORITHM)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.algorithms
            .contains_key(&name.trim().to_ascii_uppercase())
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.algorithms.values().map(|a| a.name()).collect()
    }
}

impl Default for ChecksumAlgorithmManager {
    fn default() -> Self {
        Self::with_defaults()
    }
}
