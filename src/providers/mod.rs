//! Handler provider resolution
//!
//! A provider owns the lazy, construct-once lifecycle of one handler kind:
//!
//! 1. the registry selects a provider by name
//! 2. optional parameters are stored with `set_parameters`
//! 3. the first `produce` builds the handler, binds the declared parameters,
//!    calls `init` and publishes it; later calls return the same instance
//!
//! ```no_run
//! use dscpull::checksum::ChecksumAlgorithmManager;
//! use dscpull::providers::ProviderRegistry;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let checksum = ChecksumAlgorithmManager::with_defaults().default_algorithm()?;
//! let registry = ProviderRegistry::with_builtin(checksum);
//! let handler = registry.resolve("integTest")?;
//! let artifact = handler.get_configuration("TestConfig1")?;
//! println!("{}", artifact.checksum);
//! # Ok(())
//! # }
//! ```

pub mod binder;
mod descriptor;
mod provider;
mod registry;

pub use binder::{BindReport, FilterDecision, ParameterError, ParameterSurface};
pub use descriptor::{ParameterDescriptor, ParameterKind, ParameterValueMap, ProviderDescriptor};
pub use provider::{
    DscHandlerProvider, HandlerConstructor, HandlerProvider, ParameterFilter, ProviderError,
};
pub use registry::{HandlerVariant, ProviderRegistry, ProviderSummary, RegistryError};
