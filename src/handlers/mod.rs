//! DSC handlers
//!
//! A handler serves configuration documents for one backend format. Handlers
//! are never built directly by callers: a
//! [`HandlerProvider`](crate::providers::HandlerProvider) constructs,
//! parameterizes and initializes exactly one instance per provider.
//!
//! ## Key Components
//!
//! - [`DscHandler`] - Serving capability of a ready handler
//! - [`HandlerKind`] - Construction contract (descriptor, parameters, `init`)
//! - [`Ps5DscHandler`] - PowerShell 5 handler (`ps5`)
//! - [`IntegTestDscHandler`] - In-memory handler for integration tests (`integTest`)
//! - [`ConfigurationArtifact`] - Document plus checksum returned to nodes

mod ps5;
mod traits;
pub(crate) mod types;

pub use integ_test::{IntegTestDscHandler, SAMPLE_CONFIGURATION};
pub use ps5::Ps5DscHandler;
pub use traits::{DscHandler, HandlerContext, HandlerError, HandlerKind};
pub use types::ConfigurationArtifact;
