use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::Span;

use super::types::ConfigurationArtifact;
use crate::checksum::ChecksumAlgorithm;
use crate::providers::{
    BindReport, FilterDecision, ParameterDescriptor, ParameterError, ParameterSurface,
    ParameterValueMap, ProviderDescriptor, binder,
};

/// Handler errors
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("handler construction failed: {0}")]
    Construction(String),
    #[error("handler initialization failed: {0}")]
    Init(String),
    #[error("handler not ready: {0}")]
    NotReady(String),
    #[error("invalid configuration name: {0:?}")]
    InvalidName(String),
    #[error("configuration not found: {0}")]
    NotFound(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Diagnostics sink and shared dependencies handed to a freshly built handler
#[derive(Debug, Clone)]
pub struct HandlerContext {
    pub span: Span,
    pub checksum: Arc<dyn ChecksumAlgorithm>,
}

impl HandlerContext {
    pub fn new(span: Span, checksum: Arc<dyn ChecksumAlgorithm>) -> Self {
        Self { span, checksum }
    }
}

/// Serving side of a handler, usable once it has been produced
pub trait DscHandler: Send + Sync + fmt::Debug {
    /// Provider name this handler was built for
    fn kind(&self) -> &'static str;

    /// Fetch a named configuration, stamped with its checksum
    fn get_configuration(&self, name: &str) -> Result<ConfigurationArtifact, HandlerError>;
}

/// Construction-time contract shared by every handler variant.
///
/// A provider builds the handler with [`Default`], calls [`attach`], binds
/// parameters through [`apply_parameters`] and finally calls [`init`] exactly
/// once before anyone else can see the handler.
///
/// [`attach`]: HandlerKind::attach
/// [`apply_parameters`]: HandlerKind::apply_parameters
/// [`init`]: HandlerKind::init
pub trait HandlerKind: DscHandler + Default + Sized + 'static {
    const NAME: &'static str;

    fn descriptor() -> ProviderDescriptor {
        ProviderDescriptor::new(Self::NAME)
    }

    /// Bindable parameters, in their published order
    fn parameters() -> ParameterSurface<Self>;

    fn attach(&mut self, context: HandlerContext);

    fn apply_parameters<F>(
        &mut self,
        surface: &ParameterSurface<Self>,
        values: &ParameterValueMap,
        filter: F,
    ) -> Result<BindReport, ParameterError>
    where
        F: FnMut(&ParameterDescriptor, &Value) -> FilterDecision,
    {
        binder::bind(self, surface, values, filter)
    }

    fn init(&mut self) -> Result<(), HandlerError>;
}

/// Context lookup shared by the built-in handlers
pub(crate) fn require_context<'a>(
    context: &'a Option<HandlerContext>,
    kind: &str,
) -> Result<&'a HandlerContext, HandlerError> {
    context
        .as_ref()
        .ok_or_else(|| HandlerError::NotReady(format!("{kind} handler has no context attached")))
}

/// Reject names that could escape a configuration root
pub(crate) fn validate_configuration_name(name: &str) -> Result<(), HandlerError> {
    let trimmed = name.trim();
    if trimmed.is_empty()
        || trimmed.contains(['/', '\\'])
        || trimmed.contains("..")
        || trimmed != name
    {
        return Err(HandlerError::InvalidName(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_name_validation() {
        assert!(validate_configuration_name("WebServer").is_ok());
        assert!(validate_configuration_name("web-server.v2").is_ok());

        for bad in ["", " ", "../etc/passwd", "a/b", "a\\b", "a..b", " padded"] {
            assert!(
                matches!(validate_configuration_name(bad), Err(HandlerError::InvalidName(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_require_context_without_attach() {
        let context: Option<HandlerContext> = None;
        let err = require_context(&context, "ps5").unwrap_err();
        assert!(matches!(err, HandlerError::NotReady(msg) if msg.contains("ps5")));
    }
}
