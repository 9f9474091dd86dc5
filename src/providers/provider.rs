use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, info_span, warn};

use super::binder::{FilterDecision, ParameterError, ParameterSurface};
use super::descriptor::{ParameterDescriptor, ParameterValueMap, ProviderDescriptor};
use crate::checksum::ChecksumAlgorithm;
use crate::handlers::{DscHandler, HandlerContext, HandlerError, HandlerKind};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("invalid provider state: {0}")]
    InvalidState(String),

    #[error(transparent)]
    Handler(#[from] HandlerError),
}

impl From<ParameterError> for ProviderError {
    fn from(err: ParameterError) -> Self {
        ProviderError::InvalidState(err.to_string())
    }
}

/// Builds a fresh handler for each construction attempt
pub type HandlerConstructor<H> = Box<dyn Fn() -> Result<H, HandlerError> + Send + Sync>;

/// Audit/veto hook run for every declared parameter that has a value
pub type ParameterFilter =
    Arc<dyn Fn(&ParameterDescriptor, &Value) -> FilterDecision + Send + Sync>;

/// Object-safe provider surface used by the registry
pub trait DscHandlerProvider: Send + Sync {
    fn describe(&self) -> ProviderDescriptor;

    fn describe_parameters(&self) -> Vec<ParameterDescriptor>;

    fn set_parameters(&self, values: ParameterValueMap) -> Result<(), ProviderError>;

    fn produce(&self) -> Result<Arc<dyn DscHandler>, ProviderError>;
}

#[derive(Default)]
struct ParameterState {
    values: Option<ParameterValueMap>,
    // Set once a handler has been published
    sealed: bool,
}

/// Produces exactly one handler of kind `H`.
///
/// The handler is built on the first [`produce`](Self::produce) call, under a
/// once-only cell. Failed attempts leave the cell empty so the next call
/// starts over; a successful one is returned to every later caller.
pub struct HandlerProvider<H: HandlerKind> {
    descriptor: ProviderDescriptor,
    surface: ParameterSurface<H>,
    checksum: Arc<dyn ChecksumAlgorithm>,
    construct: HandlerConstructor<H>,
    filter: Option<ParameterFilter>,
    parameters: Mutex<ParameterState>,
    handler: OnceCell<Arc<H>>,
}

impl<H: HandlerKind> HandlerProvider<H> {
    pub fn new(checksum: Arc<dyn ChecksumAlgorithm>) -> Self {
        Self::with_constructor(checksum, || Ok(H::default()))
    }

    pub fn with_constructor<F>(checksum: Arc<dyn ChecksumAlgorithm>, construct: F) -> Self
    where
        F: Fn() -> Result<H, HandlerError> + Send + Sync + 'static,
    {
        Self {
            descriptor: H::descriptor(),
            surface: H::parameters(),
            checksum,
            construct: Box::new(construct),
            filter: None,
            parameters: Mutex::new(ParameterState::default()),
            handler: OnceCell::new(),
        }
    }

    /// Install an audit/veto hook consulted before each parameter is applied
    pub fn with_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&ParameterDescriptor, &Value) -> FilterDecision + Send + Sync + 'static,
    {
        self.filter = Some(Arc::new(filter));
        self
    }

    pub fn describe(&self) -> ProviderDescriptor {
        self.descriptor
    }

    pub fn describe_parameters(&self) -> Vec<ParameterDescriptor> {
        self.surface.descriptors()
    }

    /// Store parameters for the handler. Rejected once a handler exists.
    pub fn set_parameters(&self, values: ParameterValueMap) -> Result<(), ProviderError> {
        let mut parameters = self.parameters.lock();
        if parameters.sealed {
            return Err(ProviderError::InvalidState(format!(
                "parameters for provider '{}' cannot change after the handler has been produced",
                self.descriptor
            )));
        }
        if parameters.values.is_some() {
            warn!(provider = self.descriptor.name, "Replacing previously supplied parameters");
        }
        parameters.values = Some(values);
        Ok(())
    }

    pub fn is_produced(&self) -> bool {
        self.handler.get().is_some()
    }

    pub fn produce(&self) -> Result<Arc<H>, ProviderError> {
        debug!(provider = self.descriptor.name, "Resolving handler");
        if let Some(handler) = self.handler.get() {
            return Ok(Arc::clone(handler));
        }

        let handler = self.handler.get_or_try_init(|| self.construct_handler())?;
        Ok(Arc::clone(handler))
    }

    fn construct_handler(&self) -> Result<Arc<H>, ProviderError> {
        // Held until the handler is published so parameters cannot change mid-build
        let mut parameters = self.parameters.lock();

        let mut handler = (self.construct)()?;
        handler.attach(HandlerContext::new(
            info_span!("dsc_handler", provider = self.descriptor.name),
            Arc::clone(&self.checksum),
        ));
        info!(provider = self.descriptor.name, "Handler constructed");

        if let Some(values) = parameters.values.as_ref() {
            info!(provider = self.descriptor.name, "Applying parameters");
            let report = handler.apply_parameters(&self.surface, values, |descriptor, value| {
                self.filter_parameter(descriptor, value)
            })?;
            if !report.ignored.is_empty() {
                debug!(
                    provider = self.descriptor.name,
                    ignored = ?report.ignored,
                    "Dropped undeclared parameters"
                );
            }
        }

        handler.init()?;
        parameters.sealed = true;
        Ok(Arc::new(handler))
    }

    fn filter_parameter(&self, descriptor: &ParameterDescriptor, value: &Value) -> FilterDecision {
        let decision = match &self.filter {
            Some(filter) => filter(descriptor, value),
            None => FilterDecision::Accept(value.clone()),
        };

        match decision {
            FilterDecision::Accept(_) => {
                info!(parameter = descriptor.name, "  * Setting parameter");
            }
            FilterDecision::Veto => {
                info!(parameter = descriptor.name, "  * Vetoed parameter");
            }
        }
        decision
    }
}

impl<H: HandlerKind> DscHandlerProvider for HandlerProvider<H> {
    fn describe(&self) -> ProviderDescriptor {
        HandlerProvider::describe(self)
    }

    fn describe_parameters(&self) -> Vec<ParameterDescriptor> {
        HandlerProvider::describe_parameters(self)
    }

    fn set_parameters(&self, values: ParameterValueMap) -> Result<(), ProviderError> {
        HandlerProvider::set_parameters(self, values)
    }

    fn produce(&self) -> Result<Arc<dyn DscHandler>, ProviderError> {
        let handler: Arc<dyn DscHandler> = HandlerProvider::produce(self)?;
        Ok(handler)
    }
}
