use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::info;

use super::traits::{
    DscHandler, HandlerContext, HandlerError, HandlerKind, require_context,
    validate_configuration_name,
};
use super::types::ConfigurationArtifact;
use crate::providers::ParameterKind;
use crate::providers::binder::{ParameterSurface, path_value, string_value};

const CONFIGURATION_EXTENSION: &str = "mof";

/// PowerShell 5 handler.
///
/// Compiled MOF documents live next to the bootstrap script: a request for
/// `WebServer` is served from `<dir of BootstrapPath>/WebServer.mof`.
#[derive(Debug, Default)]
pub struct Ps5DscHandler {
    bootstrap_path: Option<PathBuf>,
    bootstrap_script: Option<String>,
    context: Option<HandlerContext>,
}

impl Ps5DscHandler {
    pub fn bootstrap_path(&self) -> Option<&Path> {
        self.bootstrap_path.as_deref()
    }

    pub fn bootstrap_script(&self) -> Option<&str> {
        self.bootstrap_script.as_deref()
    }

    fn configuration_root(&self) -> Result<&Path, HandlerError> {
        self.bootstrap_path
            .as_deref()
            .and_then(Path::parent)
            .ok_or_else(|| HandlerError::NotReady("BootstrapPath is not set".to_string()))
    }
}

impl HandlerKind for Ps5DscHandler {
    const NAME: &'static str = "ps5";

    fn parameters() -> ParameterSurface<Self> {
        // Order is published; append only.
        ParameterSurface::<Self>::new()
            .with("BootstrapPath", ParameterKind::Path, |h, v| {
                h.bootstrap_path = Some(path_value(v)?);
                Ok(())
            })
            .with("BootstrapScript", ParameterKind::String, |h, v| {
                h.bootstrap_script = Some(string_value(v)?);
                Ok(())
            })
    }

    fn attach(&mut self, context: HandlerContext) {
        self.context = Some(context);
    }

    fn init(&mut self) -> Result<(), HandlerError> {
        let context = require_context(&self.context, Self::NAME)?;
        let _entered = context.span.enter();

        if let Some(path) = &self.bootstrap_path {
            if !path.is_absolute() {
                return Err(HandlerError::Init(format!(
                    "BootstrapPath must be absolute: {}",
                    path.display()
                )));
            }
        }

        info!(
            bootstrap_path = ?self.bootstrap_path,
            inline_script = self.bootstrap_script.is_some(),
            checksum = context.checksum.name(),
            "PS5 handler initialized"
        );
        Ok(())
    }
}

impl DscHandler for Ps5DscHandler {
    fn kind(&self) -> &'static str {
        Self::NAME
    }

    fn get_configuration(&self, name: &str) -> Result<ConfigurationArtifact, HandlerError> {
        let context = require_context(&self.context, Self::NAME)?;
        validate_configuration_name(name)?;

        let path = self
            .configuration_root()?
            .join(format!("{name}.{CONFIGURATION_EXTENSION}"));

        let content = std::fs::read(&path).map_err(|err| match err.kind() {
            ErrorKind::NotFound => HandlerError::NotFound(name.to_string()),
            _ => HandlerError::Io(err),
        })?;

        Ok(ConfigurationArtifact::new(name, content, context.checksum.as_ref()))
    }
}
