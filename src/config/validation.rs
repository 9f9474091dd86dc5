use super::models::Config;
use crate::checksum::ChecksumAlgorithmManager;
use crate::providers::HandlerVariant;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Unknown checksum algorithm '{name}', expected one of: {available}")]
    UnknownChecksumAlgorithm { name: String, available: String },

    #[error("Handler provider name is empty")]
    EmptyHandlerProvider,

    #[error("Unknown handler provider '{name}', expected one of: {available}")]
    UnknownHandlerProvider { name: String, available: String },
}

/// Validate the entire configuration
pub fn validate(config: &Config) -> Result<(), ValidationError> {
    validate_checksum(config)?;
    validate_handler(config)?;
    Ok(())
}

fn validate_checksum(config: &Config) -> Result<(), ValidationError> {
    let manager = ChecksumAlgorithmManager::with_defaults();
    if !manager.contains(&config.checksum.default) {
        return Err(ValidationError::UnknownChecksumAlgorithm {
            name: config.checksum.default.clone(),
            available: manager.names().join(", "),
        });
    }
    Ok(())
}

fn validate_handler(config: &Config) -> Result<(), ValidationError> {
    let provider = &config.handler.provider;
    if provider.trim().is_empty() {
        return Err(ValidationError::EmptyHandlerProvider);
    }

    if HandlerVariant::from_name(provider).is_none() {
        return Err(ValidationError::UnknownHandlerProvider {
            name: provider.clone(),
            available: HandlerVariant::names().join(", "),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        let config = Config::default();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_checksum_name_is_case_insensitive() {
        let mut config = Config::default();
        config.checksum.default = "sha-512".to_string();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_unknown_checksum_algorithm() {
        let mut config = Config::default();
        config.checksum.default = "MD5".to_string();

        let result = validate(&config);
        assert!(matches!(
            result,
            Err(ValidationError::UnknownChecksumAlgorithm { ref name, .. }) if name == "MD5"
        ));
    }

    #[test]
    fn test_empty_provider() {
        let mut config = Config::default();
        config.handler.provider = "  ".to_string();

        let result = validate(&config);
        assert!(matches!(result, Err(ValidationError::EmptyHandlerProvider)));
    }

    #[test]
    fn test_unknown_provider() {
        let mut config = Config::default();
        config.handler.provider = "basic".to_string();

        let err = validate(&config).unwrap_err();
        assert!(matches!(err, ValidationError::UnknownHandlerProvider { .. }));
        assert!(err.to_string().contains("ps5, integTest"));
    }
}
