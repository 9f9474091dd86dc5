use super::models::Config;
use config::{ConfigError, Environment, File};
use std::env;
use std::path::PathBuf;

const CONFIG_ENV_VAR: &str = "DSCPULL_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config/dscpull.toml";
const ENV_PREFIX: &str = "DSCPULL";
const ENV_SEPARATOR: &str = "__";

/// Load configuration from multiple sources with priority:
/// 1. Defaults (embedded in structs)
/// 2. TOML file (if exists)
/// 3. Environment variables from .env file (via dotenvy)
/// 4. System environment variables (highest priority)
pub fn load() -> Result<Config, ConfigError> {
    // Load .env file if it exists (ignore errors if file doesn't exist)
    let _ = dotenvy::dotenv();

    let config_path = env::var(CONFIG_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));

    load_from_sources(config_path)
}

/// Load configuration from a specific path and environment
pub fn load_from_sources(config_path: PathBuf) -> Result<Config, ConfigError> {
    load_with_environment(config_path, None)
}

/// Same as [`load_from_sources`], reading overrides from `environment`
/// instead of the process environment when it is given
fn load_with_environment(
    config_path: PathBuf,
    environment: Option<config::Map<String, String>>,
) -> Result<Config, ConfigError> {
    let mut builder = config::Config::builder();

    if config_path.exists() {
        tracing::info!("Loading configuration from: {}", config_path.display());
        builder = builder.add_source(File::from(config_path).required(false));
    } else {
        tracing::warn!(
            "Configuration file not found at {}, using defaults and environment overrides",
            config_path.display()
        );
    }

    // DSCPULL__CHECKSUM__DEFAULT -> checksum.default
    // Values stay strings: handler parameters are typed by the binder, not here
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator(ENV_SEPARATOR)
            .source(environment),
    );

    let config = builder.build()?;
    config.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checksum::Sha256Algorithm;
    use crate::providers::ProviderRegistry;
    use serde_json::json;
    use std::fs;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn environment(pairs: &[(&str, &str)]) -> Option<config::Map<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_load_defaults_only() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.toml");

        let config = load_from_sources(config_path).unwrap();
        assert_eq!(config.server.bind_addr.to_string(), "0.0.0.0:8080");
        assert_eq!(config.checksum.default, "SHA-256");
    }

    #[test]
    fn test_load_from_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let toml_content = r#"
[server]
bind_addr = "127.0.0.1:9000"

[checksum]
default = "SHA-512"

[handler]
provider = "integTest"

[handler.params.Configurations]
Web = "instance of MSFT_Role {};"
        "#;

        fs::write(&config_path, toml_content).unwrap();

        let config = load_from_sources(config_path).unwrap();
        assert_eq!(config.server.bind_addr.to_string(), "127.0.0.1:9000");
        assert_eq!(config.checksum.default, "SHA-512");
        assert_eq!(config.handler.provider, "integTest");
        assert_eq!(config.handler.params.len(), 1);
    }

    #[test]
    fn test_env_overrides_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");
        fs::write(&config_path, "[checksum]\ndefault = \"SHA-512\"\n").unwrap();

        let config = load_with_environment(
            config_path,
            environment(&[
                ("DSCPULL__CHECKSUM__DEFAULT", "SHA-256"),
                ("DSCPULL__SERVER__BIND_ADDR", "127.0.0.1:9100"),
            ]),
        )
        .unwrap();

        assert_eq!(config.checksum.default, "SHA-256");
        assert_eq!(config.server.bind_addr.to_string(), "127.0.0.1:9100");
    }

    #[test]
    fn test_env_parameter_stays_string() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.toml");

        let config = load_with_environment(
            config_path,
            environment(&[("DSCPULL__HANDLER__PARAMS__BOOTSTRAPSCRIPT", "12345")]),
        )
        .unwrap();

        assert_eq!(config.handler.params["bootstrapscript"], json!("12345"));

        let registry =
            ProviderRegistry::from_settings(&config.handler, Arc::new(Sha256Algorithm)).unwrap();
        assert_eq!(registry.resolve_configured().unwrap().kind(), "ps5");
    }

    #[test]
    fn test_env_configurations_are_served_by_name() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.toml");

        let config = load_with_environment(
            config_path,
            environment(&[
                ("DSCPULL__HANDLER__PROVIDER", "integTest"),
                ("DSCPULL__HANDLER__PARAMS__CONFIGURATIONS__WebServer", "doc"),
            ]),
        )
        .unwrap();

        let registry =
            ProviderRegistry::from_settings(&config.handler, Arc::new(Sha256Algorithm)).unwrap();
        let artifact = registry
            .resolve_configured()
            .unwrap()
            .get_configuration("WebServer")
            .unwrap();

        assert_eq!(artifact.name, "WebServer");
        assert_eq!(artifact.content, b"doc");
    }
}
