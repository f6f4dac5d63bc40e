use std::path::PathBuf;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::domain::error::{AppError, Result};

/// File name of the Stack Overflow questions export
pub const DEFAULT_DATA_FILE: &str = "stackoverflow_data.csv";

/// Optional config file, looked up from the working directory
pub const CONFIG_FILE: &str = "tagstats.toml";

pub const ENV_PREFIX: &str = "TAGSTATS_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,

    /// Questions export; relative paths resolve against the executable's directory
    pub data_file: PathBuf,

    /// `tracing_subscriber` filter directive, `RUST_LOG` takes precedence
    pub log_filter: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            log_filter: "info".to_string(),
        }
    }
}

impl ServiceConfig {
    /// Defaults, then `tagstats.toml`, then `TAGSTATS_*` environment variables
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn load() -> Result<Self> {
        Self::from_figment(Self::figment())
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config: Self = figment
            .extract()
            .map_err(|e| AppError::ConfigError(format!("Failed to load configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(AppError::ConfigError("host must not be empty".to_string()));
        }
        if self.port == 0 {
            return Err(AppError::ConfigError("port must be > 0".to_string()));
        }
        if self.data_file.as_os_str().is_empty() {
            return Err(AppError::ConfigError("data_file must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.port, 5000);
        assert_eq!(config.data_file, PathBuf::from("stackoverflow_data.csv"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_then_env_override() {
        Jail::expect_with(|jail| {
            jail.create_file(
                CONFIG_FILE,
                r#"
                    port = 8080
                    data_file = "questions.csv"
                "#,
            )?;
            jail.set_env("TAGSTATS_PORT", "9090");

            let config = ServiceConfig::load().expect("config should load");
            assert_eq!(config.port, 9090);
            assert_eq!(config.data_file, PathBuf::from("questions.csv"));
            assert_eq!(config.host, "127.0.0.1");
            Ok(())
        });
    }

    #[test]
    fn test_zero_port_is_rejected() {
        Jail::expect_with(|jail| {
            jail.set_env("TAGSTATS_PORT", "0");

            let err = ServiceConfig::load().unwrap_err();
            assert!(matches!(err, AppError::ConfigError(msg) if msg.contains("port")));
            Ok(())
        });
    }

    #[test]
    fn test_malformed_value_is_config_error() {
        Jail::expect_with(|jail| {
            jail.set_env("TAGSTATS_PORT", "not-a-port");

            let err = ServiceConfig::load().unwrap_err();
            assert!(matches!(err, AppError::ConfigError(_)));
            Ok(())
        });
    }
}
