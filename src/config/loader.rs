//! Configuration file loader.

use super::error::{ConfigError, ConfigResult};
use super::types::BotGateConfig;
use super::validation::{BotListValidator, Validator};
use std::path::Path;
use tracing::{debug, info, warn};

/// Configuration loader with validation support.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    /// Validators to run on loaded configuration.
    validators: Vec<Box<dyn Validator>>,
}

impl ConfigLoader {
    /// Create a new configuration loader without validators.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a loader that compiles the bot lists on load.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new().with_validator(BotListValidator::new())
    }

    /// Add a validator to the loader.
    #[must_use]
    pub fn with_validator<V: Validator + 'static>(mut self, validator: V) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    /// Load configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file does not exist
    /// - The file cannot be read
    /// - The TOML is malformed
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(&self, path: P) -> ConfigResult<BotGateConfig> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config = self.load_str(&content)?;
        info!(
            path = %path.display(),
            user_agents = config.bot_filter.user_agents.len(),
            referrers = config.bot_filter.referrers.len(),
            addresses = config.bot_filter.addresses.len(),
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The TOML is malformed
    /// - Validation fails
    pub fn load_str(&self, content: &str) -> ConfigResult<BotGateConfig> {
        let config: BotGateConfig = toml::from_str(content)?;
        self.validate(&config)?;
        Ok(config)
    }

    /// Validate a configuration against all registered validators.
    fn validate(&self, config: &BotGateConfig) -> ConfigResult<()> {
        for validator in &self.validators {
            let result = validator.validate(config);
            for warning in result.warnings() {
                warn!(field = %warning.field, "{}", warning.message);
            }
            if !result.is_valid() {
                let errors: Vec<String> = result
                    .errors_only()
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect();
                return Err(ConfigError::ValidationError(errors.join("; ")));
            }
        }
        Ok(())
    }

    /// Load configuration or return default if file doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default<P: AsRef<Path>>(&self, path: P) -> ConfigResult<BotGateConfig> {
        let path = path.as_ref();
        if path.exists() {
            self.load(path)
        } else {
            debug!(path = %path.display(), "No configuration file, using defaults");
            Ok(BotGateConfig::default())
        }
    }

    /// Save configuration to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn save<P: AsRef<Path>>(&self, config: &BotGateConfig, path: P) -> ConfigResult<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(config)?;
        std::fs::write(path, content).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_from_string() {
        let loader = ConfigLoader::with_defaults();
        let config = loader
            .load_str(
                r#"
            [bot_filter]
            user_agents = ["python-requests"]
        "#,
            )
            .unwrap();
        assert_eq!(config.bot_filter.user_agents, vec!["python-requests"]);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("botgate.toml");

        std::fs::write(
            &config_path,
            r#"
            [bot_filter.addresses]
            cidrs = ["198.51.100.0/24"]
        "#,
        )
        .unwrap();

        let loader = ConfigLoader::with_defaults();
        let config = loader.load(&config_path).unwrap();
        assert_eq!(config.bot_filter.addresses.cidrs, vec!["198.51.100.0/24"]);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let loader = ConfigLoader::new();
        let result = loader.load("/nonexistent/path/botgate.toml");
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_or_default() {
        let loader = ConfigLoader::new();
        let config = loader.load_or_default("/nonexistent/path").unwrap();
        assert!(config.bot_filter.enabled);
        assert!(config.bot_filter.user_agents.is_empty());
    }

    #[test]
    fn test_malformed_toml() {
        let loader = ConfigLoader::new();
        let result = loader.load_str("[bot_filter\nenabled = true");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_invalid_entry_reports_field_path() {
        let loader = ConfigLoader::with_defaults();
        let err = loader
            .load_str(
                r#"
            [bot_filter.addresses]
            cidrs = ["198.51.100.0/24", "2001:db8::/32", "10.0.0.0/33"]
        "#,
            )
            .unwrap_err();

        match err {
            ConfigError::ValidationError(message) => {
                assert!(message.contains("bot_filter.addresses.cidrs[2]"));
            },
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_warnings_do_not_block_load() {
        let loader = ConfigLoader::with_defaults();
        let config = loader
            .load_str(
                r#"
            [bot_filter]
            generic_crawlers = false
        "#,
            )
            .unwrap();
        assert!(config.bot_filter.enabled);
        assert!(!config.bot_filter.generic_crawlers);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("saved.toml");

        let mut config = BotGateConfig::default();
        config.bot_filter.referrers = vec!["scanner-host".to_string()];
        config.bot_filter.addresses.ranges = vec![["192.0.2.0".to_string(), "192.0.2.9".to_string()]];

        let loader = ConfigLoader::with_defaults();
        loader.save(&config, &config_path).unwrap();

        let loaded = loader.load(&config_path).unwrap();
        assert_eq!(loaded.bot_filter.referrers, vec!["scanner-host"]);
        assert_eq!(loaded.bot_filter.addresses.ranges.len(), 1);
    }
}
