//! Configuration type definitions.

use crate::modules::bot_filter::BotFilterConfig;
use serde::{Deserialize, Serialize};

/// Root configuration structure for botgate.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BotGateConfig {
    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Bot filter lists and switches.
    pub bot_filter: BotFilterConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    pub level: LogLevel,

    /// Log format (json, pretty, compact).
    pub format: LogFormat,
}

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level (most verbose).
    Trace,
    /// Debug level.
    Debug,
    /// Info level (default).
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level (least verbose).
    Error,
}

impl LogLevel {
    /// Get the level as a filter directive.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Log format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON format (machine-readable).
    Json,
    /// Pretty format with colors (default).
    #[default]
    Pretty,
    /// Compact single-line format.
    Compact,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BotGateConfig::default();
        assert_eq!(config.logging.level, LogLevel::Info);
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(config.bot_filter.enabled);
        assert!(config.bot_filter.addresses.is_empty());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
            [logging]
            level = "debug"
            format = "json"

            [bot_filter]
            generic_crawlers = false
            trusted_proxies = ["10.0.0.0/8"]
            user_agents = ["python-requests", "curl"]
            referrers = ["scanner-host"]

            [bot_filter.addresses]
            exact = ["66.249.66."]
            ranges = [["192.0.2.0", "192.0.2.255"]]
            cidrs = ["198.51.100.0/24", "2001:db8::/32"]
            wildcards = ["203.0.113.*"]
        "#;

        let config: BotGateConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert!(config.bot_filter.enabled);
        assert!(!config.bot_filter.generic_crawlers);
        assert_eq!(config.bot_filter.user_agents.len(), 2);
        assert_eq!(config.bot_filter.addresses.ranges[0][1], "192.0.2.255");
        assert_eq!(config.bot_filter.addresses.len(), 5);
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevel::Warn.to_string(), "warn");
    }
}
