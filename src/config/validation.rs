//! Configuration validation system.

use super::types::BotGateConfig;
use crate::modules::bot_filter::{
    BotFilterConfig, BotFilterError, CidrAddressSet, ClientIpResolver, ExactAddressSet,
    RangeAddressSet, ReferrerMatcher, SignatureMatcher, WildcardAddressSet,
};

/// A single validation error.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// The field path that failed validation.
    pub field: String,
    /// Error message.
    pub message: String,
    /// Severity level.
    pub severity: ValidationSeverity,
}

impl ValidationError {
    /// Create a new error.
    pub fn error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            severity: ValidationSeverity::Error,
        }
    }

    /// Create a new warning.
    pub fn warning(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            severity: ValidationSeverity::Warning,
        }
    }
}

/// Severity of validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationSeverity {
    /// Error - configuration is invalid.
    Error,
    /// Warning - configuration may have issues.
    Warning,
}

/// Result of configuration validation.
#[derive(Debug, Default)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// Create a new empty (valid) result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an error to the result.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Check if the validation passed (no errors).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self
            .errors
            .iter()
            .any(|e| e.severity == ValidationSeverity::Error)
    }

    /// Get all validation issues.
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Get only errors (not warnings).
    #[must_use]
    pub fn errors_only(&self) -> Vec<&ValidationError> {
        self.errors
            .iter()
            .filter(|e| e.severity == ValidationSeverity::Error)
            .collect()
    }

    /// Get only warnings.
    #[must_use]
    pub fn warnings(&self) -> Vec<&ValidationError> {
        self.errors
            .iter()
            .filter(|e| e.severity == ValidationSeverity::Warning)
            .collect()
    }

    /// Merge another validation result into this one.
    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
    }
}

/// Trait for configuration validators.
pub trait Validator: std::fmt::Debug + Send + Sync {
    /// Validate a configuration and return any errors.
    fn validate(&self, config: &BotGateConfig) -> ValidationResult;
}

/// Compiles every bot list entry and reports each malformed one with its
/// indexed field path, e.g. `bot_filter.addresses.cidrs[2]`.
#[derive(Debug, Default)]
pub struct BotListValidator;

impl BotListValidator {
    /// Create a new bot list validator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn check_entries<T, F>(result: &mut ValidationResult, entries: &[T], compile: F)
    where
        F: Fn(&T) -> Result<(), BotFilterError>,
    {
        for (index, entry) in entries.iter().enumerate() {
            if let Err(e) = compile(entry) {
                result.add_error(ValidationError::error(
                    format!("{}[{}]", e.field(), index),
                    e.to_string(),
                ));
            }
        }
    }

    fn check_lists(result: &mut ValidationResult, bot_filter: &BotFilterConfig) {
        let addresses = &bot_filter.addresses;

        Self::check_entries(result, &bot_filter.user_agents, |e| {
            SignatureMatcher::new(std::slice::from_ref(e), false).map(drop)
        });
        Self::check_entries(result, &bot_filter.referrers, |e| {
            ReferrerMatcher::new(std::slice::from_ref(e)).map(drop)
        });
        Self::check_entries(result, &addresses.exact, |e| {
            ExactAddressSet::new(std::slice::from_ref(e)).map(drop)
        });
        Self::check_entries(result, &addresses.ranges, |e| {
            RangeAddressSet::new(std::slice::from_ref(e)).map(drop)
        });
        Self::check_entries(result, &addresses.cidrs, |e| {
            CidrAddressSet::new(std::slice::from_ref(e)).map(drop)
        });
        Self::check_entries(result, &addresses.wildcards, |e| {
            WildcardAddressSet::new(std::slice::from_ref(e)).map(drop)
        });
        Self::check_entries(result, &bot_filter.trusted_proxies, |e| {
            ClientIpResolver::new(true, std::slice::from_ref(e)).map(drop)
        });
    }
}

impl Validator for BotListValidator {
    fn validate(&self, config: &BotGateConfig) -> ValidationResult {
        let mut result = ValidationResult::new();
        let bot_filter = &config.bot_filter;

        Self::check_lists(&mut result, bot_filter);

        if !bot_filter.trust_proxy_headers && !bot_filter.trusted_proxies.is_empty() {
            result.add_error(ValidationError::warning(
                "bot_filter.trusted_proxies",
                "trusted proxies are ignored while trust_proxy_headers is false",
            ));
        }

        if bot_filter.enabled
            && !bot_filter.generic_crawlers
            && bot_filter.user_agents.is_empty()
            && bot_filter.referrers.is_empty()
            && bot_filter.addresses.is_empty()
        {
            result.add_error(ValidationError::warning(
                "bot_filter",
                "filter is enabled but no list is configured; every request will pass",
            ));
        }

        result
    }
}
