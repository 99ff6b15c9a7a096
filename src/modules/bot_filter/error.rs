//! Error types for the bot filter.
//!
//! Every variant is a load-time failure. Matching never errors: a value that
//! a matcher cannot interpret is simply not a match.

use thiserror::Error;

/// Result type for bot filter construction.
pub type BotFilterResult<T> = Result<T, BotFilterError>;

/// A malformed entry in one of the bot lists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BotFilterError {
    /// A substring pattern was empty after trimming.
    #[error("empty pattern in {list}")]
    EmptyPattern {
        /// Name of the list holding the entry.
        list: &'static str,
    },

    /// A range bound is not an IPv4 dotted-quad.
    #[error("invalid range bound '{0}': expected an IPv4 address")]
    InvalidRangeBound(String),

    /// A range whose low bound is above its high bound.
    #[error("inverted range: {low} is greater than {high}")]
    InvertedRange {
        /// Configured low bound.
        low: String,
        /// Configured high bound.
        high: String,
    },

    /// CIDR parsing error.
    #[error("invalid CIDR notation '{0}'")]
    InvalidCidr(String),

    /// Wildcard pattern outside the supported grammar.
    #[error("invalid wildcard pattern '{pattern}': {reason}")]
    InvalidWildcard {
        /// The offending pattern.
        pattern: String,
        /// What is wrong with it.
        reason: String,
    },

    /// Trusted proxy entry that is not an address or CIDR block.
    #[error("invalid trusted proxy '{0}'")]
    InvalidTrustedProxy(String),
}

impl BotFilterError {
    /// Configuration field the error belongs to, for validation reports.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyPattern { list } => list,
            Self::InvalidRangeBound(_) | Self::InvertedRange { .. } => "bot_filter.addresses.ranges",
            Self::InvalidCidr(_) => "bot_filter.addresses.cidrs",
            Self::InvalidWildcard { .. } => "bot_filter.addresses.wildcards",
            Self::InvalidTrustedProxy(_) => "bot_filter.trusted_proxies",
        }
    }
}
