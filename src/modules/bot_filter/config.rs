//! Configuration for the bot filter.

use serde::{Deserialize, Serialize};

/// Main configuration for the bot filter.
///
/// Loaded once at startup; the compiled matchers never change afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BotFilterConfig {
    /// Whether requests are classified at all.
    pub enabled: bool,

    /// Run the bundled crawler detector before the custom user-agent list.
    pub generic_crawlers: bool,

    /// Honor proxy-forwarded client address headers.
    pub trust_proxy_headers: bool,

    /// Only trust forwarded headers from these peers (CIDR or bare address).
    /// Empty means trust every peer when `trust_proxy_headers` is set.
    pub trusted_proxies: Vec<String>,

    /// User-agent substrings that identify bots.
    pub user_agents: Vec<String>,

    /// Referrer/origin substrings that identify bots.
    pub referrers: Vec<String>,

    /// Address lists.
    pub addresses: AddressListConfig,
}

impl Default for BotFilterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            generic_crawlers: true,
            trust_proxy_headers: true,
            trusted_proxies: Vec::new(),
            user_agents: Vec::new(),
            referrers: Vec::new(),
            addresses: AddressListConfig::default(),
        }
    }
}

impl BotFilterConfig {
    /// Create a new bot filter config.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add user-agent patterns.
    #[must_use]
    pub fn with_user_agents<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.user_agents.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Add referrer patterns.
    #[must_use]
    pub fn with_referrers<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.referrers.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Replace the address lists.
    #[must_use]
    pub fn with_addresses(mut self, addresses: AddressListConfig) -> Self {
        self.addresses = addresses;
        self
    }

    /// Toggle the bundled crawler detector.
    #[must_use]
    pub fn with_generic_crawlers(mut self, enabled: bool) -> Self {
        self.generic_crawlers = enabled;
        self
    }

    /// Configure forwarded-header trust.
    #[must_use]
    pub fn with_trust_proxy(mut self, trust: bool, trusted_proxies: Vec<String>) -> Self {
        self.trust_proxy_headers = trust;
        self.trusted_proxies = trusted_proxies;
        self
    }
}

/// The four address list representations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressListConfig {
    /// Address substrings; a client matches when its address contains one.
    pub exact: Vec<String>,

    /// Inclusive IPv4 ranges as `[low, high]` pairs.
    pub ranges: Vec<[String; 2]>,

    /// CIDR blocks or bare addresses, IPv4 or IPv6.
    pub cidrs: Vec<String>,

    /// Glob patterns using `*` and `?`.
    pub wildcards: Vec<String>,
}

impl AddressListConfig {
    /// Create an empty address list config.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add exact address substrings.
    #[must_use]
    pub fn exact<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exact.extend(entries.into_iter().map(Into::into));
        self
    }

    /// Add an inclusive range.
    #[must_use]
    pub fn range(mut self, low: impl Into<String>, high: impl Into<String>) -> Self {
        self.ranges.push([low.into(), high.into()]);
        self
    }

    /// Add CIDR blocks.
    #[must_use]
    pub fn cidrs<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cidrs.extend(entries.into_iter().map(Into::into));
        self
    }

    /// Add wildcard patterns.
    #[must_use]
    pub fn wildcards<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.wildcards.extend(entries.into_iter().map(Into::into));
        self
    }

    /// Total number of configured address entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.exact.len() + self.ranges.len() + self.cidrs.len() + self.wildcards.len()
    }

    /// Whether no address entries are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
