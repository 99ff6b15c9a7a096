//! Fusion of the three per-signal matchers into one verdict.

use super::address::AddressMatcher;
use super::config::BotFilterConfig;
use super::error::BotFilterResult;
use super::referrer::ReferrerMatcher;
use super::signature::SignatureMatcher;
use serde::Serialize;

/// The three request signals used for classification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassificationSignal {
    /// User-Agent header.
    pub user_agent: Option<String>,
    /// Resolved client address.
    pub client_ip: Option<String>,
    /// Referer header, or Origin when Referer is absent.
    pub referrer: Option<String>,
}

impl ClassificationSignal {
    /// Create an empty signal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the user-agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the client address.
    #[must_use]
    pub fn with_client_ip(mut self, client_ip: impl Into<String>) -> Self {
        self.client_ip = Some(client_ip.into());
        self
    }

    /// Set the referrer.
    #[must_use]
    pub fn with_referrer(mut self, referrer: impl Into<String>) -> Self {
        self.referrer = Some(referrer.into());
        self
    }
}

/// Which signal identified the client as a bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockReason {
    /// User-agent matched a crawler or configured signature.
    UserAgent,
    /// Client address matched an address list.
    Address,
    /// Referrer matched a configured pattern.
    Referrer,
}

impl BlockReason {
    /// Get the reason as a string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UserAgent => "user_agent",
            Self::Address => "address",
            Self::Referrer => "referrer",
        }
    }
}

impl std::fmt::Display for BlockReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of classifying one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Verdict {
    /// Whether the client is a bot.
    pub is_bot: bool,
    /// First signal that matched, when `is_bot` is set.
    pub reason: Option<BlockReason>,
}

impl Verdict {
    /// A human client.
    #[must_use]
    pub const fn human() -> Self {
        Self {
            is_bot: false,
            reason: None,
        }
    }

    /// A bot identified by `reason`.
    #[must_use]
    pub const fn bot(reason: BlockReason) -> Self {
        Self {
            is_bot: true,
            reason: Some(reason),
        }
    }
}

/// Classifies requests from their user-agent, address and referrer.
///
/// Holds only immutable compiled lists, so one instance can be shared across
/// any number of threads.
#[derive(Debug)]
pub struct Classifier {
    signatures: SignatureMatcher,
    addresses: AddressMatcher,
    referrers: ReferrerMatcher,
}

impl Classifier {
    /// Assemble a classifier from already-built matchers.
    #[must_use]
    pub fn new(
        signatures: SignatureMatcher,
        addresses: AddressMatcher,
        referrers: ReferrerMatcher,
    ) -> Self {
        Self {
            signatures,
            addresses,
            referrers,
        }
    }

    /// Compile every list in the configuration.
    ///
    /// # Errors
    ///
    /// Returns the first malformed entry found.
    pub fn from_config(config: &BotFilterConfig) -> BotFilterResult<Self> {
        Ok(Self::new(
            SignatureMatcher::new(&config.user_agents, config.generic_crawlers)?,
            AddressMatcher::from_config(&config.addresses)?,
            ReferrerMatcher::new(&config.referrers)?,
        ))
    }

    /// Classify one request.
    ///
    /// The user-agent is checked first, then the address, then the referrer;
    /// evaluation stops at the first match.
    #[must_use]
    pub fn classify(&self, signal: &ClassificationSignal) -> Verdict {
        if self.is_bot_signature(signal.user_agent.as_deref()) {
            Verdict::bot(BlockReason::UserAgent)
        } else if self.is_bot_address(signal.client_ip.as_deref()) {
            Verdict::bot(BlockReason::Address)
        } else if self.is_bot_referrer(signal.referrer.as_deref()) {
            Verdict::bot(BlockReason::Referrer)
        } else {
            Verdict::human()
        }
    }

    /// User-agent check alone.
    #[must_use]
    pub fn is_bot_signature(&self, user_agent: Option<&str>) -> bool {
        self.signatures.is_bot_signature(user_agent)
    }

    /// Address check alone. Absent is treated as empty.
    #[must_use]
    pub fn is_bot_address(&self, client_ip: Option<&str>) -> bool {
        self.addresses.is_bot_address(client_ip.unwrap_or_default())
    }

    /// Referrer check alone.
    #[must_use]
    pub fn is_bot_referrer(&self, referrer: Option<&str>) -> bool {
        self.referrers.is_bot_referrer(referrer)
    }

    /// The signature matcher.
    #[must_use]
    pub fn signatures(&self) -> &SignatureMatcher {
        &self.signatures
    }

    /// The address matcher.
    #[must_use]
    pub fn addresses(&self) -> &AddressMatcher {
        &self.addresses
    }

    /// The referrer matcher.
    #[must_use]
    pub fn referrers(&self) -> &ReferrerMatcher {
        &self.referrers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::bot_filter::config::AddressListConfig;

    const CHROME: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

    fn classifier() -> Classifier {
        let config = BotFilterConfig::new()
            .with_user_agents(["python-requests"])
            .with_referrers(["scanner-host"])
            .with_addresses(
                AddressListConfig::new()
                    .exact(["66.249.66."])
                    .cidrs(["198.51.100.0/24"]),
            );
        Classifier::from_config(&config).unwrap()
    }

    #[test]
    fn test_human() {
        let signal = ClassificationSignal::new()
            .with_user_agent(CHROME)
            .with_client_ip("203.0.113.9");
        assert_eq!(classifier().classify(&signal), Verdict::human());
    }

    #[test]
    fn test_each_signal_alone_is_enough() {
        let c = classifier();

        let ua = ClassificationSignal::new().with_user_agent("python-requests/2.28");
        assert_eq!(c.classify(&ua), Verdict::bot(BlockReason::UserAgent));

        let ip = ClassificationSignal::new()
            .with_user_agent(CHROME)
            .with_client_ip("198.51.100.20");
        assert_eq!(c.classify(&ip), Verdict::bot(BlockReason::Address));

        let referrer = ClassificationSignal::new()
            .with_user_agent(CHROME)
            .with_client_ip("203.0.113.9")
            .with_referrer("https://scanner-host.example/path");
        assert_eq!(c.classify(&referrer), Verdict::bot(BlockReason::Referrer));
    }

    #[test]
    fn test_first_match_wins() {
        let signal = ClassificationSignal::new()
            .with_user_agent("python-requests/2.28")
            .with_client_ip("66.249.66.1")
            .with_referrer("https://scanner-host.example/");
        assert_eq!(classifier().classify(&signal).reason, Some(BlockReason::UserAgent));
    }

    #[test]
    fn test_all_absent() {
        assert_eq!(
            classifier().classify(&ClassificationSignal::new()),
            Verdict::human()
        );
    }

    #[test]
    fn test_idempotent() {
        let c = classifier();
        let signal = ClassificationSignal::new()
            .with_user_agent(CHROME)
            .with_client_ip("::ffff:198.51.100.1");
        let first = c.classify(&signal);
        let second = c.classify(&signal);
        assert_eq!(first, second);
        assert!(first.is_bot);
    }

    #[test]
    fn test_invalid_config_fails() {
        let config = BotFilterConfig::new()
            .with_addresses(AddressListConfig::new().cidrs(["10.0.0.0/99"]));
        assert!(Classifier::from_config(&config).is_err());
    }

    #[test]
    fn test_shared_across_threads() {
        let c = std::sync::Arc::new(classifier());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let c = std::sync::Arc::clone(&c);
                std::thread::spawn(move || {
                    let signal =
                        ClassificationSignal::new().with_client_ip(format!("198.51.100.{i}"));
                    c.classify(&signal).is_bot
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }
}
