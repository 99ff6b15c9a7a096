//! Client address matching.
//!
//! An [`AddressMatcher`] holds an ordered list of [`AddressStrategy`]
//! implementations, one per configured address list, and reports a match as
//! soon as any of them does. Strategies are ordered cheapest first:
//! substring, numeric range, CIDR, wildcard.

mod cidr;
mod exact;
mod range;
mod wildcard;

pub use cidr::CidrAddressSet;
pub use exact::ExactAddressSet;
pub use range::{dotted_quad_key, RangeAddressSet};
pub use wildcard::WildcardAddressSet;

use super::config::AddressListConfig;
use super::error::BotFilterResult;

/// Prefix carried by IPv4 addresses reported through a dual-stack socket.
const IPV4_MAPPED_PREFIX: &str = "::ffff:";

/// One way of deciding whether an address belongs to a bot list.
///
/// Implementations must not panic on arbitrary input; an address they cannot
/// interpret is reported as not matching.
pub trait AddressStrategy: std::fmt::Debug + Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Check a normalized address.
    fn matches(&self, address: &str) -> bool;

    /// Number of configured entries.
    fn len(&self) -> usize;

    /// Whether the strategy has no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Strip surrounding whitespace and the IPv4-mapped IPv6 prefix.
#[must_use]
pub fn normalize_address(address: &str) -> &str {
    let address = address.trim();
    match address.get(..IPV4_MAPPED_PREFIX.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(IPV4_MAPPED_PREFIX) => {
            &address[IPV4_MAPPED_PREFIX.len()..]
        },
        _ => address,
    }
}

/// Decides whether a client address falls in any configured address list.
#[derive(Debug, Default)]
pub struct AddressMatcher {
    strategies: Vec<Box<dyn AddressStrategy>>,
}

impl AddressMatcher {
    /// Compile all four address lists.
    pub fn from_config(config: &AddressListConfig) -> BotFilterResult<Self> {
        let mut matcher = Self::default();
        matcher.push(ExactAddressSet::new(&config.exact)?);
        matcher.push(RangeAddressSet::new(&config.ranges)?);
        matcher.push(CidrAddressSet::new(&config.cidrs)?);
        matcher.push(WildcardAddressSet::new(&config.wildcards)?);
        Ok(matcher)
    }

    /// Append a strategy. Empty strategies are dropped.
    pub fn push<S: AddressStrategy + 'static>(&mut self, strategy: S) {
        if !strategy.is_empty() {
            self.strategies.push(Box::new(strategy));
        }
    }

    /// Builder-style variant of [`AddressMatcher::push`].
    #[must_use]
    pub fn with<S: AddressStrategy + 'static>(mut self, strategy: S) -> Self {
        self.push(strategy);
        self
    }

    /// Check whether `address` belongs to a bot.
    #[must_use]
    pub fn is_bot_address(&self, address: &str) -> bool {
        self.matching_strategy(address).is_some()
    }

    /// Name of the first strategy that matches `address`, if any.
    #[must_use]
    pub fn matching_strategy(&self, address: &str) -> Option<&'static str> {
        let address = normalize_address(address);
        self.strategies
            .iter()
            .find(|s| s.matches(address))
            .map(|s| s.name())
    }

    /// Number of active strategies.
    #[must_use]
    pub fn strategy_count(&self) -> usize {
        self.strategies.len()
    }

    /// Total number of configured entries across strategies.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.strategies.iter().map(|s| s.len()).sum()
    }
}
