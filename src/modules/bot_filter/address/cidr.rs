//! CIDR block address list.

use super::AddressStrategy;
use crate::modules::bot_filter::error::{BotFilterError, BotFilterResult};
use ipnet::IpNet;
use std::net::IpAddr;

/// Parse a CIDR block or a bare address (treated as a host route).
pub(crate) fn parse_block(entry: &str) -> Option<IpNet> {
    let entry = entry.trim();
    if entry.contains('/') {
        entry.parse::<IpNet>().ok()
    } else {
        entry.parse::<IpAddr>().ok().map(IpNet::from)
    }
}

/// IPv4 and IPv6 CIDR blocks.
#[derive(Debug, Clone, Default)]
pub struct CidrAddressSet {
    blocks: Vec<IpNet>,
}

impl CidrAddressSet {
    /// Build the set from CIDR strings.
    pub fn new<S: AsRef<str>>(entries: &[S]) -> BotFilterResult<Self> {
        let blocks = entries
            .iter()
            .map(|e| {
                parse_block(e.as_ref())
                    .ok_or_else(|| BotFilterError::InvalidCidr(e.as_ref().to_string()))
            })
            .collect::<BotFilterResult<Vec<_>>>()?;

        Ok(Self { blocks })
    }

    /// Check an already-parsed address.
    #[must_use]
    pub fn contains(&self, address: &IpAddr) -> bool {
        self.blocks.iter().any(|block| block.contains(address))
    }
}

impl AddressStrategy for CidrAddressSet {
    fn name(&self) -> &'static str {
        "cidr"
    }

    fn matches(&self, address: &str) -> bool {
        address
            .parse::<IpAddr>()
            .is_ok_and(|addr| self.contains(&addr))
    }

    fn len(&self) -> usize {
        self.blocks.len()
    }
}
