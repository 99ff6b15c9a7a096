//! Client address resolution behind reverse proxies.

use super::address::CidrAddressSet;
use super::error::{BotFilterError, BotFilterResult};
use crate::modules::http_handler::Request;
use std::net::{IpAddr, SocketAddr};

/// Headers carrying the original client address, in lookup order.
const FORWARDED_HEADERS: &[&str] = &[
    "x-client-ip",
    "x-forwarded-for",
    "cf-connecting-ip",
    "fastly-client-ip",
    "true-client-ip",
    "x-real-ip",
    "x-cluster-client-ip",
];

/// Resolves the client address of a request.
///
/// With proxy trust enabled, forwarded headers win over the peer address.
/// When trusted proxies are configured, headers are only honored if the peer
/// itself is one of them.
#[derive(Debug, Clone, Default)]
pub struct ClientIpResolver {
    trust_proxy_headers: bool,
    trusted_proxies: Option<CidrAddressSet>,
}

impl ClientIpResolver {
    /// Create a resolver.
    ///
    /// # Errors
    ///
    /// Returns [`BotFilterError::InvalidTrustedProxy`] for an entry that is
    /// neither an address nor a CIDR block.
    pub fn new<S: AsRef<str>>(
        trust_proxy_headers: bool,
        trusted_proxies: &[S],
    ) -> BotFilterResult<Self> {
        let trusted_proxies = if trusted_proxies.is_empty() {
            None
        } else {
            let set = CidrAddressSet::new(trusted_proxies).map_err(|e| match e {
                BotFilterError::InvalidCidr(entry) => BotFilterError::InvalidTrustedProxy(entry),
                other => other,
            })?;
            Some(set)
        };

        Ok(Self {
            trust_proxy_headers,
            trusted_proxies,
        })
    }

    /// Resolve the client address of `request`.
    #[must_use]
    pub fn resolve(&self, request: &Request) -> Option<String> {
        let peer = request.remote_addr().map(peer_ip);

        if !self.trust_proxy_headers || !self.peer_is_trusted(peer.as_deref()) {
            return peer;
        }

        FORWARDED_HEADERS
            .iter()
            .filter_map(|name| request.header(name))
            .find_map(first_valid_ip)
            .or(peer)
    }

    fn peer_is_trusted(&self, peer: Option<&str>) -> bool {
        let Some(ref proxies) = self.trusted_proxies else {
            return true;
        };
        peer.and_then(|p| super::address::normalize_address(p).parse::<IpAddr>().ok())
            .is_some_and(|ip| proxies.contains(&ip))
    }
}

/// Reduce `ip:port` or `[v6]:port` to the bare address; anything else is
/// returned as is.
fn peer_ip(remote_addr: &str) -> String {
    remote_addr
        .parse::<SocketAddr>()
        .map(|sa| sa.ip().to_string())
        .unwrap_or_else(|_| remote_addr.to_string())
}

/// First entry of a comma-separated header value that parses as an address.
fn first_valid_ip(value: &str) -> Option<String> {
    value
        .split(',')
        .map(str::trim)
        .map(|entry| {
            entry
                .parse::<SocketAddr>()
                .map(|sa| sa.ip().to_string())
                .unwrap_or_else(|_| entry.to_string())
        })
        .find(|entry| entry.parse::<IpAddr>().is_ok())
}
