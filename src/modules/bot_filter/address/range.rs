//! Inclusive IPv4 range list.

use super::AddressStrategy;
use crate::modules::bot_filter::error::{BotFilterError, BotFilterResult};

/// Order key of a dotted-quad address: each octet zero-padded to three digits
/// and concatenated, read as a 12-digit decimal number.
///
/// `"10.0.0.5"` and `"010.000.000.005"` both become `010_000_000_005`.
/// Returns `None` unless there are exactly four octets of one to three
/// digits, each at most 255. IPv6 never parses.
#[must_use]
pub fn dotted_quad_key(address: &str) -> Option<u64> {
    let mut key = 0u64;
    let mut octets = 0;
    for part in address.split('.') {
        if part.is_empty() || part.len() > 3 || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let octet: u8 = part.parse().ok()?;
        key = key * 1_000 + u64::from(octet);
        octets += 1;
    }
    (octets == 4).then_some(key)
}

/// IPv4 ranges, inclusive at both ends.
///
/// Only IPv4 addresses are ever compared; IPv6 clients never match a range.
#[derive(Debug, Clone, Default)]
pub struct RangeAddressSet {
    ranges: Vec<(u64, u64)>,
}

impl RangeAddressSet {
    /// Build the set from `[low, high]` pairs.
    pub fn new<S: AsRef<str>>(ranges: &[[S; 2]]) -> BotFilterResult<Self> {
        let mut parsed = Vec::with_capacity(ranges.len());

        for [low, high] in ranges {
            let (low, high) = (low.as_ref().trim(), high.as_ref().trim());
            let low_key = dotted_quad_key(low)
                .ok_or_else(|| BotFilterError::InvalidRangeBound(low.to_string()))?;
            let high_key = dotted_quad_key(high)
                .ok_or_else(|| BotFilterError::InvalidRangeBound(high.to_string()))?;

            if low_key > high_key {
                return Err(BotFilterError::InvertedRange {
                    low: low.to_string(),
                    high: high.to_string(),
                });
            }
            parsed.push((low_key, high_key));
        }

        Ok(Self { ranges: parsed })
    }
}

impl AddressStrategy for RangeAddressSet {
    fn name(&self) -> &'static str {
        "range"
    }

    fn matches(&self, address: &str) -> bool {
        let Some(key) = dotted_quad_key(address) else {
            return false;
        };
        self.ranges
            .iter()
            .any(|&(low, high)| (low..=high).contains(&key))
    }

    fn len(&self) -> usize {
        self.ranges.len()
    }
}
