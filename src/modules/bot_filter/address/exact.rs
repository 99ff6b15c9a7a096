//! Substring address list.

use super::AddressStrategy;
use crate::modules::bot_filter::error::{BotFilterError, BotFilterResult};

/// Address list matched by substring containment.
///
/// An entry matches any address that contains it, so `"66.249.66."` covers
/// the whole /24 and `"1.2.3.4"` also covers `"11.2.3.45"`. Entries are
/// usually written as prefixes ending in a dot to keep that loose.
#[derive(Debug, Clone, Default)]
pub struct ExactAddressSet {
    entries: Vec<String>,
}

impl ExactAddressSet {
    /// Build the set, rejecting empty entries (they would match everything).
    pub fn new<S: AsRef<str>>(entries: &[S]) -> BotFilterResult<Self> {
        let entries = entries
            .iter()
            .map(|e| {
                let e = e.as_ref().trim();
                if e.is_empty() {
                    Err(BotFilterError::EmptyPattern {
                        list: "bot_filter.addresses.exact",
                    })
                } else {
                    Ok(e.to_string())
                }
            })
            .collect::<BotFilterResult<Vec<_>>>()?;

        Ok(Self { entries })
    }
}

impl AddressStrategy for ExactAddressSet {
    fn name(&self) -> &'static str {
        "exact"
    }

    fn matches(&self, address: &str) -> bool {
        self.entries.iter().any(|e| address.contains(e.as_str()))
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_entry_matches() {
        let set = ExactAddressSet::new(&["8.8.8.8", "66.249.66."]).unwrap();
        assert!(set.matches("8.8.8.8"));
        assert!(set.matches("66.249.66.1"));
        assert!(!set.matches("8.8.4.4"));
    }

    #[test]
    fn test_substring_semantics_are_loose() {
        // Containment, not equality: a longer address embedding the entry
        // also matches.
        let set = ExactAddressSet::new(&["1.2.3.4"]).unwrap();
        assert!(set.matches("11.2.3.45"));
        assert!(set.matches("1.2.3.40"));
        assert!(!set.matches("1.2.3.5"));
    }

    #[test]
    fn test_empty_entry_rejected() {
        let err = ExactAddressSet::new(&["8.8.8.8", "  "]).unwrap_err();
        assert!(matches!(err, BotFilterError::EmptyPattern { .. }));
    }

    #[test]
    fn test_empty_address() {
        let set = ExactAddressSet::new(&["8.8.8.8"]).unwrap();
        assert!(!set.matches(""));
    }
}
