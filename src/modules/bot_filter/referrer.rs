//! Referrer/origin matching.

use super::error::BotFilterResult;
use super::signature::PatternList;

/// Decides whether a referrer or origin belongs to a bot.
#[derive(Debug, Clone)]
pub struct ReferrerMatcher {
    referrers: PatternList,
}

impl ReferrerMatcher {
    /// Build a matcher over the configured referrer substrings.
    pub fn new<S: AsRef<str>>(referrers: &[S]) -> BotFilterResult<Self> {
        Ok(Self {
            referrers: PatternList::new(referrers, "bot_filter.referrers")?,
        })
    }

    /// Check whether the referrer belongs to a bot. Absent is treated as
    /// empty.
    #[must_use]
    pub fn is_bot_referrer(&self, referrer: Option<&str>) -> bool {
        self.referrers.find(referrer.unwrap_or_default()).is_some()
    }

    /// Number of configured referrer patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.referrers.len()
    }

    /// Whether no referrer patterns are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_referrer() {
        let matcher = ReferrerMatcher::new(&["scanner-host"]).unwrap();
        assert!(!matcher.is_bot_referrer(None));
        assert!(!matcher.is_bot_referrer(Some("")));
    }

    #[test]
    fn test_configured_referrer() {
        let matcher = ReferrerMatcher::new(&["scanner-host"]).unwrap();
        assert!(matcher.is_bot_referrer(Some("https://scanner-host.example/path")));
        assert!(matcher.is_bot_referrer(Some("HTTPS://Scanner-Host.example")));
        assert!(!matcher.is_bot_referrer(Some("https://www.example.com/")));
    }

    #[test]
    fn test_uppercase_pattern_normalized() {
        let matcher = ReferrerMatcher::new(&["  LinkScanner  "]).unwrap();
        assert!(matcher.is_bot_referrer(Some("https://linkscanner.example/check")));
    }
}
