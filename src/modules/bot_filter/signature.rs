//! User-agent signature matching.

use super::crawlers;
use super::error::{BotFilterError, BotFilterResult};

/// Lowercase substring patterns matched case-insensitively.
#[derive(Debug, Clone, Default)]
pub(crate) struct PatternList {
    patterns: Vec<String>,
}

impl PatternList {
    /// Normalize patterns to trimmed lowercase; `list` names the config field
    /// for error reports.
    pub(crate) fn new<S: AsRef<str>>(patterns: &[S], list: &'static str) -> BotFilterResult<Self> {
        let patterns = patterns
            .iter()
            .map(|p| {
                let p = p.as_ref().trim();
                if p.is_empty() {
                    Err(BotFilterError::EmptyPattern { list })
                } else {
                    Ok(p.to_lowercase())
                }
            })
            .collect::<BotFilterResult<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    /// First pattern contained in `value`, compared lowercase.
    pub(crate) fn find(&self, value: &str) -> Option<&str> {
        if self.patterns.is_empty() {
            return None;
        }
        let value = value.to_lowercase();
        self.patterns
            .iter()
            .find(|p| value.contains(p.as_str()))
            .map(String::as_str)
    }

    pub(crate) fn len(&self) -> usize {
        self.patterns.len()
    }
}

/// Decides whether a user-agent belongs to a bot.
///
/// The bundled crawler detector runs first (when enabled); the configured
/// signature list is only consulted when it says no.
#[derive(Debug, Clone)]
pub struct SignatureMatcher {
    generic_crawlers: bool,
    signatures: PatternList,
}

impl SignatureMatcher {
    /// Build a matcher over the configured signatures.
    pub fn new<S: AsRef<str>>(signatures: &[S], generic_crawlers: bool) -> BotFilterResult<Self> {
        Ok(Self {
            generic_crawlers,
            signatures: PatternList::new(signatures, "bot_filter.user_agents")?,
        })
    }

    /// Check whether the user-agent belongs to a bot. Absent is treated as
    /// empty.
    #[must_use]
    pub fn is_bot_signature(&self, user_agent: Option<&str>) -> bool {
        let user_agent = user_agent.unwrap_or_default();
        (self.generic_crawlers && crawlers::is_crawler(user_agent))
            || self.signatures.find(user_agent).is_some()
    }

    /// Number of configured signatures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    /// Whether no signatures are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
