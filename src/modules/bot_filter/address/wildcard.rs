//! Glob-style address patterns.
//!
//! Grammar: hex digits, `.` and `:` match themselves (case-insensitively),
//! `*` matches any run of characters including none, `?` matches exactly one
//! character. A pattern must match the whole address.

use super::AddressStrategy;
use crate::modules::bot_filter::error::{BotFilterError, BotFilterResult};
use regex::RegexSet;

/// Translate one glob pattern into an anchored regular expression.
fn glob_to_regex(pattern: &str) -> BotFilterResult<String> {
    if pattern.is_empty() {
        return Err(BotFilterError::InvalidWildcard {
            pattern: pattern.to_string(),
            reason: "pattern is empty".to_string(),
        });
    }

    let mut regex = String::with_capacity(pattern.len() * 2 + 6);
    regex.push_str("(?i)^");
    for c in pattern.chars() {
        match c {
            '*' => regex.push_str(".*"),
            '?' => regex.push('.'),
            '.' => regex.push_str(r"\."),
            ':' => regex.push(':'),
            c if c.is_ascii_hexdigit() => regex.push(c),
            other => {
                return Err(BotFilterError::InvalidWildcard {
                    pattern: pattern.to_string(),
                    reason: format!("unsupported character '{other}'"),
                })
            },
        }
    }
    regex.push('$');

    Ok(regex)
}

/// Wildcard patterns compiled into a single [`RegexSet`].
#[derive(Debug, Clone)]
pub struct WildcardAddressSet {
    set: RegexSet,
}

impl Default for WildcardAddressSet {
    fn default() -> Self {
        Self {
            set: RegexSet::empty(),
        }
    }
}

impl WildcardAddressSet {
    /// Validate and compile the patterns.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> BotFilterResult<Self> {
        let regexes = patterns
            .iter()
            .map(|p| glob_to_regex(p.as_ref().trim()))
            .collect::<BotFilterResult<Vec<_>>>()?;

        let set = RegexSet::new(&regexes).map_err(|e| BotFilterError::InvalidWildcard {
            pattern: patterns
                .iter()
                .map(|p| p.as_ref())
                .collect::<Vec<_>>()
                .join(", "),
            reason: e.to_string(),
        })?;

        Ok(Self { set })
    }
}

impl AddressStrategy for WildcardAddressSet {
    fn name(&self) -> &'static str {
        "wildcard"
    }

    fn matches(&self, address: &str) -> bool {
        self.set.is_match(address)
    }

    fn len(&self) -> usize {
        self.set.len()
    }
}
