//! Counters for the bot filter.

use super::classifier::{BlockReason, Verdict};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Statistics for the bot filter.
#[derive(Debug, Default)]
pub struct BotFilterStats {
    /// Total requests checked.
    pub requests_checked: AtomicU64,
    /// Requests forwarded downstream.
    pub requests_allowed: AtomicU64,
    /// Requests rejected as bots.
    pub requests_blocked: AtomicU64,
    /// Rejections caused by the user-agent.
    pub user_agent_blocks: AtomicU64,
    /// Rejections caused by the client address.
    pub address_blocks: AtomicU64,
    /// Rejections caused by the referrer.
    pub referrer_blocks: AtomicU64,
}

impl BotFilterStats {
    /// Create new stats.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a verdict.
    pub fn record(&self, verdict: &Verdict) {
        self.requests_checked.fetch_add(1, Ordering::Relaxed);
        if !verdict.is_bot {
            self.requests_allowed.fetch_add(1, Ordering::Relaxed);
            return;
        }

        self.requests_blocked.fetch_add(1, Ordering::Relaxed);
        match verdict.reason {
            Some(BlockReason::UserAgent) => {
                self.user_agent_blocks.fetch_add(1, Ordering::Relaxed);
            },
            Some(BlockReason::Address) => {
                self.address_blocks.fetch_add(1, Ordering::Relaxed);
            },
            Some(BlockReason::Referrer) => {
                self.referrer_blocks.fetch_add(1, Ordering::Relaxed);
            },
            None => {},
        }
    }

    /// Point-in-time copy of the counters.
    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            requests_checked: self.requests_checked.load(Ordering::Relaxed),
            requests_allowed: self.requests_allowed.load(Ordering::Relaxed),
            requests_blocked: self.requests_blocked.load(Ordering::Relaxed),
            user_agent_blocks: self.user_agent_blocks.load(Ordering::Relaxed),
            address_blocks: self.address_blocks.load(Ordering::Relaxed),
            referrer_blocks: self.referrer_blocks.load(Ordering::Relaxed),
        }
    }
}

/// Plain copy of [`BotFilterStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub requests_checked: u64,
    pub requests_allowed: u64,
    pub requests_blocked: u64,
    pub user_agent_blocks: u64,
    pub address_blocks: u64,
    pub referrer_blocks: u64,
}
