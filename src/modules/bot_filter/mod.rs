//! # Bot Filter Module
//!
//! Classifies each request as human or automated from three signals, its
//! user-agent, client address and referrer, and answers automated clients
//! with a bare `404 Not Found` before any downstream work happens.
//!
//! ## Features
//!
//! - **Crawler Detection**: Built-in detector for self-identifying crawlers
//! - **Signature Lists**: Configured user-agent and referrer substrings
//! - **Address Lists**: Exact substrings, IPv4 ranges, CIDR blocks and wildcards
//! - **Trust Proxy**: Client address taken from forwarding headers when trusted
//!
//! ## Usage
//!
//! ```ignore
//! use botgate::modules::bot_filter::{BotFilterConfig, BotFilterMiddleware};
//! use botgate::modules::http_handler::MiddlewareChain;
//! use std::sync::Arc;
//!
//! let config = BotFilterConfig::new().with_user_agents(["python-requests"]);
//! let chain = MiddlewareChain::new()
//!     .with(Arc::new(BotFilterMiddleware::from_config(&config)?));
//!
//! let response = chain.dispatch(request, |_| Response::ok().text("hello").build())?;
//! ```

mod address;
mod classifier;
mod client_ip;
mod config;
mod crawlers;
mod error;
mod middleware;
mod referrer;
mod signature;
mod stats;

pub use address::{
    dotted_quad_key, normalize_address, AddressMatcher, AddressStrategy, CidrAddressSet,
    ExactAddressSet, RangeAddressSet, WildcardAddressSet,
};
pub use classifier::{BlockReason, ClassificationSignal, Classifier, Verdict};
pub use client_ip::ClientIpResolver;
pub use config::{AddressListConfig, BotFilterConfig};
pub use crawlers::is_crawler;
pub use error::{BotFilterError, BotFilterResult};
pub use middleware::{BotFilterMiddleware, BOT_FILTER_PRIORITY};
pub use referrer::ReferrerMatcher;
pub use signature::SignatureMatcher;
pub use stats::{BotFilterStats, StatsSnapshot};
