//! # botgate
//!
//! Request-level bot classification for HTTP front ends.
//!
//! Every request is judged from three signals, its user-agent, client
//! address and referrer, against lists loaded once at startup. Requests
//! judged automated are answered with a bare `404 Not Found`; everything else
//! passes through untouched.
//!
//! ## Modules
//!
//! - [`config`] - TOML configuration loading and validation
//! - [`modules::bot_filter`] - Classifier, matchers and the filtering middleware
//! - [`modules::http_handler`] - Request/response types and the middleware chain

pub mod config;
pub mod modules;
