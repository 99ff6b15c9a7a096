//! # Modules
//!
//! - [`bot_filter`] - Bot classification and the 404 gate
//! - [`http_handler`] - HTTP request/response handling and middleware

pub mod bot_filter;
pub mod http_handler;
