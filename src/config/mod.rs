//! # Configuration System
//!
//! TOML-based configuration for botgate: parsing, defaults and validation of
//! the bot lists before anything is served.
//!
//! ## Example Configuration
//!
//! ```toml
//! [logging]
//! level = "info"
//! format = "json"
//!
//! [bot_filter]
//! user_agents = ["python-requests"]
//! referrers = ["scanner-host"]
//!
//! [bot_filter.addresses]
//! cidrs = ["198.51.100.0/24"]
//! wildcards = ["203.0.113.*"]
//! ```

mod error;
mod loader;
mod types;
mod validation;

pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;
pub use types::{BotGateConfig, LogFormat, LogLevel, LoggingConfig};
pub use validation::{
    BotListValidator, ValidationError, ValidationResult, ValidationSeverity, Validator,
};
