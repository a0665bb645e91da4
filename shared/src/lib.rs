//! Shared utilities and common types for the Webook server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Tracing subscriber bootstrap
//! - Utility functions (phone masking and validation)

pub mod config;
pub mod logging;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheConfig, CacheType, DatabaseConfig, Environment, LogFormat, LoggingConfig,
    SmsConfig, UserCacheConfig, VerificationConfig,
};
pub use utils::phone;
