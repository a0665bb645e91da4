//! Key-value store configuration module

use serde::{Deserialize, Serialize};

/// Backing store for verification codes and the user cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheType {
    Redis,
    /// Process-local store, only meaningful for a single instance
    Memory,
}

/// Redis cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Redis connection URL
    pub url: String,

    /// Store implementation to use
    #[serde(default = "default_cache_type")]
    pub cache_type: CacheType,

    /// Connection attempts before giving up at startup
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Base delay between connection attempts in milliseconds
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Per-command response timeout in seconds
    #[serde(default = "default_response_timeout")]
    pub response_timeout: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: String::from("redis://localhost:6379"),
            cache_type: default_cache_type(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            response_timeout: default_response_timeout(),
        }
    }
}

impl CacheConfig {
    /// Create a new cache configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Select the store implementation
    pub fn with_type(mut self, cache_type: CacheType) -> Self {
        self.cache_type = cache_type;
        self
    }
}

fn default_cache_type() -> CacheType {
    CacheType::Redis
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    100
}

fn default_response_timeout() -> u64 {
    5
}
