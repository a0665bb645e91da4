//! Verification code and user cache policies

use serde::{Deserialize, Serialize};

/// Policy for SMS verification codes
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Lifetime of a stored code in seconds
    #[serde(default = "default_expiration_seconds")]
    pub expiration_seconds: u64,

    /// Minimum seconds between two successful sends for the same key
    #[serde(default = "default_resend_interval_seconds")]
    pub resend_interval_seconds: u64,

    /// Wrong guesses allowed before the entry locks
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// SMS template used to deliver the code
    #[serde(default = "default_sms_template_id")]
    pub sms_template_id: String,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            expiration_seconds: default_expiration_seconds(),
            resend_interval_seconds: default_resend_interval_seconds(),
            max_attempts: default_max_attempts(),
            sms_template_id: default_sms_template_id(),
        }
    }
}

/// Policy for the read-through user cache
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UserCacheConfig {
    /// Time-to-live of a cached user record in seconds
    #[serde(default = "default_user_ttl_seconds")]
    pub ttl_seconds: u64,

    /// Pending repopulations kept before new ones are dropped
    #[serde(default = "default_repopulate_queue_capacity")]
    pub repopulate_queue_capacity: usize,
}

impl Default for UserCacheConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_user_ttl_seconds(),
            repopulate_queue_capacity: default_repopulate_queue_capacity(),
        }
    }
}

fn default_expiration_seconds() -> u64 {
    600
}

fn default_resend_interval_seconds() -> u64 {
    60
}

fn default_max_attempts() -> u32 {
    3
}

fn default_sms_template_id() -> String {
    "1877556".to_string()
}

fn default_user_ttl_seconds() -> u64 {
    15 * 60
}

fn default_repopulate_queue_capacity() -> usize {
    1024
}
