//! Redis verification code store
//!
//! Each `(biz, phone)` pair owns two keys, both with the same expiry:
//! - `phone_code:{biz}:{phone}` - the code
//! - `phone_code:{biz}:{phone}:cnt` - attempts remaining
//!
//! Both keys are only touched from the Lua scripts in `lua/`, so every
//! send and every verify runs as a single atomic step on the server.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use redis::Script;
use tracing::{debug, error};
use wb_core::errors::{DomainError, DomainResult};
use wb_core::repositories::{attempts_key, code_key, CodeCache};
use wb_shared::config::VerificationConfig;

use super::RedisClient;

static SET_CODE_SCRIPT: Lazy<Script> = Lazy::new(|| Script::new(include_str!("lua/set_code.lua")));
static VERIFY_CODE_SCRIPT: Lazy<Script> =
    Lazy::new(|| Script::new(include_str!("lua/verify_code.lua")));

/// Verification code store backed by Redis
#[derive(Clone)]
pub struct RedisCodeCache {
    client: RedisClient,
    expiration_seconds: u64,
    resend_interval_seconds: u64,
    max_attempts: u32,
}

impl RedisCodeCache {
    pub fn new(client: RedisClient, config: &VerificationConfig) -> Self {
        Self {
            client,
            expiration_seconds: config.expiration_seconds,
            resend_interval_seconds: config.resend_interval_seconds,
            max_attempts: config.max_attempts,
        }
    }

    fn keys(biz: &str, phone: &str) -> [String; 2] {
        [code_key(biz, phone), attempts_key(biz, phone)]
    }
}

#[async_trait]
impl CodeCache for RedisCodeCache {
    async fn set(&self, biz: &str, phone: &str, code: &str) -> DomainResult<()> {
        let keys = Self::keys(biz, phone);
        let args = [
            code.to_string(),
            self.expiration_seconds.to_string(),
            self.resend_interval_seconds.to_string(),
            self.max_attempts.to_string(),
        ];

        let status = self.client.run_script(&SET_CODE_SCRIPT, &keys, &args).await?;
        match status {
            0 => {
                debug!(key = %keys[0], "Verification code stored");
                Ok(())
            }
            -1 => Err(DomainError::CodeSendTooMany),
            -2 => {
                error!(key = %keys[0], "Verification code key exists without expiry");
                Err(DomainError::Integrity {
                    message: format!("{} has no expiry", keys[0]),
                })
            }
            other => Err(DomainError::Integrity {
                message: format!("unexpected set_code status {}", other),
            }),
        }
    }

    async fn verify(&self, biz: &str, phone: &str, input_code: &str) -> DomainResult<bool> {
        let keys = Self::keys(biz, phone);
        let args = [input_code.to_string()];

        let status = self.client.run_script(&VERIFY_CODE_SCRIPT, &keys, &args).await?;
        match status {
            0 => Ok(true),
            -1 => Err(DomainError::CodeVerifyTooMany),
            -2 | -3 => Ok(false),
            other => Err(DomainError::Integrity {
                message: format!("unexpected verify_code status {}", other),
            }),
        }
    }
}
