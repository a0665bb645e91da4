//! bcrypt implementation of the PasswordHasher trait

use async_trait::async_trait;
use wb_core::errors::{DomainError, DomainResult};
use wb_core::services::PasswordHasher;

/// Password hasher using bcrypt
///
/// Hashing runs on the blocking thread pool since a single bcrypt round at
/// the default cost takes tens of milliseconds.
#[derive(Debug, Clone)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, plain: &str) -> DomainResult<String> {
        let plain = plain.to_string();
        let cost = self.cost;

        tokio::task::spawn_blocking(move || bcrypt::hash(plain, cost))
            .await
            .map_err(join_error)?
            .map_err(|e| DomainError::Internal {
                message: format!("Password hashing failed: {}", e),
            })
    }

    async fn verify(&self, plain: &str, hashed: &str) -> DomainResult<bool> {
        let plain = plain.to_string();
        let hashed = hashed.to_string();

        match tokio::task::spawn_blocking(move || bcrypt::verify(plain, &hashed))
            .await
            .map_err(join_error)?
        {
            Ok(matched) => Ok(matched),
            // A stored value that is not a bcrypt hash never matches
            Err(e) => {
                tracing::warn!(error = %e, "Stored password hash is malformed");
                Ok(false)
            }
        }
    }
}

fn join_error(e: tokio::task::JoinError) -> DomainError {
    DomainError::Internal {
        message: format!("Password hashing task failed: {}", e),
    }
}
