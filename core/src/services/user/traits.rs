use async_trait::async_trait;

use crate::errors::DomainResult;

/// One-way password hashing
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash `plain` for storage
    async fn hash(&self, plain: &str) -> DomainResult<String>;

    /// Check `plain` against a stored hash
    async fn verify(&self, plain: &str, hashed: &str) -> DomainResult<bool>;
}
