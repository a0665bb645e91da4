//! Atomic verification-code store interface.
//!
//! Both operations must execute as one indivisible unit inside the store.
//! Implementations never read-then-write from the caller side: two
//! concurrent sends must not both observe an empty slot, and two concurrent
//! verifies must not both spend the same attempt.

use async_trait::async_trait;

use crate::errors::DomainResult;

/// Key holding the code for `(biz, phone)`
pub fn code_key(biz: &str, phone: &str) -> String {
    format!("phone_code:{}:{}", biz, phone)
}

/// Companion key holding attempts-remaining for `(biz, phone)`
pub fn attempts_key(biz: &str, phone: &str) -> String {
    format!("{}:cnt", code_key(biz, phone))
}

/// Store for short-lived verification codes
#[async_trait]
pub trait CodeCache: Send + Sync {
    /// Store `code` for `(biz, phone)`
    ///
    /// Creates the entry (fresh expiry, full attempts) when none exists or
    /// when the existing one is past the resend cooldown.
    ///
    /// # Errors
    /// * `DomainError::CodeSendTooMany` - an entry was created inside the cooldown window
    /// * `DomainError::Integrity` - an entry exists without an expiry
    /// * `DomainError::Cache` - the store could not be reached
    async fn set(&self, biz: &str, phone: &str, code: &str) -> DomainResult<()>;

    /// Check `input_code` against the entry for `(biz, phone)`
    ///
    /// Returns `Ok(true)` and deletes the entry on a match. A mismatch
    /// spends one attempt and returns `Ok(false)`; so does a missing entry,
    /// without touching anything.
    ///
    /// # Errors
    /// * `DomainError::CodeVerifyTooMany` - the entry has no attempts left
    /// * `DomainError::Cache` - the store could not be reached
    async fn verify(&self, biz: &str, phone: &str, input_code: &str) -> DomainResult<bool>;
}
