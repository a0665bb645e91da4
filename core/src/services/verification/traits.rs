//! SMS delivery interface

use async_trait::async_trait;

use crate::errors::DomainResult;

/// Trait for SMS service integration
#[async_trait]
pub trait SmsSender: Send + Sync {
    /// Render `args` into template `template_id` and deliver it to `numbers`
    ///
    /// Failures are reported as `DomainError::Sms`.
    async fn send(&self, template_id: &str, args: &[String], numbers: &[String]) -> DomainResult<()>;
}
