//! Main code service implementation

use std::sync::Arc;

use tracing::{debug, error, info, warn};
use wb_shared::utils::phone::mask_phone_number;

use crate::domain::entities::verification_code::generate_code;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::code_cache::CodeCache;

use super::config::CodeServiceConfig;
use super::traits::SmsSender;

/// Issues and checks SMS verification codes
///
/// Codes are namespaced by a business tag (e.g. `"login"`), so the same
/// phone can hold independent codes per use case.
pub struct CodeService<C: ?Sized, S: ?Sized> {
    /// Atomic code store
    cache: Arc<C>,
    /// SMS service for delivering codes
    sms: Arc<S>,
    /// Service configuration
    config: CodeServiceConfig,
}

impl<C, S> CodeService<C, S>
where
    C: CodeCache + ?Sized,
    S: SmsSender + ?Sized,
{
    /// Create a new code service
    pub fn new(cache: Arc<C>, sms: Arc<S>, config: CodeServiceConfig) -> Self {
        Self { cache, sms, config }
    }

    /// Generate a code for `(biz, phone)`, store it and text it
    ///
    /// # Errors
    /// * `DomainError::CodeSendTooMany` - a code was sent moments ago
    /// * `DomainError::Integrity` / `DomainError::Cache` - store failures, unchanged
    /// * `DomainError::Sms` - the code was stored but delivery failed
    pub async fn send(&self, biz: &str, phone: &str) -> DomainResult<()> {
        let code = generate_code();

        if let Err(e) = self.cache.set(biz, phone, &code).await {
            match &e {
                DomainError::CodeSendTooMany => warn!(
                    biz,
                    phone = %mask_phone_number(phone),
                    event = "code_send_too_many",
                    "Verification code requested inside the resend cooldown"
                ),
                DomainError::Integrity { .. } => error!(
                    biz,
                    phone = %mask_phone_number(phone),
                    error = %e,
                    event = "code_store_corrupt",
                    "Verification code entry is in an impossible state"
                ),
                _ => error!(
                    biz,
                    phone = %mask_phone_number(phone),
                    error = %e,
                    event = "code_store_failed",
                    "Failed to store verification code"
                ),
            }
            return Err(e);
        }

        debug!(biz, phone = %mask_phone_number(phone), "Verification code stored");

        self.sms
            .send(
                &self.config.sms_template_id,
                &[code],
                &[phone.to_string()],
            )
            .await
            .map_err(|e| {
                error!(
                    biz,
                    phone = %mask_phone_number(phone),
                    error = %e,
                    event = "code_delivery_failed",
                    "Failed to deliver verification code"
                );
                match e {
                    DomainError::Sms { .. } => e,
                    other => DomainError::Sms {
                        message: other.to_string(),
                    },
                }
            })?;

        info!(biz, phone = %mask_phone_number(phone), event = "code_sent", "Verification code sent");
        Ok(())
    }

    /// Check `input_code` for `(biz, phone)`
    ///
    /// Running out of attempts is reported as a plain `Ok(false)`, the same
    /// answer as a wrong code, so callers cannot tell when lockout starts.
    /// Only store failures surface as errors.
    pub async fn verify(&self, biz: &str, phone: &str, input_code: &str) -> DomainResult<bool> {
        match self.cache.verify(biz, phone, input_code).await {
            Ok(true) => {
                info!(biz, phone = %mask_phone_number(phone), event = "code_verified", "Verification code matched");
                Ok(true)
            }
            Ok(false) => {
                debug!(biz, phone = %mask_phone_number(phone), "Verification code did not match");
                Ok(false)
            }
            Err(DomainError::CodeVerifyTooMany) => {
                warn!(
                    biz,
                    phone = %mask_phone_number(phone),
                    event = "code_verify_too_many",
                    "Verification attempts exhausted"
                );
                Ok(false)
            }
            Err(e) => {
                error!(
                    biz,
                    phone = %mask_phone_number(phone),
                    error = %e,
                    event = "code_verify_failed",
                    "System error during code verification"
                );
                Err(e)
            }
        }
    }
}
