//! Configuration for the code service

use wb_shared::config::VerificationConfig;

/// Default SMS template for login codes
pub const DEFAULT_SMS_TEMPLATE_ID: &str = "1877556";

/// Configuration for the code service
#[derive(Debug, Clone)]
pub struct CodeServiceConfig {
    /// SMS template the code is rendered into
    pub sms_template_id: String,
}

impl Default for CodeServiceConfig {
    fn default() -> Self {
        Self {
            sms_template_id: DEFAULT_SMS_TEMPLATE_ID.to_string(),
        }
    }
}

impl From<&VerificationConfig> for CodeServiceConfig {
    fn from(config: &VerificationConfig) -> Self {
        Self {
            sms_template_id: config.sms_template_id.clone(),
        }
    }
}
