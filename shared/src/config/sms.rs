//! SMS delivery configuration

use serde::{Deserialize, Serialize};

/// SMS service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmsConfig {
    /// SMS service provider ("mock" is the only built-in one)
    pub provider: String,

    /// Vendor application id
    #[serde(default)]
    pub app_id: String,

    /// Signature shown to the recipient
    #[serde(default)]
    pub sign_name: String,
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self::new("mock")
    }
}

impl SmsConfig {
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            app_id: String::new(),
            sign_name: String::new(),
        }
    }
}
