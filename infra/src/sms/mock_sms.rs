//! Mock SMS Service Implementation
//!
//! A mock implementation of the SMS sender for development and testing.
//! Messages are logged instead of sent.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{info, warn};
use wb_core::errors::{DomainError, DomainResult};
use wb_core::services::SmsSender;
use wb_shared::phone::{is_valid_phone, mask_phone_number};

/// Mock SMS service for development and testing
///
/// This implementation:
/// - Logs deliveries with masked numbers
/// - Validates phone numbers
/// - Tracks message count and the last arguments per number
#[derive(Clone, Default)]
pub struct MockSmsService {
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Last template arguments delivered to each number
    last_args: Arc<Mutex<HashMap<String, Vec<String>>>>,
    /// Whether to simulate failures (for testing)
    simulate_failure: Arc<AtomicBool>,
}

impl MockSmsService {
    /// Create a new mock SMS service
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the total number of messages sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }

    /// Template arguments of the last message delivered to `number`
    pub async fn last_args(&self, number: &str) -> Option<Vec<String>> {
        self.last_args.lock().await.get(number).cloned()
    }
}

#[async_trait]
impl SmsSender for MockSmsService {
    async fn send(&self, template_id: &str, args: &[String], numbers: &[String]) -> DomainResult<()> {
        if let Some(invalid) = numbers.iter().find(|n| !is_valid_phone(n)) {
            return Err(DomainError::Sms {
                message: format!("Invalid phone number format: {}", mask_phone_number(invalid)),
            });
        }

        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!(provider = "mock", template_id, "Mock SMS service simulating failure");
            return Err(DomainError::Sms {
                message: "Simulated SMS sending failure".to_string(),
            });
        }

        let mut last_args = self.last_args.lock().await;
        for number in numbers {
            let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;
            last_args.insert(number.clone(), args.to_vec());

            info!(
                target: "sms_service",
                provider = "mock",
                template_id,
                phone = %mask_phone_number(number),
                message_number = count,
                "SMS sent successfully (mock)"
            );
        }

        Ok(())
    }
}
