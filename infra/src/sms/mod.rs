//! SMS service module
//!
//! Implementations of the `SmsSender` interface from `wb_core`.
//! Vendor transports plug in here; the mock sender is used in development
//! and tests.

pub mod mock_sms;


pub use mock_sms::MockSmsService;
