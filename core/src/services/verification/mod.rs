//! Verification code service for SMS-based login
//!
//! This module provides the verification code workflow:
//! - Code generation and delivery through an SMS sender
//! - Code verification against the atomic code store
//! - Hiding of the attempt lockout from callers

mod config;
mod service;
mod traits;


pub use config::CodeServiceConfig;
pub use service::CodeService;
pub use traits::SmsSender;
