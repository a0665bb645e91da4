//! Business services containing domain logic and use cases.

pub mod user;
pub mod verification;

// Re-export commonly used types
pub use user::{PasswordHasher, UserService};
pub use verification::{CodeService, CodeServiceConfig, SmsSender};
