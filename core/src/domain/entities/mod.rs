//! Domain entities representing core business objects.

pub mod claims;
pub mod user;
pub mod verification_code;

// Re-export commonly used types
pub use claims::{BaseClaims, UserClaims};
pub use user::{User, WechatInfo};
pub use verification_code::{generate_code, CODE_LENGTH};
