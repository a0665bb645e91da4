//! Verification code format and generation.

use rand::Rng;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Number of distinct codes (000000 - 999999)
const CODE_SPACE: u32 = 1_000_000;

/// Generate a uniformly random, zero-padded 6-digit code
///
/// `gen_range` samples without modulo bias, so every value in the space is
/// equally likely.
pub fn generate_code() -> String {
    let code = rand::thread_rng().gen_range(0..CODE_SPACE);
    format!("{:0width$}", code, width = CODE_LENGTH)
}

/// Whether `code` has the shape of a generated code
pub fn is_well_formed(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.bytes().all(|b| b.is_ascii_digit())
}
