//! Short code generation.
//!
//! Codes are drawn from a CSPRNG over a 62-symbol alphabet. Uniqueness is not
//! guaranteed here; it is enforced by the store's unique constraint.

use rand::Rng;

/// Alphabet for generated codes.
pub const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Length of generated codes.
pub const CODE_LENGTH: usize = 6;

/// Generates a random short code.
///
/// 62^6 (about 5.7e10) possible codes.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code();
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code() -> String {
    let mut rng = rand::rng();

    (0..CODE_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}
