//! Alias address generation and validation.
//!
//! Random aliases get a system-generated local part; custom aliases are
//! validated against the local-part rules before they are stored.

use crate::error::AppError;
use rand::Rng;
use serde_json::json;

/// Length of a generated random alias address.
pub const RANDOM_ADDRESS_LENGTH: usize = 9;

/// Maximum length of a custom alias address.
pub const MAX_CUSTOM_ADDRESS_LENGTH: usize = 64;

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Generates a random alias local part of [`RANDOM_ADDRESS_LENGTH`]
/// characters from `[a-z0-9]`.
pub fn generate_address() -> String {
    let mut rng = rand::rng();

    (0..RANDOM_ADDRESS_LENGTH)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Validates the local part of a custom alias.
///
/// # Rules
///
/// - Length: 1-64 characters
/// - Allowed characters: lowercase letters, digits, dots, hyphens
/// - Cannot start or end with a dot or hyphen
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_custom_address(address: &str) -> Result<(), AppError> {
    if address.is_empty() || address.len() > MAX_CUSTOM_ADDRESS_LENGTH {
        return Err(AppError::bad_request(
            "Address must be 1-64 characters",
            json!({ "provided_length": address.len() }),
        ));
    }

    if !address
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.' || c == '-')
    {
        return Err(AppError::bad_request(
            "Address can only contain lowercase letters, digits, dots, and hyphens",
            json!({ "address": address }),
        ));
    }

    let edge = |c: char| c == '.' || c == '-';
    if address.starts_with(edge) || address.ends_with(edge) {
        return Err(AppError::bad_request(
            "Address cannot start or end with a dot or hyphen",
            json!({ "address": address }),
        ));
    }

    Ok(())
}
