//! Custom subdomain normalisation and validation.

use crate::error::AppError;
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Subdomains that can never be claimed by a profile.
pub const RESERVED_SUBDOMAINS: &[&str] = &[
    "www", "mail", "smtp", "imap", "pop", "mx", "relay", "mozmail", "mozilla", "firefox", "admin",
    "api", "dashboard", "support", "help", "accounts", "abuse", "postmaster", "noreply",
];

static SUBDOMAIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?$").expect("subdomain regex is valid")
});

/// Trims and lower-cases user input before validation and storage.
pub fn normalize_subdomain(input: &str) -> String {
    input.trim().to_ascii_lowercase()
}

/// Validates an already normalised subdomain.
///
/// # Rules
///
/// - Length: 1-63 characters
/// - Allowed characters: lowercase letters, digits, hyphens
/// - Cannot start or end with a hyphen
/// - Cannot be a reserved name
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_subdomain(subdomain: &str) -> Result<(), AppError> {
    if !SUBDOMAIN_RE.is_match(subdomain) {
        return Err(AppError::bad_request(
            "Subdomain must be 1-63 lowercase letters, digits, or hyphens, not starting or ending with a hyphen",
            json!({ "subdomain": subdomain }),
        ));
    }

    if RESERVED_SUBDOMAINS.contains(&subdomain) {
        return Err(AppError::bad_request(
            "This subdomain is reserved",
            json!({ "subdomain": subdomain }),
        ));
    }

    Ok(())
}
