//! Input validation for API requests.
//!
//! Validation order matters and is part of the contract: presence checks
//! run before strength checks, so `{email: "", password: "x"}` reports
//! missing fields rather than a weak password.

use lazy_static::lazy_static;
use regex::Regex;

use super::error::ApiError;

/// Minimum accepted password length for registration
pub const MIN_PASSWORD_LEN: usize = 6;

/// Maximum accepted email length (RFC 5321 limit)
const MAX_EMAIL_LEN: usize = 254;

lazy_static! {
    /// Loose email shape check: something@something.something
    static ref EMAIL_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// Presence check shared by login and register.
pub fn require_credentials(email: &str, password: &str) -> Result<(), ApiError> {
    if email.is_empty() || password.is_empty() {
        return Err(ApiError::missing_fields("Email and password are required"));
    }
    Ok(())
}

/// Registration-only password rule.
pub fn require_password_strength(password: &str) -> Result<(), ApiError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ApiError::weak_password(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters long"
        )));
    }
    Ok(())
}

/// Shape check for emails. Not applied to the demo login/register flow
/// (which only requires presence), but used by the CLI client to catch
/// obvious typos before a round trip.
pub fn is_plausible_email(email: &str) -> bool {
    email.len() <= MAX_EMAIL_LEN && EMAIL_REGEX.is_match(email)
}
