//! Session handling: token generation, the session cookie pair, and
//! request resolution.
//!
//! There is no server-side session table. A session is defined entirely by
//! the cookies (or bearer header) a request carries, so every request is
//! resolved independently and nothing can revoke a token before its cookie
//! expires.

pub mod cookies;
pub mod token;

use axum::http::HeaderMap;
use axum_extra::extract::CookieJar;

/// Identity used when a token is presented without a companion email cookie.
pub const PLACEHOLDER_EMAIL: &str = "user@example.com";

/// The nominal identity resolved from a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub email: String,
    pub token: String,
}

/// Resolve the session for a request.
///
/// Resolution order: `Authorization: Bearer <token>` header first, then the
/// token cookie. Identity comes from the email cookie when present. The
/// token and email are never cross-checked; any non-empty token yields a
/// resolved session. Returns `None` only when no token is found anywhere.
pub fn resolve(headers: &HeaderMap, jar: &CookieJar) -> Option<SessionUser> {
    let token = bearer_token(headers).or_else(|| cookies::token(jar))?;
    if token.is_empty() {
        return None;
    }

    let email = cookies::email(jar).unwrap_or_else(|| PLACEHOLDER_EMAIL.to_string());
    Some(SessionUser { email, token })
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|t| t.to_string())
}
