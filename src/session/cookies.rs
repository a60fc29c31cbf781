//! Session cookie codec.
//!
//! Two cookies make up a session: the token and the companion email.
//! They always share one policy (path, max-age, SameSite, HttpOnly), so a
//! session can never have the identity cookie outlive the token cookie.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use percent_encoding::percent_decode_str;

use crate::config::AuthConfig;

/// Name of the session token cookie.
pub const AUTH_COOKIE: &str = "auth_token";
/// Name of the companion identity cookie.
pub const EMAIL_COOKIE: &str = "user_email";

/// Set both session cookies with the shared policy.
///
/// The email is stored percent-decoded: some upstream form layers hand us
/// an already-encoded address, so decoding here keeps the stored value
/// canonical regardless of the call site.
pub fn set_session(jar: CookieJar, auth: &AuthConfig, token: &str, email: &str) -> CookieJar {
    let email = decode_cookie_value(email);
    jar.add(session_cookie(AUTH_COOKIE, token.to_string(), auth))
        .add(session_cookie(EMAIL_COOKIE, email, auth))
}

/// Remove both session cookies. Clearing absent cookies is a no-op.
pub fn clear_session(jar: CookieJar) -> CookieJar {
    jar.remove(removal_cookie(AUTH_COOKIE))
        .remove(removal_cookie(EMAIL_COOKIE))
}

/// Read the session token cookie, if present.
pub fn token(jar: &CookieJar) -> Option<String> {
    jar.get(AUTH_COOKIE).map(|c| c.value().to_string())
}

/// Read the identity cookie, decoding defensively.
pub fn email(jar: &CookieJar) -> Option<String> {
    jar.get(EMAIL_COOKIE)
        .map(|c| decode_cookie_value(c.value()))
}

fn session_cookie(name: &'static str, value: String, auth: &AuthConfig) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .max_age(time_duration(auth.session_max_age))
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(auth.secure_cookies)
        .build()
}

// Removal must match the path the cookies were set with, or browsers
// keep the original around.
fn removal_cookie(name: &'static str) -> Cookie<'static> {
    Cookie::build(name).path("/").build()
}

fn time_duration(secs: u64) -> time::Duration {
    time::Duration::seconds(secs as i64)
}

fn decode_cookie_value(value: &str) -> String {
    percent_decode_str(value)
        .decode_utf8()
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth_config() -> AuthConfig {
        AuthConfig::default()
    }

    #[test]
    fn set_session_writes_both_cookies() {
        let jar = set_session(CookieJar::new(), &auth_config(), "tok123", "a@b.com");
        let token = jar.get(AUTH_COOKIE).unwrap();
        let email = jar.get(EMAIL_COOKIE).unwrap();

        assert_eq!(token.value(), "tok123");
        assert_eq!(email.value(), "a@b.com");
        for cookie in [token, email] {
            assert_eq!(cookie.path(), Some("/"));
            assert_eq!(cookie.http_only(), Some(true));
            assert_eq!(cookie.same_site(), Some(SameSite::Lax));
            assert_eq!(
                cookie.max_age(),
                Some(time::Duration::seconds(7 * 24 * 60 * 60))
            );
        }
    }

    #[test]
    fn secure_flag_follows_config() {
        let auth = AuthConfig {
            secure_cookies: true,
            ..AuthConfig::default()
        };
        let jar = set_session(CookieJar::new(), &auth, "t", "a@b.com");
        assert_eq!(jar.get(AUTH_COOKIE).unwrap().secure(), Some(true));
    }

    #[test]
    fn stores_email_decoded() {
        let jar = set_session(CookieJar::new(), &auth_config(), "t", "a%40b.com");
        assert_eq!(jar.get(EMAIL_COOKIE).unwrap().value(), "a@b.com");
    }

    #[test]
    fn reads_email_decoded() {
        let jar = CookieJar::new().add(Cookie::new(EMAIL_COOKIE, "user%40example.com"));
        assert_eq!(email(&jar).as_deref(), Some("user@example.com"));
    }

    #[test]
    fn clear_session_removes_both() {
        let jar = set_session(CookieJar::new(), &auth_config(), "t", "a@b.com");
        let jar = clear_session(jar);
        // The jar retains removal cookies (Max-Age=0) so clients drop them.
        assert!(jar
            .iter()
            .filter(|c| c.name() == AUTH_COOKIE || c.name() == EMAIL_COOKIE)
            .all(|c| c.value().is_empty()));
    }
}
