//! Locale-aware message lookup.
//!
//! The UI stores a two-letter locale in a cookie; response `message`
//! strings for the auth flow are localized from a small static catalog.
//! Unknown locales fall back to English.

use axum_extra::extract::CookieJar;

/// Name of the locale cookie.
pub const LOCALE_COOKIE: &str = "locale";

/// Supported locales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    En,
    Ru,
}

impl Locale {
    pub fn from_code(code: &str) -> Self {
        match code {
            "ru" => Locale::Ru,
            _ => Locale::En,
        }
    }

    /// Read the locale cookie, defaulting to English.
    pub fn from_jar(jar: &CookieJar) -> Self {
        jar.get(LOCALE_COOKIE)
            .map(|c| Locale::from_code(c.value()))
            .unwrap_or_default()
    }
}

/// Message keys used by the auth endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey {
    LoginSuccessful,
    RegistrationSuccessful,
    LoggedOut,
}

/// Look up a message for a locale.
pub fn lookup(locale: Locale, key: MessageKey) -> &'static str {
    match (locale, key) {
        (Locale::En, MessageKey::LoginSuccessful) => "Login successful",
        (Locale::En, MessageKey::RegistrationSuccessful) => "Registration successful",
        (Locale::En, MessageKey::LoggedOut) => "Logged out successfully",
        (Locale::Ru, MessageKey::LoginSuccessful) => "Вход выполнен успешно",
        (Locale::Ru, MessageKey::RegistrationSuccessful) => "Регистрация выполнена успешно",
        (Locale::Ru, MessageKey::LoggedOut) => "Выход выполнен успешно",
    }
}
