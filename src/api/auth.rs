//! Authentication endpoints: register, login, logout, and the identity
//! check (`/api/me`).
//!
//! This is mock authentication. No user store exists, so registration
//! never collides, login never verifies a password, and the issued token
//! is an opaque random string that nothing ever validates. A "session" is
//! the cookie pair these handlers set, nothing more.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use axum_extra::extract::CookieJar;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use super::error::ApiError;
use super::validation;
use crate::i18n::{lookup, Locale, MessageKey};
use crate::session::{self, cookies, token};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct AuthCredentials {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub email: String,
    pub token: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub email: String,
    #[serde(rename = "registeredAt")]
    pub registered_at: String,
    pub subscriptions: Vec<String>,
}

/// Register endpoint. Every well-formed registration succeeds; there is
/// no store to collide with.
pub async fn register(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    payload: Result<Json<AuthCredentials>, JsonRejection>,
) -> Result<(StatusCode, CookieJar, Json<AuthResponse>), ApiError> {
    let Json(credentials) = payload.map_err(|_| ApiError::invalid_json())?;

    validation::require_credentials(&credentials.email, &credentials.password)?;
    validation::require_password_strength(&credentials.password)?;

    let token = token::generate(token::REGISTER_PREFIX);
    info!(email = %credentials.email, "Registered new user");

    let locale = Locale::from_jar(&jar);
    let jar = cookies::set_session(jar, &state.config.auth, &token, &credentials.email);

    Ok((
        StatusCode::CREATED,
        jar,
        Json(AuthResponse {
            email: credentials.email,
            token,
            message: lookup(locale, MessageKey::RegistrationSuccessful).to_string(),
        }),
    ))
}

/// Login endpoint. Succeeds whenever both fields are present; no
/// credential verification happens anywhere.
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    payload: Result<Json<AuthCredentials>, JsonRejection>,
) -> Result<(StatusCode, CookieJar, Json<AuthResponse>), ApiError> {
    let Json(credentials) = payload.map_err(|_| ApiError::invalid_json())?;

    validation::require_credentials(&credentials.email, &credentials.password)?;

    let token = token::generate(token::LOGIN_PREFIX);
    info!(email = %credentials.email, "User logged in");

    let locale = Locale::from_jar(&jar);
    let jar = cookies::set_session(jar, &state.config.auth, &token, &credentials.email);

    Ok((
        StatusCode::OK,
        jar,
        Json(AuthResponse {
            email: credentials.email,
            token,
            message: lookup(locale, MessageKey::LoginSuccessful).to_string(),
        }),
    ))
}

/// Logout endpoint. Clears both session cookies unconditionally, so it is
/// idempotent: logging out without a session still succeeds.
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<MessageResponse>) {
    let locale = Locale::from_jar(&jar);
    let jar = cookies::clear_session(jar);

    (
        jar,
        Json(MessageResponse {
            message: lookup(locale, MessageKey::LoggedOut).to_string(),
        }),
    )
}

/// Identity check. Resolves the session (bearer header preferred over
/// cookies) and returns the mock profile for it.
pub async fn me(headers: HeaderMap, jar: CookieJar) -> Result<Json<ProfileResponse>, ApiError> {
    let user = session::resolve(&headers, &jar)
        .ok_or_else(|| ApiError::unauthorized("Authentication token is missing or invalid"))?;

    Ok(Json(ProfileResponse {
        email: user.email,
        registered_at: Utc::now().to_rfc3339(),
        subscriptions: vec!["Basic Plan".to_string(), "Premium Content".to_string()],
    }))
}
