//! Route guard middleware.
//!
//! One admission decision per request, evaluated in fixed priority order.
//! The guard checks cookie *presence* only: any request carrying the token
//! cookie is admitted, with no validation of the token itself. That is the
//! whole authentication model of this demo app.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use axum_extra::extract::CookieJar;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use tracing::debug;

use super::error::ErrorBody;
use crate::session::cookies;

/// Page prefixes reachable without a session.
const PUBLIC_PAGES: &[&str] = &["/auth/login", "/auth/register"];

/// API paths reachable without a session (exact match).
const PUBLIC_API: &[&str] = &["/api/login", "/api/register", "/api/logout", "/health"];

/// The guard's decision for a request path + cookie state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    RejectApi,
    RedirectToLogin { from: String },
}

/// Classify a request. Pure so it can be tested without a router.
pub fn decide(path: &str, has_token: bool) -> Decision {
    if PUBLIC_PAGES.iter().any(|p| path.starts_with(p)) {
        return Decision::Allow;
    }

    if PUBLIC_API.contains(&path) {
        return Decision::Allow;
    }

    if path.starts_with("/assets") || path == "/favicon.ico" {
        return Decision::Allow;
    }

    if path.starts_with("/api") {
        if has_token {
            return Decision::Allow;
        }
        return Decision::RejectApi;
    }

    if !has_token {
        return Decision::RedirectToLogin {
            from: path.to_string(),
        };
    }

    Decision::Allow
}

/// Axum middleware wrapping [`decide`].
pub async fn route_guard(request: Request<Body>, next: Next) -> Response {
    let jar = CookieJar::from_headers(request.headers());
    let has_token = cookies::token(&jar).is_some();
    let path = request.uri().path().to_string();

    match decide(&path, has_token) {
        Decision::Allow => {
            debug!(%path, has_token, "Route guard: pass");
            next.run(request).await
        }
        Decision::RejectApi => {
            debug!(%path, "Route guard: unauthorized API access");
            let body = ErrorBody {
                message: "Authentication required".to_string(),
                code: "unauthorized".to_string(),
            };
            (StatusCode::UNAUTHORIZED, Json(body)).into_response()
        }
        Decision::RedirectToLogin { from } => {
            debug!(%path, "Route guard: redirecting to login");
            let target = format!("{}?from={}", "/auth/login", encode_from(&from));
            Redirect::temporary(&target).into_response()
        }
    }
}

// Matches how browsers encode query parameter values, so '/' becomes %2F.
fn encode_from(path: &str) -> String {
    utf8_percent_encode(path, NON_ALPHANUMERIC).to_string()
}
