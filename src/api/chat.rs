//! Chat endpoints over the in-memory simulation store.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use super::error::ApiError;
use crate::chat::ChatMessage;
use crate::session::{self, SessionUser};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SendMessageResponse {
    pub message: ChatMessage,
    pub reply: ChatMessage,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessagesResponse {
    pub messages: Vec<ChatMessage>,
}

fn require_session(headers: &HeaderMap, jar: &CookieJar) -> Result<SessionUser, ApiError> {
    session::resolve(headers, jar)
        .ok_or_else(|| ApiError::unauthorized("Authentication required"))
}

/// List the session's conversation, oldest first.
pub async fn list_messages(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    jar: CookieJar,
) -> Result<Json<MessagesResponse>, ApiError> {
    let user = require_session(&headers, &jar)?;
    Ok(Json(MessagesResponse {
        messages: state.chat.messages(&user.token),
    }))
}

/// Append a user message and produce the simulated reply.
///
/// The handler sleeps for the configured response delay to mimic the
/// upstream model "thinking" before both messages are returned.
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    jar: CookieJar,
    payload: Result<Json<SendMessageRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SendMessageResponse>), ApiError> {
    let user = require_session(&headers, &jar)?;
    let Json(request) = payload.map_err(|_| ApiError::invalid_json())?;

    let content = request.content.trim();
    if content.is_empty() {
        return Err(ApiError::validation("Message content is required"));
    }
    let max_len = state.config.chat.max_message_len;
    if content.chars().count() > max_len {
        return Err(ApiError::validation(format!(
            "Message is too long (max {max_len} characters)"
        )));
    }

    let delay = state.config.chat.response_delay_ms;
    if delay > 0 {
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }

    let (message, reply) = state.chat.exchange(&user.token, content);
    Ok((
        StatusCode::CREATED,
        Json(SendMessageResponse { message, reply }),
    ))
}

/// Drop the session's conversation.
pub async fn clear_messages(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    jar: CookieJar,
) -> Result<StatusCode, ApiError> {
    let user = require_session(&headers, &jar)?;
    state.chat.clear(&user.token);
    Ok(StatusCode::NO_CONTENT)
}
