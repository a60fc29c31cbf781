//! Client for the upstream photo API (Unsplash-style).
//!
//! The explore feature is a thin proxy over this client: random photos,
//! keyword search, and single-photo lookup, authenticated with a
//! `Client-ID` access key. Upstream failures are folded into a small
//! error enum so handlers can map them onto stable HTTP responses.

use reqwest::{header, Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::config::PhotosConfig;

const MAX_PER_PAGE: u32 = 50;

#[derive(Debug, Error)]
pub enum PhotoError {
    #[error("photo API key is not configured")]
    MissingApiKey,
    #[error("photo API rejected the access key")]
    InvalidApiKey,
    #[error("photo API rate limit exceeded")]
    RateLimited,
    #[error("resource not found")]
    NotFound,
    #[error("invalid request parameters: {0}")]
    InvalidParameters(String),
    #[error("photo API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("failed to reach photo API: {0}")]
    Network(#[from] reqwest::Error),
}

/// Subset of the upstream photo representation that the UI consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Photo {
    pub id: String,
    pub width: u32,
    pub height: u32,
    pub color: Option<String>,
    pub description: Option<String>,
    pub alt_description: Option<String>,
    pub urls: PhotoUrls,
    pub links: PhotoLinks,
    pub user: PhotoAuthor,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoUrls {
    pub raw: String,
    pub full: String,
    pub regular: String,
    pub small: String,
    pub thumb: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoLinks {
    pub html: String,
    pub download: String,
    pub download_location: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoAuthor {
    pub username: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResults {
    pub total: u64,
    pub total_pages: u64,
    pub results: Vec<Photo>,
}

pub struct PhotoClient {
    http: Client,
    base_url: String,
    access_key: Option<String>,
}

impl PhotoClient {
    pub fn new(config: &PhotosConfig) -> Self {
        Self {
            http: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            access_key: config.access_key.clone(),
        }
    }

    /// Fetch `count` random photos. The count is clamped to the upstream's
    /// accepted range rather than rejected.
    pub async fn random(&self, count: u32) -> Result<Vec<Photo>, PhotoError> {
        let count = count.clamp(1, MAX_PER_PAGE);
        self.get_json(
            "/photos/random",
            &[("count".to_string(), count.to_string())],
        )
        .await
    }

    /// Search photos by keyword.
    pub async fn search(
        &self,
        query: &str,
        page: u32,
        per_page: u32,
    ) -> Result<SearchResults, PhotoError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(PhotoError::InvalidParameters(
                "Search query is required".to_string(),
            ));
        }

        let params = [
            ("query".to_string(), query.to_string()),
            ("page".to_string(), page.max(1).to_string()),
            (
                "per_page".to_string(),
                per_page.clamp(1, MAX_PER_PAGE).to_string(),
            ),
        ];
        self.get_json("/search/photos", &params).await
    }

    /// Fetch a single photo by id.
    pub async fn get(&self, id: &str) -> Result<Photo, PhotoError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(PhotoError::InvalidParameters(
                "Image ID is required".to_string(),
            ));
        }
        self.get_json(&format!("/photos/{id}"), &[]).await
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(String, String)],
    ) -> Result<T, PhotoError> {
        let access_key = self.access_key.as_deref().ok_or(PhotoError::MissingApiKey)?;

        let response = self
            .http
            .get(format!("{}{}", self.base_url, endpoint))
            .header(header::AUTHORIZATION, format!("Client-ID {access_key}"))
            .header(header::ACCEPT, "application/json")
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = extract_error_message(response).await;
            return Err(error_for_status(status, message));
        }

        Ok(response.json().await?)
    }
}

/// Map an upstream HTTP status onto the error taxonomy.
fn error_for_status(status: StatusCode, message: String) -> PhotoError {
    match status {
        StatusCode::UNAUTHORIZED => PhotoError::InvalidApiKey,
        StatusCode::FORBIDDEN => PhotoError::RateLimited,
        StatusCode::NOT_FOUND => PhotoError::NotFound,
        StatusCode::UNPROCESSABLE_ENTITY => PhotoError::InvalidParameters(message),
        _ => PhotoError::Api {
            status: status.as_u16(),
            message,
        },
    }
}

// Upstream errors arrive as {"errors": ["...", ...]}; fall back to the
// status text when the body is not in that shape.
async fn extract_error_message(response: reqwest::Response) -> String {
    let status = response.status();
    let body: Option<Value> = response.json().await.ok();
    body.as_ref()
        .and_then(|v| v.get("errors"))
        .and_then(|e| e.get(0))
        .and_then(|m| m.as_str())
        .map(|s| s.to_string())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        })
}
