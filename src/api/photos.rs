//! Photo explore endpoints, proxying the upstream photo API.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use super::error::ApiError;
use crate::photos::{Photo, SearchResults};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RandomParams {
    pub count: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub query: String,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// GET /api/photos/random
pub async fn random_photos(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RandomParams>,
) -> Result<Json<Vec<Photo>>, ApiError> {
    let count = params
        .count
        .unwrap_or(state.config.photos.default_per_page);
    let photos = state.photos.random(count).await?;
    Ok(Json(photos))
}

/// GET /api/photos/search
pub async fn search_photos(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResults>, ApiError> {
    let per_page = params
        .per_page
        .unwrap_or(state.config.photos.default_per_page);
    let results = state
        .photos
        .search(&params.query, params.page.unwrap_or(1), per_page)
        .await?;
    Ok(Json(results))
}
