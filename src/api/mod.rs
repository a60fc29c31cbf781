pub mod auth;
pub mod chat;
pub mod error;
pub mod guard;
pub mod photos;
pub mod validation;

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Build the application router.
///
/// The route guard runs before routing (public allowlist, 401 for
/// unauthenticated API calls, login redirect for pages), so individual
/// handlers only ever see admitted requests. Whether a token is *valid*
/// is never checked anywhere; presence is the entire policy.
pub fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        // Auth (register/login/logout are on the guard's public list)
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
        // Chat simulation
        .route("/chat/messages", get(chat::list_messages))
        .route("/chat/messages", post(chat::send_message))
        .route("/chat/messages", delete(chat::clear_messages))
        // Photo explore
        .route("/photos/random", get(photos::random_photos))
        .route("/photos/search", get(photos::search_photos));

    // SPA bundle with index fallback. Page requests reach this service
    // only after the guard admits them.
    let index_file = state.config.server.static_dir.join("index.html");
    let serve_static = ServeDir::new(&state.config.server.static_dir)
        .not_found_service(ServeFile::new(&index_file));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes)
        .fallback_service(serve_static)
        .layer(middleware::from_fn(guard::route_guard))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
