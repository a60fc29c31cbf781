pub mod api;
pub mod chat;
pub mod cli;
pub mod config;
pub mod i18n;
pub mod photos;
pub mod session;

use chat::ChatStore;
use config::Config;
use photos::PhotoClient;

/// Shared application state.
///
/// No database and no session table: the chat store is the only mutable
/// server-side state, and it is per-session and in-memory.
pub struct AppState {
    pub config: Config,
    pub chat: ChatStore,
    pub photos: PhotoClient,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let photos = PhotoClient::new(&config.photos);
        Self {
            config,
            chat: ChatStore::new(),
            photos,
        }
    }
}
