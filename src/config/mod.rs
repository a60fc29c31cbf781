use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub photos: PhotosConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("./static")
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Session cookie lifetime in seconds (default: 7 days)
    #[serde(default = "default_session_max_age")]
    pub session_max_age: u64,
    /// Mark session cookies as Secure (enable behind HTTPS)
    #[serde(default)]
    pub secure_cookies: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_max_age: default_session_max_age(),
            secure_cookies: false,
        }
    }
}

fn default_session_max_age() -> u64 {
    7 * 24 * 60 * 60
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    /// Simulated AI "thinking" delay before a reply is produced, in milliseconds
    #[serde(default = "default_response_delay_ms")]
    pub response_delay_ms: u64,
    /// Maximum accepted message length in characters
    #[serde(default = "default_max_message_len")]
    pub max_message_len: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            response_delay_ms: default_response_delay_ms(),
            max_message_len: default_max_message_len(),
        }
    }
}

fn default_response_delay_ms() -> u64 {
    1000
}

fn default_max_message_len() -> usize {
    4000
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhotosConfig {
    /// Access key for the photo API. Photo endpoints fail with 503 when unset.
    pub access_key: Option<String>,
    #[serde(default = "default_photos_base_url")]
    pub base_url: String,
    #[serde(default = "default_per_page")]
    pub default_per_page: u32,
}

impl Default for PhotosConfig {
    fn default() -> Self {
        Self {
            access_key: None,
            base_url: default_photos_base_url(),
            default_per_page: default_per_page(),
        }
    }
}

fn default_photos_base_url() -> String {
    "https://api.unsplash.com".to_string()
}

fn default_per_page() -> u32 {
    30
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            info!("Loading configuration from {}", path.display());
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let config: Config = toml::from_str(&content)
                .with_context(|| "Failed to parse configuration file")?;
            Ok(config)
        } else {
            info!("No config file found, using defaults");
            Ok(Config::default())
        }
    }
}
