//! Command-line interface.
//!
//! With no subcommand the binary runs the HTTP server; with a subcommand
//! it acts as an API client against a running server:
//! - `register` / `login` - establish a session
//! - `logout` - clear the session
//! - `profile` - show the identity the server resolves for the session
//! - `status` - check server health
//!
//! The client mirrors server cookie state into a local [`AuthState`]: it
//! never sees the HttpOnly token value, so the mirror is rebuilt by asking
//! `/api/me` and is authoritative for display only.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use reqwest::{Client, StatusCode};
use std::path::PathBuf;

use crate::api::auth::{AuthResponse, ProfileResponse};
use crate::api::error::ErrorBody;
use crate::api::validation;

/// CLI arguments structure
#[derive(Parser, Debug)]
#[command(name = "mirage")]
#[command(author, version, about = "A demonstration web application backend", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "mirage.toml")]
    pub config: PathBuf,

    /// Override log level
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// API URL to connect to for client subcommands
    #[arg(long, env = "MIRAGE_API_URL", default_value = "http://localhost:3000")]
    pub api_url: String,

    /// Subcommand to run (if none, starts the server)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Register a new account and establish a session
    Register {
        email: String,
        password: String,
    },
    /// Log in and establish a session
    Login {
        email: String,
        password: String,
    },
    /// Log out, clearing the session cookies
    Logout,
    /// Show the profile the server resolves for the current session
    Profile,
    /// Check server health
    Status,
}

/// The session identity as mirrored on the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub email: String,
    pub token: String,
}

/// Placeholder recorded when the real token is HttpOnly and invisible to us.
pub const HTTP_ONLY_TOKEN: &str = "http-only-token";

/// Client-side mirror of server session state.
///
/// Each operation keeps its own error slot; a failing login never disturbs
/// the register or profile slots, so callers can render operation-scoped
/// errors.
#[derive(Debug, Default)]
pub struct AuthState {
    pub user: Option<User>,
    /// Whether the initial `/api/me` check has completed.
    pub checked: bool,
    pub login_error: Option<String>,
    pub register_error: Option<String>,
    pub profile_error: Option<String>,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_loading(&self) -> bool {
        !self.checked
    }
}

/// HTTP client for the mirage API, carrying the session cookie jar and
/// the mirrored [`AuthState`].
pub struct ApiClient {
    http: Client,
    base_url: String,
    pub auth: AuthState,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .cookie_store(true)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth: AuthState::default(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// One-time session check on startup: ask the server who we are and
    /// mirror the answer. A 401 just means "not authenticated".
    pub async fn ensure_session(&mut self) -> Result<()> {
        let response = self
            .http
            .get(self.url("/api/me"))
            .send()
            .await
            .context("Failed to reach server")?;

        if response.status().is_success() {
            let profile: ProfileResponse = response
                .json()
                .await
                .context("Invalid response from server")?;
            self.auth.user = Some(User {
                email: profile.email,
                token: HTTP_ONLY_TOKEN.to_string(),
            });
        } else {
            self.auth.user = None;
        }
        self.auth.checked = true;
        Ok(())
    }

    pub async fn register(&mut self, email: &str, password: &str) -> Result<AuthResponse> {
        if !validation::is_plausible_email(email) {
            let message = format!("'{email}' does not look like an email address");
            self.auth.register_error = Some(message.clone());
            bail!(message);
        }

        let result = self.authenticate("/api/register", email, password).await;
        match result {
            Ok(response) => {
                self.auth.register_error = None;
                self.mirror_login(&response);
                Ok(response)
            }
            Err(e) => {
                self.auth.register_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<AuthResponse> {
        let result = self.authenticate("/api/login", email, password).await;
        match result {
            Ok(response) => {
                self.auth.login_error = None;
                self.mirror_login(&response);
                Ok(response)
            }
            Err(e) => {
                self.auth.login_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub async fn logout(&mut self) -> Result<String> {
        let response = self
            .http
            .post(self.url("/api/logout"))
            .send()
            .await
            .context("Failed to reach server")?;
        let message = error_checked::<serde_json::Value>(response)
            .await?
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("Logged out")
            .to_string();
        self.auth.user = None;
        Ok(message)
    }

    pub async fn profile(&mut self) -> Result<ProfileResponse> {
        let mut request = self.http.get(self.url("/api/me"));
        // Prefer the bearer header when we hold a real token; the cookie
        // jar covers the HttpOnly case.
        if let Some(user) = &self.auth.user {
            if user.token != HTTP_ONLY_TOKEN {
                request = request.bearer_auth(&user.token);
            }
        }

        let response = request.send().await.context("Failed to reach server")?;
        match error_checked::<ProfileResponse>(response).await {
            Ok(profile) => {
                self.auth.profile_error = None;
                Ok(profile)
            }
            Err(e) => {
                self.auth.profile_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub async fn status(&self) -> Result<String> {
        let response = self
            .http
            .get(self.url("/health"))
            .send()
            .await
            .context("Failed to reach server")?;
        if !response.status().is_success() {
            bail!("Server unhealthy: {}", response.status());
        }
        Ok(response.text().await.unwrap_or_else(|_| "OK".to_string()))
    }

    async fn authenticate(
        &mut self,
        path: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse> {
        let response = self
            .http
            .post(self.url(path))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .context("Failed to reach server")?;
        error_checked(response).await
    }

    fn mirror_login(&mut self, response: &AuthResponse) {
        self.auth.user = Some(User {
            email: response.email.clone(),
            token: response.token.clone(),
        });
        self.auth.checked = true;
    }
}

/// Decode a success body, or surface the server's `message` on failure.
async fn error_checked<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        return response.json().await.context("Invalid response from server");
    }

    let message = response
        .json::<ErrorBody>()
        .await
        .map(|b| b.message)
        .unwrap_or_else(|_| default_status_message(status));
    bail!(message)
}

fn default_status_message(status: StatusCode) -> String {
    format!(
        "Request failed: {}",
        status.canonical_reason().unwrap_or("unknown error")
    )
}

// ============================================================================
// Subcommand runners
// ============================================================================

pub async fn run_command(api_url: &str, command: Commands) -> Result<()> {
    let mut client = ApiClient::new(api_url)?;

    match command {
        Commands::Register { email, password } => {
            let response = client.register(&email, &password).await?;
            println!("{}", response.message);
            println!("email: {}", response.email);
            println!("token: {}", response.token);
        }
        Commands::Login { email, password } => {
            let response = client.login(&email, &password).await?;
            println!("{}", response.message);
            println!("token: {}", response.token);
        }
        Commands::Logout => {
            let message = client.logout().await?;
            println!("{message}");
        }
        Commands::Profile => {
            client.ensure_session().await?;
            if !client.auth.is_authenticated() {
                bail!("Not authenticated; run `mirage login <email> <password>` first");
            }
            let profile = client.profile().await?;
            println!("email:         {}", profile.email);
            println!("registered at: {}", profile.registered_at);
            println!("subscriptions: {}", profile.subscriptions.join(", "));
        }
        Commands::Status => {
            let body = client.status().await?;
            println!("Server is up: {body}");
        }
    }

    Ok(())
}
