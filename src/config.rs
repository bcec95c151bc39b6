//! Configuration management for showlist.
//!
//! Endpoint and server settings come from environment variables, optionally
//! loaded from a `.env` file in the local data directory. Run options come
//! from the command line and are validated into a [`RunConfig`] before any
//! network activity happens.
//!
//! Lookup order:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults

use std::{env, net::SocketAddr, path::PathBuf, str::FromStr, time::Duration};

use reqwest::Url;

use crate::{
    error::ConfigError,
    segments::SegmentLayout,
    utils::{self, TitleVars},
};

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8080";
pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:8080/callback";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SCOPE: &str = "playlist-modify-private";
pub const DEFAULT_DATE_FORMAT: &str = "%Y%m%d";
pub const DEFAULT_LOGIN_TIMEOUT_SECS: u64 = 300;

/// Loads environment variables from `showlist/.env` in the local data directory.
///
/// A missing file is fine, the process environment and defaults still apply.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/showlist/.env`
/// - macOS: `~/Library/Application Support/showlist/.env`
/// - Windows: `%LOCALAPPDATA%/showlist/.env`
pub async fn load_env() -> Result<(), ConfigError> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("showlist/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| ConfigError::Environment(e.to_string()))?;
    }

    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path)
        .map(|_| ())
        .map_err(|e| ConfigError::Environment(e.to_string()))
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Address the local OAuth callback server binds to (`SERVER_ADDRESS`).
pub fn server_addr() -> Result<SocketAddr, ConfigError> {
    let addr = env_or("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS);
    SocketAddr::from_str(&addr).map_err(|e| ConfigError::InvalidServerAddress {
        addr,
        reason: e.to_string(),
    })
}

/// Redirect URI registered with the Spotify application (`SPOTIFY_API_REDIRECT_URI`).
pub fn spotify_redirect_uri() -> String {
    env_or("SPOTIFY_API_REDIRECT_URI", DEFAULT_REDIRECT_URI)
}

/// Requested OAuth scope (`SPOTIFY_API_AUTH_SCOPE`).
pub fn spotify_scope() -> String {
    env_or("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SCOPE)
}

/// Authorization endpoint (`SPOTIFY_API_AUTH_URL`).
pub fn spotify_apiauth_url() -> String {
    env_or("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL)
}

/// Web API base URL (`SPOTIFY_API_URL`).
pub fn spotify_apiurl() -> String {
    env_or("SPOTIFY_API_URL", DEFAULT_API_URL)
}

/// Token exchange endpoint (`SPOTIFY_API_TOKEN_URL`).
pub fn spotify_apitoken_url() -> String {
    env_or("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL)
}

/// OAuth endpoints used by one auth session.
#[derive(Debug, Clone)]
pub struct AuthEndpoints {
    pub auth_url: String,
    pub token_url: String,
    pub redirect_uri: String,
    pub scope: String,
}

impl AuthEndpoints {
    pub fn from_env() -> Self {
        Self {
            auth_url: spotify_apiauth_url(),
            token_url: spotify_apitoken_url(),
            redirect_uri: spotify_redirect_uri(),
            scope: spotify_scope(),
        }
    }
}

/// Application id and secret from the Spotify developer dashboard.
#[derive(Clone)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl std::fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Raw run options as supplied on the command line.
#[derive(Debug, Clone)]
pub struct Options {
    pub show_url: String,
    pub playlist_name_template: String,
    pub clean_only: bool,
    pub date_format: String,
    pub client_id: String,
    pub client_secret: String,
    pub segment_selector: String,
    pub field_selector: String,
    pub field_attribute: Option<String>,
    pub login_timeout: Duration,
}

/// Options after validation: everything the pipeline needs, nothing missing.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub show_url: Url,
    pub playlist_title: String,
    pub clean_only: bool,
    pub credentials: ClientCredentials,
    pub layout: SegmentLayout,
    pub login_timeout: Duration,
}

impl Options {
    /// Checks every option and renders the playlist title for today.
    pub fn validate(self) -> Result<RunConfig, ConfigError> {
        let vars = TitleVars::today(&self.date_format, self.clean_only)?;
        self.validate_with(vars)
    }

    /// Same as [`Options::validate`] with explicit template values.
    pub fn validate_with(self, vars: TitleVars) -> Result<RunConfig, ConfigError> {
        if self.client_id.trim().is_empty() {
            return Err(ConfigError::MissingClientId);
        }
        if self.client_secret.trim().is_empty() {
            return Err(ConfigError::MissingClientSecret);
        }

        let show_url = parse_show_url(&self.show_url)?;

        if self.playlist_name_template.trim().is_empty() {
            return Err(ConfigError::MissingTitleTemplate);
        }
        let playlist_title = utils::render_title(&self.playlist_name_template, &vars)?;

        let layout = SegmentLayout::new(
            &self.segment_selector,
            &self.field_selector,
            self.field_attribute,
        )?;

        Ok(RunConfig {
            show_url,
            playlist_title,
            clean_only: self.clean_only,
            credentials: ClientCredentials {
                client_id: self.client_id,
                client_secret: self.client_secret,
            },
            layout,
            login_timeout: self.login_timeout,
        })
    }
}

/// Parses a show URL, accepting only http(s).
pub fn parse_show_url(raw: &str) -> Result<Url, ConfigError> {
    if raw.trim().is_empty() {
        return Err(ConfigError::MissingShowUrl);
    }
    let url = Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidShowUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidShowUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}'", other),
        }),
    }
}
