//! Error taxonomy.
//!
//! Configuration and auth errors are fatal before or during login, API errors
//! are fatal for playlist mutations and degrade to "no match" inside the
//! searcher. Only the binary decides how a fatal error ends the process.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("SPOTIFY_ID not set")]
    MissingClientId,
    #[error("SPOTIFY_SECRET not set")]
    MissingClientSecret,
    #[error("Invalid URL: show URL is empty")]
    MissingShowUrl,
    #[error("Invalid URL '{url}': {reason}")]
    InvalidShowUrl { url: String, reason: String },
    #[error("Invalid playlist template: template is empty")]
    MissingTitleTemplate,
    #[error("Invalid playlist template: {0}")]
    InvalidTitleTemplate(String),
    #[error("Invalid date format '{0}'")]
    InvalidDateFormat(String),
    #[error("Invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },
    #[error("Failed to parse server address '{addr}': {reason}")]
    InvalidServerAddress { addr: String, reason: String },
    #[error("Failed to load environment: {0}")]
    Environment(String),
}

#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("State mismatch: {received} != {expected}")]
    StateMismatch { expected: String, received: String },
    #[error("Callback is missing the authorization code")]
    MissingCode,
    #[error("Authorization was denied: {0}")]
    Denied(String),
    #[error("Invalid authorization endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },
    #[error("Couldn't get token: {0}")]
    TokenExchange(String),
    #[error("Login was not completed within {0} seconds")]
    TimedOut(u64),
    #[error("Auth session was already started")]
    AlreadyStarted,
    #[error("Auth session has not been started")]
    NotStarted,
    #[error("Auth session has already completed")]
    AlreadyCompleted,
    #[error("Callback listener stopped before a token was handed off")]
    HandoffDropped,
    #[error("Failed to bind callback listener on {addr}: {reason}")]
    Listener { addr: String, reason: String },
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Spotify API returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("Rate limited by Spotify, retry after {0} seconds")]
    RateLimited(u64),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("Failed to fetch show page: {0}")]
    Fetch(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
