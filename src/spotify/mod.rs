//! # Spotify Integration Module
//!
//! Everything that talks to Spotify lives here:
//!
//! - [`auth`] - the OAuth authorization-code session and its login flow
//! - [`client`] - the reqwest implementation of [`CatalogClient`]
//! - [`search`] - turning a show entry into a matched track, with retry
//! - [`playlist`] - creating and filling the playlist in 100-track chunks
//!
//! ```text
//! Pipeline (search, then build)
//!          ↓
//! CatalogSearcher / PlaylistBuilder
//!          ↓
//! CatalogClient (trait)  ←  SpotifyClient (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! The searcher and builder only see the [`CatalogClient`] trait, which keeps
//! them independent of HTTP and lets tests drive them with a stub catalog.

use async_trait::async_trait;

use crate::{
    error::ApiError,
    types::{CreatePlaylistRequest, CurrentUser, Playlist, Track},
};

pub mod auth;
pub mod client;
pub mod playlist;
pub mod search;

pub use client::SpotifyClient;

/// The Web API operations the pipeline needs.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Track search, best match first.
    async fn search_tracks(&self, query: &str) -> Result<Vec<Track>, ApiError>;

    async fn current_user(&self) -> Result<CurrentUser, ApiError>;

    async fn create_playlist(
        &self,
        owner: &str,
        request: &CreatePlaylistRequest,
    ) -> Result<Playlist, ApiError>;

    /// Sets the playlist content to `uris`, at most 100 per call.
    async fn replace_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<(), ApiError>;

    /// Appends `uris` to the playlist, at most 100 per call.
    async fn append_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<(), ApiError>;
}
