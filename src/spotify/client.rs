use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use tokio::time::sleep;

use crate::{
    config,
    error::ApiError,
    spotify::CatalogClient,
    types::{
        CreatePlaylistRequest, CurrentUser, Playlist, SearchResponse, SnapshotResponse, Token,
        Track, TrackUrisRequest,
    },
    warning,
};

/// Longest `Retry-After` we are willing to sleep through.
const MAX_RETRY_AFTER_SECS: u64 = 120;
const MAX_RATE_LIMIT_WAITS: u32 = 3;
const SEARCH_LIMIT: u32 = 1;

/// Spotify Web API client bound to one access token.
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    access_token: String,
}

impl SpotifyClient {
    /// Client for the API base URL from the environment.
    pub fn new(token: &Token) -> Self {
        Self::with_base_url(config::spotify_apiurl(), token.access_token.clone())
    }

    /// Client for an explicit API base URL, e.g. a local mock server.
    ///
    /// A trailing slash on `api_url` is ignored.
    pub fn with_base_url(api_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        let api_url: String = api_url.into();
        Self {
            http: Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            access_token: access_token.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{uri}{path}", uri = self.api_url, path = path)
    }

    /// Sends a request, sleeping through short rate limits.
    ///
    /// A 429 with a `Retry-After` of at most two minutes is waited out and
    /// the request sent again, up to three times. Any other non-success
    /// status is returned as [`ApiError::Status`].
    async fn execute<F>(&self, request: F) -> Result<Response, ApiError>
    where
        F: Fn(&Client) -> RequestBuilder,
    {
        let mut waits = 0;

        loop {
            let response = request(&self.http)
                .bearer_auth(&self.access_token)
                .send()
                .await?;

            let status = response.status();
            if status == StatusCode::TOO_MANY_REQUESTS {
                let retry_after = retry_after_secs(&response);
                if retry_after > MAX_RETRY_AFTER_SECS || waits >= MAX_RATE_LIMIT_WAITS {
                    return Err(ApiError::RateLimited(retry_after));
                }
                warning!(
                    "Rate limited by Spotify, retrying in {} seconds",
                    retry_after
                );
                waits += 1;
                sleep(Duration::from_secs(retry_after)).await;
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(ApiError::Status { status, body });
            }

            return Ok(response);
        }
    }
}

fn retry_after_secs(response: &Response) -> u64 {
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(1)
}

#[async_trait]
impl CatalogClient for SpotifyClient {
    async fn search_tracks(&self, query: &str) -> Result<Vec<Track>, ApiError> {
        let url = self.url("/search");
        let limit = SEARCH_LIMIT.to_string();
        let response = self
            .execute(|http| {
                http.get(&url)
                    .query(&[("q", query), ("type", "track"), ("limit", limit.as_str())])
            })
            .await?;

        let json = response.json::<SearchResponse>().await?;
        Ok(json.tracks.map(|t| t.items).unwrap_or_default())
    }

    async fn current_user(&self) -> Result<CurrentUser, ApiError> {
        let url = self.url("/me");
        let response = self.execute(|http| http.get(&url)).await?;
        Ok(response.json::<CurrentUser>().await?)
    }

    async fn create_playlist(
        &self,
        owner: &str,
        request: &CreatePlaylistRequest,
    ) -> Result<Playlist, ApiError> {
        let url = self.url(&format!("/users/{owner}/playlists", owner = owner));
        let response = self.execute(|http| http.post(&url).json(request)).await?;
        Ok(response.json::<Playlist>().await?)
    }

    async fn replace_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<(), ApiError> {
        let url = self.url(&format!("/playlists/{id}/tracks", id = playlist_id));
        let body = TrackUrisRequest {
            uris: uris.to_vec(),
        };
        let response = self.execute(|http| http.put(&url).json(&body)).await?;
        response.json::<SnapshotResponse>().await?;
        Ok(())
    }

    async fn append_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<(), ApiError> {
        let url = self.url(&format!("/playlists/{id}/tracks", id = playlist_id));
        let body = TrackUrisRequest {
            uris: uris.to_vec(),
        };
        let response = self.execute(|http| http.post(&url).json(&body)).await?;
        response.json::<SnapshotResponse>().await?;
        Ok(())
    }
}
