#![allow(dead_code)]

use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;
use reqwest::StatusCode;
use showlist::{
    error::ApiError,
    spotify::CatalogClient,
    types::{CreatePlaylistRequest, CurrentUser, Playlist, Track, TrackArtist},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Search(String),
    CurrentUser,
    Create {
        owner: String,
        name: String,
        public: bool,
    },
    Replace {
        playlist_id: String,
        uris: Vec<String>,
    },
    Append {
        playlist_id: String,
        uris: Vec<String>,
    },
}

/// In-memory catalog that records every request it receives.
#[derive(Default)]
pub struct StubCatalog {
    calls: Mutex<Vec<Call>>,
    results: HashMap<String, Vec<Track>>,
    search_failures: Mutex<u32>,
    fail_create: bool,
    fail_replace: bool,
    fail_append_at: Option<usize>,
}

impl StubCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers `query` with `tracks`, best match first.
    pub fn with_results(mut self, query: &str, tracks: Vec<Track>) -> Self {
        self.results.insert(query.to_string(), tracks);
        self
    }

    /// The next `n` searches fail with a server error.
    pub fn failing_searches(self, n: u32) -> Self {
        *self.search_failures.lock().unwrap() = n;
        self
    }

    pub fn failing_create(mut self) -> Self {
        self.fail_create = true;
        self
    }

    pub fn failing_replace(mut self) -> Self {
        self.fail_replace = true;
        self
    }

    /// The append call with this zero-based index fails.
    pub fn failing_append_at(mut self, index: usize) -> Self {
        self.fail_append_at = Some(index);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn search_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Search(_)))
            .count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn appends_so_far(&self) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| matches!(c, Call::Append { .. }))
            .count()
    }
}

fn server_error() -> ApiError {
    ApiError::Status {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        body: "stub failure".to_string(),
    }
}

#[async_trait]
impl CatalogClient for StubCatalog {
    async fn search_tracks(&self, query: &str) -> Result<Vec<Track>, ApiError> {
        self.record(Call::Search(query.to_string()));
        {
            let mut failures = self.search_failures.lock().unwrap();
            if *failures > 0 {
                *failures -= 1;
                return Err(server_error());
            }
        }
        Ok(self.results.get(query).cloned().unwrap_or_default())
    }

    async fn current_user(&self) -> Result<CurrentUser, ApiError> {
        self.record(Call::CurrentUser);
        Ok(CurrentUser {
            id: "listener".to_string(),
            display_name: Some("Radio Listener".to_string()),
        })
    }

    async fn create_playlist(
        &self,
        owner: &str,
        request: &CreatePlaylistRequest,
    ) -> Result<Playlist, ApiError> {
        self.record(Call::Create {
            owner: owner.to_string(),
            name: request.name.clone(),
            public: request.public,
        });
        if self.fail_create {
            return Err(server_error());
        }
        Ok(Playlist {
            id: "pl-1".to_string(),
            name: request.name.clone(),
            snapshot_id: None,
        })
    }

    async fn replace_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<(), ApiError> {
        self.record(Call::Replace {
            playlist_id: playlist_id.to_string(),
            uris: uris.to_vec(),
        });
        if self.fail_replace {
            return Err(server_error());
        }
        Ok(())
    }

    async fn append_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<(), ApiError> {
        let index = self.appends_so_far();
        self.record(Call::Append {
            playlist_id: playlist_id.to_string(),
            uris: uris.to_vec(),
        });
        if self.fail_append_at == Some(index) {
            return Err(server_error());
        }
        Ok(())
    }
}

pub fn track(id: &str, artist: &str, name: &str, explicit: bool) -> Track {
    Track {
        id: id.to_string(),
        name: name.to_string(),
        uri: format!("spotify:track:{}", id),
        explicit,
        artists: vec![TrackArtist {
            name: artist.to_string(),
        }],
    }
}
