use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// One broadcast track as found in the show markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowEntry {
    pub artist: String,
    pub title: String,
}

impl ShowEntry {
    pub fn new(artist: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            artist: artist.into(),
            title: title.into(),
        }
    }

    /// Entries scraped from malformed markup may carry empty fields.
    pub fn is_searchable(&self) -> bool {
        !self.artist.is_empty() && !self.title.is_empty()
    }
}

impl std::fmt::Display for ShowEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.artist, self.title)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    Matched {
        track_id: String,
        uri: String,
        explicit: bool,
    },
    NoMatch,
}

impl MatchResult {
    pub fn uri(&self) -> Option<&str> {
        match self {
            MatchResult::Matched { uri, .. } => Some(uri),
            MatchResult::NoMatch => None,
        }
    }
}

/// The playlist to create: matched track URIs in broadcast order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistSpec {
    pub owner: String,
    pub title: String,
    pub track_ids: Vec<String>,
}

impl PlaylistSpec {
    pub fn new(owner: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            title: title.into(),
            track_ids: Vec::new(),
        }
    }

    pub fn push(&mut self, result: &MatchResult) {
        if let Some(uri) = result.uri() {
            self.track_ids.push(uri.to_string());
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub scope: String,
    #[serde(default)]
    pub expires_in: u64,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub tracks: Option<TracksPage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TracksPage {
    pub items: Vec<Track>,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub uri: String,
    #[serde(default)]
    pub explicit: bool,
    #[serde(default)]
    pub artists: Vec<TrackArtist>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackArtist {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
    pub collaborative: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub snapshot_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackUrisRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotResponse {
    pub snapshot_id: String,
}

#[derive(Tabled)]
pub struct SegmentTableRow {
    #[tabled(rename = "#")]
    pub position: usize,
    pub artist: String,
    pub title: String,
}

#[derive(Tabled)]
pub struct MatchTableRow {
    #[tabled(rename = "#")]
    pub position: usize,
    pub segment: String,
    pub result: String,
}
