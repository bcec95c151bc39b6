use crate::{
    error::ApiError,
    info,
    spotify::CatalogClient,
    types::{CreatePlaylistRequest, Playlist, PlaylistSpec},
    utils,
};

/// Spotify accepts at most this many URIs per replace/append request.
pub const MAX_TRACKS_PER_REQUEST: usize = 100;

/// Creates a private playlist and fills it in request-sized chunks.
pub struct PlaylistBuilder<'a, C: CatalogClient + ?Sized> {
    client: &'a C,
    description: String,
}

impl<'a, C: CatalogClient + ?Sized> PlaylistBuilder<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self {
            client,
            description: String::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Creates the playlist described by `spec`.
    ///
    /// The first chunk replaces the (empty) track list, every further chunk
    /// is appended in order. The first failing request aborts the build and
    /// nothing after it is sent; whatever was already created stays on the
    /// account.
    pub async fn build(&self, spec: &PlaylistSpec) -> Result<Playlist, ApiError> {
        let request = CreatePlaylistRequest {
            name: spec.title.clone(),
            description: self.description.clone(),
            public: false,
            collaborative: false,
        };
        let playlist = self.client.create_playlist(&spec.owner, &request).await?;

        let mut chunks = utils::chunk(&spec.track_ids, MAX_TRACKS_PER_REQUEST).into_iter();

        let first = chunks.next().unwrap_or_default();
        info!("Adding {} tracks to {}", first.len(), playlist.name);
        self.client.replace_tracks(&playlist.id, &first).await?;

        for chunk in chunks {
            info!("Adding {} more tracks to {}", chunk.len(), playlist.name);
            self.client.append_tracks(&playlist.id, &chunk).await?;
        }

        Ok(playlist)
    }
}
