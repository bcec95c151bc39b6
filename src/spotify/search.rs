use std::time::Duration;

use tokio::time::sleep;

use crate::{
    info,
    spotify::CatalogClient,
    types::{MatchResult, ShowEntry, Track},
    warning,
};

pub const MAX_SEARCH_ATTEMPTS: u32 = 5;
pub const SEARCH_RETRY_DELAY: Duration = Duration::from_secs(5);

/// How often and how patiently a failing search is repeated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts per entry, including the first. Zero is treated as one.
    pub max_attempts: u32,
    /// Pause between a failed attempt and the next one.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_SEARCH_ATTEMPTS,
            delay: SEARCH_RETRY_DELAY,
        }
    }
}

/// Builds the catalog query for an entry.
///
/// The artist goes into the `artist:` field filter and the title stays free
/// text, which ranks the right recording higher than a plain
/// "artist title" query.
pub fn build_query(entry: &ShowEntry) -> String {
    format!(
        "{title} artist:{artist}",
        title = entry.title,
        artist = entry.artist
    )
}

/// Finds the catalog track for one show entry.
pub struct CatalogSearcher<'a, C: CatalogClient + ?Sized> {
    client: &'a C,
    policy: RetryPolicy,
}

impl<'a, C: CatalogClient + ?Sized> CatalogSearcher<'a, C> {
    pub fn new(client: &'a C, policy: RetryPolicy) -> Self {
        Self { client, policy }
    }

    /// Searches for `entry` and returns the top result.
    ///
    /// Failed requests are retried according to the policy. Once attempts run
    /// out the entry is reported as [`MatchResult::NoMatch`], so one bad
    /// search never stops the playlist from being created. With `clean_only`
    /// an explicit top result is rejected rather than replaced by a lower
    /// ranked one.
    pub async fn search(&self, entry: &ShowEntry, clean_only: bool) -> MatchResult {
        if !entry.is_searchable() {
            warning!("Skipping incomplete segment '{}'", entry);
            return MatchResult::NoMatch;
        }

        let query = build_query(entry);
        let attempts = self.policy.max_attempts.max(1);

        for attempt in 1..=attempts {
            info!("Searching for {} ({}/{})", entry, attempt, attempts);

            match self.client.search_tracks(&query).await {
                Ok(tracks) => return select(entry, tracks.first(), clean_only),
                Err(e) => {
                    warning!("Spotify search error: {}. Retrying...", e);
                    if attempt < attempts {
                        sleep(self.policy.delay).await;
                    }
                }
            }
        }

        warning!("Giving up on {} after {} attempts", entry, attempts);
        MatchResult::NoMatch
    }
}

fn select(entry: &ShowEntry, top: Option<&Track>, clean_only: bool) -> MatchResult {
    let Some(track) = top else {
        warning!("Could not find {}", entry);
        return MatchResult::NoMatch;
    };

    if clean_only && track.explicit {
        warning!("Explicit song rejected {}", entry);
        return MatchResult::NoMatch;
    }

    MatchResult::Matched {
        track_id: track.id.clone(),
        uri: track.uri.clone(),
        explicit: track.explicit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_binds_artist_to_field_filter() {
        let entry = ShowEntry::new("Fleetwood Mac", "Dreams");
        assert_eq!(build_query(&entry), "Dreams artist:Fleetwood Mac");
    }

    #[test]
    fn default_policy_is_five_attempts_five_seconds_apart() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 5);
        assert_eq!(policy.delay, Duration::from_secs(5));
    }
}
