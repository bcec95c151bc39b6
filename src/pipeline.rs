//! Sequencing of a run once a token is available.
//!
//! Entries are searched strictly one after another so the playlist mirrors the
//! broadcast order without any reordering step.

use crate::{
    error::Error,
    segments::{self, SegmentLayout},
    spotify::{
        CatalogClient,
        playlist::PlaylistBuilder,
        search::{CatalogSearcher, RetryPolicy},
    },
    types::{MatchResult, MatchTableRow, Playlist, PlaylistSpec, ShowEntry},
};

/// What to build from a show page.
#[derive(Debug, Clone)]
pub struct Plan {
    pub title: String,
    pub description: String,
    pub clean_only: bool,
    pub layout: SegmentLayout,
    pub retry: RetryPolicy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    pub entry: ShowEntry,
    pub result: MatchResult,
}

/// Result of a completed run.
#[derive(Debug, Clone)]
pub struct Report {
    pub playlist: Playlist,
    pub spec: PlaylistSpec,
    pub outcomes: Vec<SearchOutcome>,
}

impl Report {
    pub fn matched(&self) -> usize {
        self.spec.track_ids.len()
    }

    pub fn table_rows(&self) -> Vec<MatchTableRow> {
        self.outcomes
            .iter()
            .enumerate()
            .map(|(i, outcome)| MatchTableRow {
                position: i + 1,
                segment: outcome.entry.to_string(),
                result: match &outcome.result {
                    MatchResult::Matched { uri, .. } => uri.clone(),
                    MatchResult::NoMatch => "-".to_string(),
                },
            })
            .collect()
    }
}

/// Searches every entry in order.
pub async fn match_entries<C: CatalogClient + ?Sized>(
    client: &C,
    entries: &[ShowEntry],
    clean_only: bool,
    retry: RetryPolicy,
) -> Vec<SearchOutcome> {
    let searcher = CatalogSearcher::new(client, retry);
    let mut outcomes = Vec::with_capacity(entries.len());
    for entry in entries {
        let result = searcher.search(entry, clean_only).await;
        outcomes.push(SearchOutcome {
            entry: entry.clone(),
            result,
        });
    }
    outcomes
}

/// Collects matched tracks in source order; unmatched entries are left out.
pub fn playlist_spec(owner: &str, title: &str, outcomes: &[SearchOutcome]) -> PlaylistSpec {
    let mut spec = PlaylistSpec::new(owner, title);
    for outcome in outcomes {
        spec.push(&outcome.result);
    }
    spec
}

/// Parses `markup`, searches every segment and creates the playlist for the
/// current user.
///
/// Search failures only cost the affected entry. Failing to look up the user
/// or to create and fill the playlist aborts the run.
pub async fn populate<C: CatalogClient + ?Sized>(
    client: &C,
    markup: &str,
    plan: &Plan,
) -> Result<Report, Error> {
    let user = client.current_user().await?;

    let entries = segments::parse(markup, &plan.layout);
    let outcomes = match_entries(client, &entries, plan.clean_only, plan.retry).await;
    let spec = playlist_spec(&user.id, &plan.title, &outcomes);

    let playlist = PlaylistBuilder::new(client)
        .description(plan.description.clone())
        .build(&spec)
        .await?;

    Ok(Report {
        playlist,
        spec,
        outcomes,
    })
}
