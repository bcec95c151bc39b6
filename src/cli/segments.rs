use tabled::Table;

use crate::{
    config,
    error::Error,
    segments::{self, SegmentLayout},
    show, success,
    types::SegmentTableRow,
    warning,
};

/// Fetches a show page and lists its segments without logging in.
pub async fn segments(show_url: &str, layout: &SegmentLayout) -> Result<(), Error> {
    let url = config::parse_show_url(show_url)?;
    let markup = show::fetch_show_page(&url).await?;
    let entries = segments::parse(&markup, layout);

    if entries.is_empty() {
        warning!("No segments found on {}", url);
        return Ok(());
    }

    let rows: Vec<SegmentTableRow> = entries
        .into_iter()
        .enumerate()
        .map(|(i, e)| SegmentTableRow {
            position: i + 1,
            artist: e.artist,
            title: e.title,
        })
        .collect();
    let count = rows.len();

    println!("{}", Table::new(rows));
    success!("Found {} segments", count);
    Ok(())
}
