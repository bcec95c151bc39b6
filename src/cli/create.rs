use std::sync::Arc;

use tabled::Table;

use crate::{
    config::{self, AuthEndpoints, Options},
    error::Error,
    info,
    pipeline::{self, Plan},
    show,
    spotify::{
        SpotifyClient,
        auth::{self, AuthSession},
        search::RetryPolicy,
    },
    success, warning,
};

pub async fn create(options: Options) -> Result<(), Error> {
    // configuration errors must surface before anything touches the network
    let run = options.validate()?;
    let addr = config::server_addr()?;

    info!("Using Show URL {}", run.show_url);

    let session = Arc::new(AuthSession::new(
        run.credentials.clone(),
        AuthEndpoints::from_env(),
    ));
    let token = auth::authenticate(session, addr, run.login_timeout).await?;
    let client = SpotifyClient::new(&token);

    let markup = show::fetch_show_page(&run.show_url).await?;

    let plan = Plan {
        title: run.playlist_title.clone(),
        description: format!("Tracks from {}", run.show_url),
        clean_only: run.clean_only,
        layout: run.layout.clone(),
        retry: RetryPolicy::default(),
    };
    let report = pipeline::populate(&client, &markup, &plan).await?;

    if report.outcomes.is_empty() {
        warning!("No segments found on {}", run.show_url);
    } else {
        println!("{}", Table::new(report.table_rows()));
    }

    success!(
        "Created playlist: {} ({} of {} tracks matched)",
        report.playlist.name,
        report.matched(),
        report.outcomes.len()
    );
    Ok(())
}
