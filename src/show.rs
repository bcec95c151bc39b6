use reqwest::{Client, Url};

use crate::error::Error;

/// The show site serves a reduced page to unknown clients.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/60.0.3112.113 Safari/537.36";

/// Downloads the markup of a show page.
pub async fn fetch_show_page(url: &Url) -> Result<String, Error> {
    let client = Client::builder().user_agent(USER_AGENT).build()?;
    let markup = client
        .get(url.clone())
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    Ok(markup)
}
