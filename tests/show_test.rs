use reqwest::{StatusCode, Url};
use showlist::{
    error::Error,
    segments::{SegmentLayout, parse},
    show::{USER_AGENT, fetch_show_page},
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

// the agent string contains commas, so compare the raw header value
fn sent_with_browser_agent(request: &Request) -> bool {
    request
        .headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        == Some(USER_AGENT)
}

fn show_url(server: &MockServer, show: &str) -> Url {
    Url::parse(&format!("{}/programmes/{}", server.uri(), show)).unwrap()
}

#[tokio::test]
async fn test_show_page_is_fetched_with_browser_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/programmes/m000abcd"))
        .and(sent_with_browser_agent)
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<div class=\"segment__track\"><span>Nils Frahm</span><span>Says</span></div>",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let markup = fetch_show_page(&show_url(&server, "m000abcd"))
        .await
        .unwrap();

    let entries = parse(&markup, &SegmentLayout::default());
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].artist, "Nils Frahm");
}

#[tokio::test]
async fn test_missing_show_page_is_a_fetch_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/programmes/gone"))
        .respond_with(ResponseTemplate::new(404).set_body_string("<h1>Not Found</h1>"))
        .expect(1)
        .mount(&server)
        .await;

    let result = fetch_show_page(&show_url(&server, "gone")).await;

    match result {
        Err(Error::Fetch(e)) => assert_eq!(e.status(), Some(StatusCode::NOT_FOUND)),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(markup) => panic!("error page returned as markup: {markup}"),
    }
}
