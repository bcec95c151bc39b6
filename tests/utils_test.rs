use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};
use showlist::config::Options;
use showlist::error::ConfigError;
use showlist::utils::*;

fn at(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(21, 30, 0)
        .unwrap()
}

fn vars(clean_only: bool) -> TitleVars {
    TitleVars::at(
        at(2026, 10, 16),
        "%Y%m%d",
        clean_only,
    )
    .unwrap()
}

fn options() -> Options {
    Options {
        show_url: "https://www.bbc.co.uk/programmes/m000abcd".to_string(),
        playlist_name_template: "Late Junction {{ .Now }}".to_string(),
        clean_only: false,
        date_format: "%Y%m%d".to_string(),
        client_id: "client-id".to_string(),
        client_secret: "client-secret".to_string(),
        segment_selector: "div.segment__track".to_string(),
        field_selector: "span".to_string(),
        field_attribute: None,
        login_timeout: Duration::from_secs(300),
    }
}

#[test]
fn test_generate_state() {
    let state = generate_state();

    assert_eq!(state.len(), STATE_LENGTH);
    assert!(state.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated values should be different
    assert_ne!(state, generate_state());
}

#[test]
fn test_chunk_preserves_order() {
    let items: Vec<u32> = (0..250).collect();
    let chunks = chunk(&items, 100);

    assert_eq!(chunks.len(), 3);
    assert_eq!(chunks[0].len(), 100);
    assert_eq!(chunks[1].len(), 100);
    assert_eq!(chunks[2].len(), 50);
    assert_eq!(chunks.concat(), items);
}

#[test]
fn test_chunk_edge_sizes() {
    let empty: Vec<u32> = Vec::new();
    assert!(chunk(&empty, 100).is_empty());

    let exact: Vec<u32> = (0..100).collect();
    assert_eq!(chunk(&exact, 100).len(), 1);

    let one_over: Vec<u32> = (0..101).collect();
    let chunks = chunk(&one_over, 100);
    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[1], vec![100]);
}

#[test]
#[should_panic]
fn test_chunk_rejects_zero_size() {
    chunk(&[1, 2, 3], 0);
}

#[test]
fn test_render_title_variables() {
    assert_eq!(
        render_title("Late Junction {{ .Now }}", &vars(false)).unwrap(),
        "Late Junction 20261016"
    );
    assert_eq!(
        render_title("{{.Now}} clean={{ .CleanOnly }}", &vars(true)).unwrap(),
        "20261016 clean=true"
    );
    assert_eq!(
        render_title("Plain title", &vars(false)).unwrap(),
        "Plain title"
    );
}

#[test]
fn test_render_title_errors() {
    assert!(matches!(
        render_title("Show {{ .Later }}", &vars(false)),
        Err(ConfigError::InvalidTitleTemplate(_))
    ));
    assert!(matches!(
        render_title("Show {{ .Now", &vars(false)),
        Err(ConfigError::InvalidTitleTemplate(_))
    ));
}

#[test]
fn test_title_date_format() {
    let vars = TitleVars::at(at(2026, 1, 2), "%d/%m/%Y", false).unwrap();
    assert_eq!(vars.now, "02/01/2026");

    assert!(matches!(
        TitleVars::at(at(2026, 1, 2), "%Q", false),
        Err(ConfigError::InvalidDateFormat(_))
    ));
}

#[test]
fn test_title_date_format_with_time_fields() {
    let vars = TitleVars::at(at(2026, 10, 16), "%Y%m%d %H:%M", false).unwrap();
    assert_eq!(vars.now, "20261016 21:30");
}

#[test]
fn test_title_date_format_needing_time_zone_is_rejected() {
    assert!(matches!(
        TitleVars::at(at(2026, 10, 16), "%Y%m%d %z", false),
        Err(ConfigError::InvalidDateFormat(_))
    ));
    assert!(matches!(
        TitleVars::today("%Z", false),
        Err(ConfigError::InvalidDateFormat(_))
    ));
}

#[test]
fn test_validate_renders_title() {
    let run = options().validate_with(vars(false)).unwrap();

    assert_eq!(run.playlist_title, "Late Junction 20261016");
    assert_eq!(run.show_url.host_str(), Some("www.bbc.co.uk"));
    assert_eq!(run.credentials.client_id, "client-id");
}

#[test]
fn test_validate_reports_missing_values_in_order() {
    let mut opts = options();
    opts.client_id = String::new();
    opts.show_url = String::new();
    assert!(matches!(
        opts.validate_with(vars(false)),
        Err(ConfigError::MissingClientId)
    ));

    let mut opts = options();
    opts.client_secret = "  ".to_string();
    assert!(matches!(
        opts.validate_with(vars(false)),
        Err(ConfigError::MissingClientSecret)
    ));

    let mut opts = options();
    opts.show_url = String::new();
    assert!(matches!(
        opts.validate_with(vars(false)),
        Err(ConfigError::MissingShowUrl)
    ));

    let mut opts = options();
    opts.playlist_name_template = String::new();
    assert!(matches!(
        opts.validate_with(vars(false)),
        Err(ConfigError::MissingTitleTemplate)
    ));
}

#[test]
fn test_validate_rejects_bad_url_and_selector() {
    let mut opts = options();
    opts.show_url = "ftp://example.com/show".to_string();
    assert!(matches!(
        opts.validate_with(vars(false)),
        Err(ConfigError::InvalidShowUrl { .. })
    ));

    let mut opts = options();
    opts.segment_selector = "div[".to_string();
    assert!(matches!(
        opts.validate_with(vars(false)),
        Err(ConfigError::InvalidSelector { .. })
    ));
}

#[test]
fn test_credentials_debug_hides_secret() {
    let run = options().validate_with(vars(false)).unwrap();
    let debug = format!("{:?}", run.credentials);
    assert!(!debug.contains("client-secret"));
}
