use std::time::Duration;

use clap::{
    Args, CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use showlist::{
    cli,
    config::{self, Options},
    error,
    segments::{DEFAULT_FIELD_SELECTOR, DEFAULT_SEGMENT_SELECTOR, SegmentLayout},
    warning,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create a Spotify playlist from a show's track listing
    Create(CreateOptions),

    /// List the segments found on a show page without logging in
    Segments(SegmentsOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

/// Where segments live in the show markup.
#[derive(Args, Debug, Clone)]
pub struct LayoutArgs {
    /// CSS selector of one segment container
    #[clap(long, env = "SEGMENT_SELECTOR", default_value = DEFAULT_SEGMENT_SELECTOR)]
    pub segment_selector: String,

    /// CSS selector of the artist and title fields inside a segment
    #[clap(long, env = "FIELD_SELECTOR", default_value = DEFAULT_FIELD_SELECTOR)]
    pub field_selector: String,

    /// Read field values from this attribute instead of the element text
    #[clap(long, env = "FIELD_ATTRIBUTE")]
    pub field_attribute: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct CreateOptions {
    /// URL of the show page
    #[clap(long, default_value = "")]
    show_url: String,

    /// Playlist name; supports {{ .Now }} and {{ .CleanOnly }}
    #[clap(long, default_value = "")]
    playlist_name: String,

    /// Suppress explicit tracks
    #[clap(long)]
    clean: bool,

    /// Date format used for {{ .Now }} (strftime)
    #[clap(long, default_value = config::DEFAULT_DATE_FORMAT)]
    date_format: String,

    /// Spotify application id
    #[clap(long, env = "SPOTIFY_ID", hide = true, default_value = "")]
    spotify_id: String,

    /// Spotify application secret
    #[clap(
        long,
        env = "SPOTIFY_SECRET",
        hide = true,
        hide_env_values = true,
        default_value = ""
    )]
    spotify_secret: String,

    /// Seconds to wait for the browser login
    #[clap(long, default_value_t = config::DEFAULT_LOGIN_TIMEOUT_SECS)]
    login_timeout: u64,

    #[command(flatten)]
    layout: LayoutArgs,
}

impl From<CreateOptions> for Options {
    fn from(opt: CreateOptions) -> Self {
        Options {
            show_url: opt.show_url,
            playlist_name_template: opt.playlist_name,
            clean_only: opt.clean,
            date_format: opt.date_format,
            client_id: opt.spotify_id,
            client_secret: opt.spotify_secret,
            segment_selector: opt.layout.segment_selector,
            field_selector: opt.layout.field_selector,
            field_attribute: opt.layout.field_attribute,
            login_timeout: Duration::from_secs(opt.login_timeout),
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct SegmentsOptions {
    /// URL of the show page
    #[clap(long)]
    show_url: String,

    #[command(flatten)]
    layout: LayoutArgs,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Create(opt) => cli::create(opt.into()).await,
        Command::Segments(opt) => {
            let layout = match SegmentLayout::new(
                &opt.layout.segment_selector,
                &opt.layout.field_selector,
                opt.layout.field_attribute,
            ) {
                Ok(layout) => layout,
                Err(e) => error!("{}", e),
            };
            cli::segments(&opt.show_url, &layout).await
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        error!("{}", e);
    }
}
