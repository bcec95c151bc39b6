//! Radio Show to Spotify Playlist Library
//!
//! This library turns the track listing of a broadcast radio show into a
//! private Spotify playlist. It scrapes the show page, searches the Spotify
//! catalog for every segment, and creates a playlist with the matches.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the local OAuth callback server
//! - `cli` - Command-line interface implementations
//! - `config` - Environment loading and validated run options
//! - `error` - Error taxonomy shared by every component
//! - `pipeline` - Sequencing of search and playlist creation
//! - `segments` - Extraction of artist/title pairs from show markup
//! - `server` - Local HTTP server for OAuth callbacks
//! - `show` - Fetching of the show page
//! - `spotify` - Spotify Web API client, auth session, searcher and builder
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use showlist::segments::{SegmentLayout, parse};
//!
//! let layout = SegmentLayout::default();
//! let entries = parse("<div class=\"segment__track\"><span>A</span><span>B</span></div>", &layout);
//! assert_eq!(entries.len(), 1);
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod segments;
pub mod server;
pub mod show;
pub mod spotify;
pub mod types;
pub mod utils;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Searching for {}", query);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Created playlist {}", title);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only the binary's top-level handler uses this macro. Library code returns
/// errors instead so every component stays testable.
///
/// # Behavior
///
/// This macro will cause the program to exit with status 1 immediately after
/// printing the error message.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues such as a failed search attempt or a rejected
/// callback request.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
