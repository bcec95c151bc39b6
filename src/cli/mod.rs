//! # CLI Module
//!
//! User-facing commands. Each returns its error to `main`, which is the only
//! place that decides how the process ends.
//!
//! - [`create`] - log in, scrape the show and create the playlist
//! - [`segments`] - scrape the show and print what would be searched
//!
//! ```bash
//! showlist segments --show-url https://www.bbc.co.uk/programmes/m000abcd
//! showlist create --show-url https://www.bbc.co.uk/programmes/m000abcd \
//!     --playlist-name "Late Junction {{ .Now }}" --clean
//! ```

mod create;
mod segments;

pub use create::create;
pub use segments::segments;
