//! # API Module
//!
//! HTTP handlers of the local server that receives the OAuth redirect.
//!
//! - [`callback`] - `GET /callback?code=..&state=..`, completes the login
//!   through the shared [`AuthSession`](crate::spotify::auth::AuthSession)
//! - [`diagnostic`] - every other path; logs the request and reports the
//!   session phase
//!
//! ```rust,ignore
//! use axum::{Extension, Router, routing::get};
//! use showlist::api::{callback, diagnostic};
//!
//! let app = Router::new()
//!     .route("/callback", get(callback))
//!     .fallback(diagnostic)
//!     .layer(Extension(session));
//! ```

mod callback;
mod diagnostic;

pub use callback::callback;
pub use diagnostic::diagnostic;
