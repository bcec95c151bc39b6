use std::sync::Arc;

use axum::{Extension, http::Uri, response::Json};
use serde_json::{Value, json};

use crate::{info, spotify::auth::AuthSession};

pub async fn diagnostic(
    uri: Uri,
    Extension(session): Extension<Arc<AuthSession>>,
) -> Json<Value> {
    info!("Got request for: {}", uri);
    Json(json!({
        "status": session.phase().await.label(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}
