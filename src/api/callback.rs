use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, http::StatusCode, response::Html};

use crate::{
    error::AuthError,
    spotify::auth::{AuthSession, CallbackParams},
    warning,
};

pub async fn callback(
    Query(mut params): Query<HashMap<String, String>>,
    Extension(session): Extension<Arc<AuthSession>>,
) -> (StatusCode, Html<&'static str>) {
    let params = CallbackParams {
        code: params.remove("code"),
        state: params.remove("state"),
        error: params.remove("error"),
    };

    match session.complete(params).await {
        Ok(()) => (
            StatusCode::OK,
            Html("<h2>Login Completed!</h2><p>You can close this window.</p>"),
        ),
        Err(e @ AuthError::StateMismatch { .. }) => {
            warning!("{}", e);
            (StatusCode::NOT_FOUND, Html("<h4>Unknown login request.</h4>"))
        }
        Err(e @ (AuthError::AlreadyCompleted | AuthError::NotStarted)) => {
            warning!("Ignoring callback: {}", e);
            (StatusCode::CONFLICT, Html("<h4>No login in progress.</h4>"))
        }
        Err(e) => {
            warning!("{}", e);
            (StatusCode::FORBIDDEN, Html("<h4>Couldn't get token.</h4>"))
        }
    }
}
