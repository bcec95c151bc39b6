use std::{net::SocketAddr, sync::Arc};

use axum::{Extension, Router, routing::get};
use tokio::{sync::oneshot, task::JoinHandle};

use crate::{api, error::AuthError, spotify::auth::AuthSession, warning};

/// A running callback server.
pub struct ServerHandle {
    local_addr: SocketAddr,
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl ServerHandle {
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stops accepting requests and waits for in-flight ones to finish.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(());
        if let Err(e) = self.task.await {
            warning!("Callback server task failed: {}", e);
        }
    }
}

/// Routes of the callback server: `/callback` and a diagnostic catch-all.
pub fn router(session: Arc<AuthSession>) -> Router {
    Router::new()
        .route("/callback", get(api::callback))
        .fallback(api::diagnostic)
        .layer(Extension(session))
}

/// Binds `addr` and serves the callback routes on a background task.
pub async fn start_api_server(
    session: Arc<AuthSession>,
    addr: SocketAddr,
) -> Result<ServerHandle, AuthError> {
    let listener_error = |e: std::io::Error| AuthError::Listener {
        addr: addr.to_string(),
        reason: e.to_string(),
    };

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(listener_error)?;
    let local_addr = listener.local_addr().map_err(listener_error)?;

    let app = router(session);
    let (shutdown, signal) = oneshot::channel::<()>();
    let task = tokio::spawn(async move {
        let serve = axum::serve(listener, app).with_graceful_shutdown(async {
            let _ = signal.await;
        });
        if let Err(e) = serve.await {
            warning!("Callback server stopped: {}", e);
        }
    });

    Ok(ServerHandle {
        local_addr,
        shutdown,
        task,
    })
}
