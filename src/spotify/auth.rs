use std::{net::SocketAddr, sync::Arc, time::Duration};

use base64::{Engine, engine::general_purpose::STANDARD};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::{Client, Url};
use tokio::sync::{Mutex, oneshot};

use crate::{
    config::{AuthEndpoints, ClientCredentials},
    error::AuthError,
    info,
    server::start_api_server,
    success,
    types::Token,
    utils, warning,
};

type Handoff = Result<Token, AuthError>;

/// Why a session ended in [`AuthPhase::Failed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    StateMismatch,
    MissingCode,
    Denied,
    TokenExchange,
    TimedOut,
    ListenerStopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPhase {
    Idle,
    AwaitingCallback,
    Authenticated,
    Failed(FailureReason),
}

impl AuthPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, AuthPhase::Authenticated | AuthPhase::Failed(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            AuthPhase::Idle => "idle",
            AuthPhase::AwaitingCallback => "awaiting_callback",
            AuthPhase::Authenticated => "authenticated",
            AuthPhase::Failed(_) => "failed",
        }
    }
}

/// Query parameters Spotify appends to the redirect URI.
#[derive(Debug, Clone, Default)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

struct SessionState {
    phase: AuthPhase,
    nonce: Option<String>,
    sender: Option<oneshot::Sender<Handoff>>,
    receiver: Option<oneshot::Receiver<Handoff>>,
}

/// One OAuth authorization-code login.
///
/// The callback handler is the only producer and [`AuthSession::wait_for_token`]
/// the only consumer of the token. The session moves from `Idle` to
/// `AwaitingCallback` in [`AuthSession::begin`] and ends either
/// `Authenticated` or `Failed`; a terminal session never hands off again.
pub struct AuthSession {
    credentials: ClientCredentials,
    endpoints: AuthEndpoints,
    http: Client,
    state: Mutex<SessionState>,
}

impl AuthSession {
    pub fn new(credentials: ClientCredentials, endpoints: AuthEndpoints) -> Self {
        Self {
            credentials,
            endpoints,
            http: Client::new(),
            state: Mutex::new(SessionState {
                phase: AuthPhase::Idle,
                nonce: None,
                sender: None,
                receiver: None,
            }),
        }
    }

    pub async fn phase(&self) -> AuthPhase {
        self.state.lock().await.phase
    }

    /// Generates the state nonce, opens the handoff and returns the URL the
    /// user has to visit.
    pub async fn begin(&self) -> Result<Url, AuthError> {
        let mut state = self.state.lock().await;
        if state.phase != AuthPhase::Idle {
            return Err(AuthError::AlreadyStarted);
        }

        let nonce = utils::generate_state();
        let url = Url::parse_with_params(
            &self.endpoints.auth_url,
            &[
                ("client_id", self.credentials.client_id.as_str()),
                ("response_type", "code"),
                ("redirect_uri", self.endpoints.redirect_uri.as_str()),
                ("scope", self.endpoints.scope.as_str()),
                ("state", nonce.as_str()),
            ],
        )
        .map_err(|e| AuthError::InvalidEndpoint {
            url: self.endpoints.auth_url.clone(),
            reason: e.to_string(),
        })?;

        let (sender, receiver) = oneshot::channel();
        state.nonce = Some(nonce);
        state.sender = Some(sender);
        state.receiver = Some(receiver);
        state.phase = AuthPhase::AwaitingCallback;

        Ok(url)
    }

    /// Handles the redirect back from Spotify.
    ///
    /// The `state` parameter must equal the nonce exactly and a code must be
    /// present; anything else fails the session and the failure is handed to
    /// the waiting consumer instead of a token. On success the code is
    /// exchanged for a token which is handed off exactly once.
    pub async fn complete(&self, params: CallbackParams) -> Result<(), AuthError> {
        let (sender, code) = {
            let mut state = self.state.lock().await;
            match state.phase {
                AuthPhase::Idle => return Err(AuthError::NotStarted),
                AuthPhase::Authenticated | AuthPhase::Failed(_) => {
                    return Err(AuthError::AlreadyCompleted);
                }
                AuthPhase::AwaitingCallback => {}
            }
            // taken while validating so a concurrent callback cannot hand off twice
            let Some(sender) = state.sender.take() else {
                return Err(AuthError::AlreadyCompleted);
            };
            let expected = state.nonce.clone().unwrap_or_default();

            match validate(&expected, params) {
                Ok(code) => (sender, code),
                Err((reason, err)) => {
                    state.phase = AuthPhase::Failed(reason);
                    let _ = sender.send(Err(err.clone()));
                    return Err(err);
                }
            }
        };

        let exchanged = self.exchange_code(&code).await;

        let mut state = self.state.lock().await;
        // the consumer gave up while the code was being exchanged
        if state.phase != AuthPhase::AwaitingCallback {
            return Err(AuthError::HandoffDropped);
        }
        match exchanged {
            Ok(token) => {
                state.phase = AuthPhase::Authenticated;
                if sender.send(Ok(token)).is_err() {
                    return Err(AuthError::HandoffDropped);
                }
                Ok(())
            }
            Err(err) => {
                state.phase = AuthPhase::Failed(FailureReason::TokenExchange);
                let _ = sender.send(Err(err.clone()));
                Err(err)
            }
        }
    }

    /// Blocks until the callback hands off a token or `timeout` passes.
    pub async fn wait_for_token(&self, timeout: Duration) -> Result<Token, AuthError> {
        let receiver = {
            let mut state = self.state.lock().await;
            match state.receiver.take() {
                Some(receiver) => receiver,
                None if state.phase == AuthPhase::Idle => return Err(AuthError::NotStarted),
                None => return Err(AuthError::AlreadyCompleted),
            }
        };

        match tokio::time::timeout(timeout, receiver).await {
            Ok(Ok(handoff)) => handoff,
            Ok(Err(_)) => {
                self.fail_if_pending(FailureReason::ListenerStopped).await;
                Err(AuthError::HandoffDropped)
            }
            Err(_) => {
                self.fail_if_pending(FailureReason::TimedOut).await;
                Err(AuthError::TimedOut(timeout.as_secs()))
            }
        }
    }

    async fn fail_if_pending(&self, reason: FailureReason) {
        let mut state = self.state.lock().await;
        if state.phase == AuthPhase::AwaitingCallback {
            state.phase = AuthPhase::Failed(reason);
            state.sender = None;
        }
    }

    /// Exchanges an authorization code at the token endpoint.
    ///
    /// The client authenticates with HTTP Basic credentials built from the
    /// application id and secret.
    async fn exchange_code(&self, code: &str) -> Result<Token, AuthError> {
        let basic = STANDARD.encode(format!(
            "{}:{}",
            self.credentials.client_id, self.credentials.client_secret
        ));

        let response = self
            .http
            .post(&self.endpoints.token_url)
            .header(reqwest::header::AUTHORIZATION, format!("Basic {}", basic))
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.endpoints.redirect_uri.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AuthError::TokenExchange(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::TokenExchange(format!("{}: {}", status, body)));
        }

        response
            .json::<Token>()
            .await
            .map_err(|e| AuthError::TokenExchange(e.to_string()))
    }
}

fn validate(expected: &str, params: CallbackParams) -> Result<String, (FailureReason, AuthError)> {
    let received = params.state.unwrap_or_default();
    if expected.is_empty() || received.as_bytes() != expected.as_bytes() {
        return Err((
            FailureReason::StateMismatch,
            AuthError::StateMismatch {
                expected: expected.to_string(),
                received,
            },
        ));
    }

    if let Some(error) = params.error {
        return Err((FailureReason::Denied, AuthError::Denied(error)));
    }

    match params.code {
        Some(code) if !code.trim().is_empty() => Ok(code),
        _ => Err((FailureReason::MissingCode, AuthError::MissingCode)),
    }
}

/// Runs a complete interactive login.
///
/// Starts the callback server, sends the user to the authorization page and
/// waits at most `timeout` for the redirect. The server is shut down however
/// the login ends.
pub async fn authenticate(
    session: Arc<AuthSession>,
    addr: SocketAddr,
    timeout: Duration,
) -> Result<Token, AuthError> {
    let server = start_api_server(Arc::clone(&session), addr).await?;

    let auth_url = match session.begin().await {
        Ok(url) => url,
        Err(e) => {
            server.shutdown().await;
            return Err(e);
        }
    };

    info!(
        "Please log in to Spotify by visiting the following page in your browser: {}",
        auth_url
    );
    if webbrowser::open(auth_url.as_str()).is_err() {
        warning!("Failed to open browser. Please navigate to the URL above manually.");
    }

    let pb = ProgressBar::new_spinner();
    pb.set_message("Waiting for Spotify login...");
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let token = session.wait_for_token(timeout).await;
    pb.finish_and_clear();
    server.shutdown().await;

    if token.is_ok() {
        success!("Login Completed!");
    }
    token
}
