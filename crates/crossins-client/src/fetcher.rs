//! Guarded fetcher: the mount-scoped, cancellable, status-branching load used
//! for protected data.
//!
//! One [`GuardedFetcher`] performs at most one load per [`Mount`]. The load
//! ends in exactly one of:
//!
//! | Backend answer   | State after the load                           |
//! |------------------|------------------------------------------------|
//! | 2xx              | `data` set                                     |
//! | 401 / 403        | `redirect` to the login view, login message    |
//! | anything else    | generic load-failure message                   |
//! | mount torn down  | nothing set: cancellation is not a user error  |

use std::future::Future;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::ClientError;

/// Lifetime of one page render.
///
/// Dropping the mount cancels every load tied to it.
#[derive(Debug, Default)]
pub struct Mount {
    token: CancellationToken,
}

impl Mount {
    /// A standalone mount.
    pub fn new() -> Self {
        Self::default()
    }

    /// A mount that is also torn down when `parent` is cancelled
    /// (server shutdown).
    pub fn child_of(parent: &CancellationToken) -> Self {
        Self {
            token: parent.child_token(),
        }
    }

    /// Token to race mount-scoped work against.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Tear the mount down now.
    pub fn unmount(self) {}
}

impl Drop for Mount {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// `{data, error, loading}` as seen by a view, plus where to navigate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchState<T> {
    pub data: Option<T>,
    /// User-facing message. Never set by a cancelled load.
    pub error: Option<String>,
    pub loading: bool,
    /// Path the view must navigate to, if any.
    pub redirect: Option<String>,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            loading: true,
            redirect: None,
        }
    }
}

/// Localized messages surfaced by a guarded load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardMessages {
    /// Shown when the backend requires a (staff) login.
    pub login_required: String,
    /// Shown for every other failure.
    pub load_failed: String,
}

/// How a call to [`GuardedFetcher::load`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    LoginRequired,
    Failed,
    Cancelled,
    /// This fetcher already ran its one load; nothing was requested.
    AlreadyLoaded,
}

/// Runs one protected load and keeps its view state.
#[derive(Debug)]
pub struct GuardedFetcher<T> {
    state: FetchState<T>,
    messages: GuardMessages,
    login_path: String,
    started: bool,
}

impl<T> GuardedFetcher<T> {
    pub fn new(messages: GuardMessages, login_path: impl Into<String>) -> Self {
        Self {
            state: FetchState::default(),
            messages,
            login_path: login_path.into(),
            started: false,
        }
    }

    /// Current view state.
    pub fn state(&self) -> &FetchState<T> {
        &self.state
    }

    pub fn into_state(self) -> FetchState<T> {
        self.state
    }

    /// Run `request` unless `cancel` fires first, and record the outcome.
    ///
    /// Only the first call issues a request; `request` is dropped unpolled on
    /// later calls.
    pub async fn load<F>(&mut self, cancel: &CancellationToken, request: F) -> LoadOutcome
    where
        F: Future<Output = Result<T, ClientError>>,
    {
        if self.started {
            return LoadOutcome::AlreadyLoaded;
        }
        self.started = true;
        self.state.loading = true;
        self.state.error = None;

        let result = tokio::select! {
            biased;
            () = cancel.cancelled() => None,
            result = request => Some(result),
        };
        self.state.loading = false;

        match result {
            None => {
                debug!("guarded load cancelled before completion");
                LoadOutcome::Cancelled
            }
            Some(Ok(data)) => {
                self.state.data = Some(data);
                LoadOutcome::Loaded
            }
            Some(Err(e)) if e.requires_login() => {
                debug!(status = ?e.status_code(), "guarded load requires login");
                self.state.redirect = Some(self.login_path.clone());
                self.state.error = Some(self.messages.login_required.clone());
                LoadOutcome::LoginRequired
            }
            Some(Err(e)) => {
                warn!(error = %e, status = ?e.status_code(), "guarded load failed");
                self.state.error = Some(self.messages.load_failed.clone());
                LoadOutcome::Failed
            }
        }
    }
}
