//! Session query and the session-aware shell.
//!
//! A [`SessionShell`] is created once per page render and shared by every
//! consumer of that page (profile menu, mobile menu, JSON endpoint) through a
//! `watch` channel, so they can never disagree about who is logged in.
//!
//! Refresh policy:
//! - success replaces the value wholesale;
//! - `401` resets it to the unauthenticated default;
//! - any other failure leaves it untouched, so a transient backend error
//!   never flips a logged-in user to logged-out;
//! - concurrent refreshes of one shell are coalesced into a single request.
//!
//! Logout is optimistic and fire-and-forget: the value is reset before the
//! backend is called and is never rolled back.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::{Mutex, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::ClientError;
use crate::types::{AuthReply, SessionInfo};
use crate::{CrmClient, Credentials};

/// Where session state comes from.
#[async_trait]
pub trait SessionSource: Send + Sync {
    /// Query the current login state for the given credentials.
    async fn fetch_session(&self, creds: &Credentials) -> Result<SessionInfo, ClientError>;

    /// End the session behind the given credentials.
    async fn logout(&self, creds: &Credentials) -> Result<AuthReply, ClientError>;
}

#[async_trait]
impl SessionSource for CrmClient {
    async fn fetch_session(&self, creds: &Credentials) -> Result<SessionInfo, ClientError> {
        CrmClient::fetch_session(self, creds).await
    }

    async fn logout(&self, creds: &Credentials) -> Result<AuthReply, ClientError> {
        CrmClient::logout(self, creds).await
    }
}

/// What a refresh did to the shell's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionRefresh {
    /// The backend answered; the value was replaced.
    Updated,
    /// The backend answered 401; the value is now the default.
    Reset,
    /// The query failed some other way; the previous value was kept.
    Unchanged,
    /// The mount went away before the query completed.
    Cancelled,
    /// Another refresh of this shell completed while this one waited.
    Coalesced,
}

/// Holds the last known [`SessionInfo`] for one page render.
pub struct SessionShell {
    source: Arc<dyn SessionSource>,
    credentials: Credentials,
    state: watch::Sender<SessionInfo>,
    fetch_gate: Mutex<()>,
    completed_fetches: AtomicU64,
}

impl SessionShell {
    /// Create a shell in the unauthenticated default state.
    pub fn new(source: Arc<dyn SessionSource>, credentials: Credentials) -> Self {
        let (state, _) = watch::channel(SessionInfo::default());
        Self {
            source,
            credentials,
            state,
            fetch_gate: Mutex::new(()),
            completed_fetches: AtomicU64::new(0),
        }
    }

    /// Create a shell and run the auto-fetch of a mount.
    pub async fn mount(
        source: Arc<dyn SessionSource>,
        credentials: Credentials,
        cancel: &CancellationToken,
    ) -> Self {
        let shell = Self::new(source, credentials);
        shell.fetch_session_with(cancel).await;
        shell
    }

    /// Current value.
    pub fn session(&self) -> SessionInfo {
        self.state.borrow().clone()
    }

    /// Subscribe to every future change of the value.
    pub fn subscribe(&self) -> watch::Receiver<SessionInfo> {
        self.state.subscribe()
    }

    /// Overwrite the value without asking the backend.
    pub fn set_session(&self, value: SessionInfo) {
        self.state.send_replace(value);
    }

    /// Refresh from the backend. Not cancellable.
    pub async fn fetch_session(&self) -> SessionRefresh {
        self.fetch_session_with(&CancellationToken::new()).await
    }

    /// Refresh from the backend unless `cancel` fires first.
    pub async fn fetch_session_with(&self, cancel: &CancellationToken) -> SessionRefresh {
        let seen = self.completed_fetches.load(Ordering::Acquire);

        let _gate = tokio::select! {
            biased;
            () = cancel.cancelled() => return SessionRefresh::Cancelled,
            guard = self.fetch_gate.lock() => guard,
        };

        if self.completed_fetches.load(Ordering::Acquire) != seen {
            debug!("session fetch coalesced with a concurrent one");
            return SessionRefresh::Coalesced;
        }

        let result = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                debug!("session fetch cancelled");
                return SessionRefresh::Cancelled;
            }
            result = self.source.fetch_session(&self.credentials) => result,
        };

        self.completed_fetches.fetch_add(1, Ordering::AcqRel);
        self.apply(result)
    }

    /// Log out: reset the value first, then tell the backend.
    ///
    /// Returns the `Set-Cookie` values the backend sent, to be relayed to the
    /// browser. Empty if the backend could not be reached.
    pub async fn logout(&self) -> Vec<String> {
        self.set_session(SessionInfo::default());

        match self.source.logout(&self.credentials).await {
            Ok(reply) => {
                if !(200..300).contains(&reply.status_code) {
                    warn!(
                        status = reply.status_code,
                        "backend refused logout, client session already reset"
                    );
                }
                reply.set_cookies
            }
            Err(e) => {
                warn!(error = %e, "logout request failed, client session already reset");
                Vec::new()
            }
        }
    }

    fn apply(&self, result: Result<SessionInfo, ClientError>) -> SessionRefresh {
        match result {
            Ok(info) => {
                self.set_session(info);
                SessionRefresh::Updated
            }
            Err(e) if e.is_unauthorized() => {
                self.set_session(SessionInfo::default());
                SessionRefresh::Reset
            }
            Err(e) => {
                warn!(
                    error = %e,
                    status = ?e.status_code(),
                    "session status fetch failed, keeping last known session"
                );
                SessionRefresh::Unchanged
            }
        }
    }
}

impl std::fmt::Debug for SessionShell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionShell")
            .field("session", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}
