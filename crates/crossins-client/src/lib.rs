//! Client side of the Cross Insurance CRM.
//!
//! Talks to the CRM backend over plain REST/JSON with cookie-based
//! credentials, and provides the two reusable shells every dynamic page is
//! built from:
//!
//! - [`session::SessionShell`]: holds the last known [`SessionInfo`],
//!   refreshes it on demand and resets it optimistically on logout.
//! - [`fetcher::GuardedFetcher`]: one cancellable load per mount, mapping
//!   HTTP status to data, login redirect, or a generic failure message.
//!
//! # Example
//!
//! ```rust,no_run
//! use crossins_client::{CrmClient, Credentials};
//!
//! # async fn example() -> Result<(), crossins_client::ClientError> {
//! let client = CrmClient::new()?;
//! let creds = Credentials::from_cookie_header(Some("sessionid=abc"));
//! let session = client.fetch_session(&creds).await?;
//! if session.is_staff {
//!     let snapshot = client.dashboard_snapshot(&creds).await?;
//!     tracing::info!(clients = snapshot.summary.total_clients, "dashboard loaded");
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
pub mod fetcher;
pub mod session;
mod types;

pub use error::ClientError;
pub use types::{
    Alerts, Attachment, AuthReply, DashboardSnapshot, InsuranceType, InvoiceAlert, LeadAlert,
    QuoteSubmission, RenewalAlert, SessionInfo, Summary, UnknownInsuranceType,
};

use std::time::Duration;

/// Local development backend.
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000/api";
/// Local development lead-capture endpoint.
pub const DEFAULT_QUOTE_ENDPOINT: &str = "http://127.0.0.1:8000/api/leads/";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the CRM client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL. Default: `http://127.0.0.1:8000/api`.
    pub api_base_url: String,
    /// Absolute URL the quote form posts to.
    pub quote_endpoint: String,
    /// Request timeout. Default: 10 seconds.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            quote_endpoint: DEFAULT_QUOTE_ENDPOINT.to_owned(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Browser credentials forwarded to the backend with each call.
///
/// The site never stores backend sessions itself: it relays whatever `Cookie`
/// header the browser sent.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    cookie: Option<String>,
}

impl Credentials {
    /// No cookies at all.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Wrap the raw `Cookie` header of an incoming request.
    pub fn from_cookie_header(header: Option<&str>) -> Self {
        Self {
            cookie: header
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(ToOwned::to_owned),
        }
    }

    /// The `Cookie` header value to forward, if any.
    pub fn cookie_header(&self) -> Option<&str> {
        self.cookie.as_deref()
    }
}

// Cookie values are session secrets.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("cookie", &self.cookie.as_ref().map(|_| "[redacted]"))
            .finish()
    }
}

/// CRM REST client.
///
/// Cheap to share behind an `Arc`; the underlying connection pool is reused
/// by every mount.
#[derive(Debug, Clone)]
pub struct CrmClient {
    api_base_url: String,
    quote_endpoint: String,
    client: reqwest::Client,
}
