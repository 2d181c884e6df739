//! Error types for the CRM client.

/// All errors that can occur when calling the CRM backend.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Invalid client configuration (bad URL, unusable attachment metadata).
    #[error("crm config error: {0}")]
    Config(String),

    /// The backend refused the credentials (401/403).
    #[error("crm auth error {status_code}")]
    Auth {
        /// HTTP status code, either 401 or 403.
        status_code: u16,
        /// `detail` field of the error body, if the body was parsable.
        detail: Option<String>,
    },

    /// The backend answered with any other non-success status.
    #[error("crm API error {status_code}")]
    Api {
        /// HTTP status code.
        status_code: u16,
        /// `detail` field of the error body, if the body was parsable.
        detail: Option<String>,
    },

    /// Request timed out.
    #[error("crm request timed out")]
    Timeout,

    /// Network or HTTP client error.
    #[error("crm network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON serialization/deserialization error.
    #[error("crm json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// HTTP status code carried by the error, if the backend answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Auth { status_code, .. } | Self::Api { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }

    /// The backend said "not logged in" (401).
    pub fn is_unauthorized(&self) -> bool {
        self.status_code() == Some(401)
    }

    /// The backend requires a (staff) login before serving this request.
    pub fn requires_login(&self) -> bool {
        matches!(self, Self::Auth { .. })
    }

    /// Server-provided human-readable detail, when one was sent.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Auth { detail, .. } | Self::Api { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}
