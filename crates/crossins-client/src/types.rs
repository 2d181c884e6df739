//! Public payload types exchanged with the CRM backend.
//!
//! These shapes are owned by the backend; the client only mirrors them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Login state reported by `GET /auth/session/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInfo {
    /// Whether the request carried a valid backend session.
    pub authenticated: bool,
    /// Username of the logged-in user.
    pub username: Option<String>,
    /// Whether the user belongs to the staff (may open the dashboard).
    pub is_staff: bool,
}

impl SessionInfo {
    /// Label shown on the round profile button.
    pub fn avatar_label(&self) -> String {
        if !self.authenticated {
            return "☰".to_owned();
        }
        self.username
            .as_deref()
            .and_then(|name| name.chars().next())
            .map_or_else(|| "U".to_owned(), |c| c.to_uppercase().collect())
    }
}

/// Point-in-time dashboard read from `GET /dashboard/metrics/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub summary: Summary,
    pub alerts: Alerts,
}

/// Headline counters of the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total_clients: u64,
    pub total_policies: u64,
    pub active_policies: u64,
    pub pending_policies: u64,
    pub renewals_next_30_days: u64,
    pub manual_invoices: u64,
    pub invoices_pending: u64,
    pub leads_last_7_days: u64,
}

/// The three alert lists. Limits (30-day window, last 5 leads) are applied by
/// the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alerts {
    #[serde(default)]
    pub renewals: Vec<RenewalAlert>,
    #[serde(default)]
    pub invoices: Vec<InvoiceAlert>,
    #[serde(default)]
    pub leads: Vec<LeadAlert>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenewalAlert {
    pub policy_number: String,
    pub client: String,
    pub product: String,
    /// ISO 8601 date, `null` when the policy has none.
    pub renewal_date: Option<String>,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceAlert {
    pub invoice_number: String,
    pub policy_number: String,
    pub client: String,
    pub status: String,
    /// Decimal amount, already formatted by the backend.
    pub amount: String,
    pub due_date: Option<String>,
    pub is_manual: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadAlert {
    pub name: String,
    pub insurance_type: String,
    /// ISO 8601 timestamp.
    pub created_at: String,
    pub phone: String,
}

/// Coverage line a prospect asks a quote for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InsuranceType {
    #[default]
    Autos,
    Vida,
    Propiedad,
    Comerciales,
    Anualidades,
    Otro,
}

impl InsuranceType {
    /// Every choice, in the order the form lists them.
    pub const ALL: [Self; 6] = [
        Self::Autos,
        Self::Vida,
        Self::Propiedad,
        Self::Comerciales,
        Self::Anualidades,
        Self::Otro,
    ];

    /// Wire value, which doubles as the display label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Autos => "Autos",
            Self::Vida => "Vida",
            Self::Propiedad => "Propiedad",
            Self::Comerciales => "Comerciales",
            Self::Anualidades => "Anualidades",
            Self::Otro => "Otro",
        }
    }
}

impl fmt::Display for InsuranceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the known insurance types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown insurance type \"{0}\"")]
pub struct UnknownInsuranceType(pub String);

impl FromStr for InsuranceType {
    type Err = UnknownInsuranceType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownInsuranceType(s.to_owned()))
    }
}

/// A lead captured by the public quote form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteSubmission {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub insurance_type: InsuranceType,
    pub notes: String,
    pub attachment: Option<Attachment>,
}

/// Single optional file uploaded with a quote request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    /// MIME type reported by the browser, if any.
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Backend reply to a login or logout call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthReply {
    /// HTTP status the backend answered with.
    pub status_code: u16,
    /// Raw `Set-Cookie` header values to relay to the browser.
    pub set_cookies: Vec<String>,
}

// --- Internal API request/response types ---

#[derive(Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Deserialize)]
pub(crate) struct ApiErrorBody {
    pub detail: Option<String>,
}
