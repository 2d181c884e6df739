//! Form state machines for the quote and login forms.
//!
//! Both forms run `idle → loading → (success | error)`. Handlers drive them
//! around the backend call and views render whatever state they end in.

use crossins_client::{Attachment, ClientError, InsuranceType, QuoteSubmission};

pub const QUOTE_SUCCESS: &str = "Gracias por contactarnos. Un asesor se comunicará contigo pronto.";
pub const QUOTE_FAILURE: &str = "No pudimos enviar tu solicitud en este momento. Por favor intenta nuevamente o contáctanos por los canales directos.";
pub const QUOTE_MISSING_FIELDS: &str = "Completa tu nombre, teléfono y email para enviar la solicitud.";
pub const LOGIN_MISSING_FIELDS: &str = "Ingresa tu usuario y contraseña";
pub const LOGIN_FAILURE: &str = "No fue posible iniciar sesión.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// Values typed into the quote form. The attachment is not kept: browsers
/// cannot prefill file inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteFields {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub insurance_type: InsuranceType,
    pub notes: String,
}

impl QuoteFields {
    /// Store one submitted text field. Unknown names are ignored and an
    /// unknown insurance type falls back to the default.
    pub fn set(&mut self, field: &str, value: String) {
        match field {
            "name" => self.name = value,
            "phone" => self.phone = value,
            "email" => self.email = value,
            "notes" => self.notes = value,
            "insurance_type" => {
                self.insurance_type = value.parse().unwrap_or_else(|e| {
                    tracing::debug!(error = %e, "falling back to default insurance type");
                    InsuranceType::default()
                });
            }
            _ => {}
        }
    }

    fn missing_required(&self) -> bool {
        [&self.name, &self.phone, &self.email]
            .iter()
            .any(|v| v.trim().is_empty())
    }
}

/// Quote form state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteForm {
    pub status: FormStatus,
    pub message: Option<String>,
    pub fields: QuoteFields,
}

impl QuoteForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fields(fields: QuoteFields) -> Self {
        Self {
            fields,
            ..Self::default()
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status == FormStatus::Loading
    }

    /// Enter `Loading`. Returns `false` if a submission is already in flight.
    #[must_use]
    pub fn begin(&mut self) -> bool {
        if self.is_loading() {
            return false;
        }
        self.status = FormStatus::Loading;
        self.message = None;
        true
    }

    /// Check the required fields. On failure the form is in `Error` with its
    /// values kept.
    pub fn validate(&mut self) -> bool {
        if self.fields.missing_required() {
            self.status = FormStatus::Error;
            self.message = Some(QUOTE_MISSING_FIELDS.to_owned());
            return false;
        }
        true
    }

    /// Payload for the lead endpoint.
    pub fn submission(&self, attachment: Option<Attachment>) -> QuoteSubmission {
        QuoteSubmission {
            name: self.fields.name.clone(),
            phone: self.fields.phone.clone(),
            email: self.fields.email.clone(),
            insurance_type: self.fields.insurance_type,
            notes: self.fields.notes.clone(),
            attachment,
        }
    }

    pub fn succeed(&mut self) {
        self.status = FormStatus::Success;
        self.message = Some(QUOTE_SUCCESS.to_owned());
        self.fields = QuoteFields::default();
    }

    pub fn fail(&mut self) {
        self.status = FormStatus::Error;
        self.message = Some(QUOTE_FAILURE.to_owned());
    }
}

/// Login form state. The password is never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub error: Option<String>,
    submitting: bool,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Start a submission. Returns `false` (and sends nothing) for blank
    /// credentials or while another submission is in flight.
    #[must_use]
    pub fn begin(&mut self, username: &str, password: &str) -> bool {
        if self.submitting {
            return false;
        }
        self.username = username.to_owned();
        if username.trim().is_empty() || password.is_empty() {
            self.error = Some(LOGIN_MISSING_FIELDS.to_owned());
            return false;
        }
        self.error = None;
        self.submitting = true;
        true
    }

    /// Show the server `detail` when there is one, else the fallback.
    pub fn fail_with(&mut self, err: &ClientError) {
        self.submitting = false;
        self.error = Some(err.detail().unwrap_or(LOGIN_FAILURE).to_owned());
    }

    pub fn succeed(&mut self) {
        self.submitting = false;
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> QuoteFields {
        QuoteFields {
            name: "Juan Pérez".to_owned(),
            phone: "+1 787 555 1234".to_owned(),
            email: "juan@example.com".to_owned(),
            insurance_type: InsuranceType::Propiedad,
            notes: "Casa en Ponce".to_owned(),
        }
    }

    // ── quote ────────────────────────────────────────────────────────

    #[test]
    fn quote_success_clears_fields() {
        let mut form = QuoteForm::with_fields(filled());
        assert!(form.begin());
        assert!(form.validate());
        form.succeed();

        assert_eq!(form.status, FormStatus::Success);
        assert_eq!(form.message.as_deref(), Some(QUOTE_SUCCESS));
        assert_eq!(form.fields, QuoteFields::default());
        assert_eq!(form.fields.insurance_type, InsuranceType::Autos);
    }

    #[test]
    fn quote_failure_preserves_fields() {
        let mut form = QuoteForm::with_fields(filled());
        assert!(form.begin());
        form.fail();

        assert_eq!(form.status, FormStatus::Error);
        assert_eq!(form.message.as_deref(), Some(QUOTE_FAILURE));
        assert_eq!(form.fields, filled());
    }

    #[test]
    fn quote_begin_rejects_double_submit() {
        let mut form = QuoteForm::with_fields(filled());
        assert!(form.begin());
        assert!(!form.begin());
        assert!(form.is_loading());
    }

    #[test]
    fn quote_begin_clears_previous_message() {
        let mut form = QuoteForm::with_fields(filled());
        form.fail();
        assert!(form.begin());
        assert!(form.message.is_none());
    }

    #[test]
    fn quote_missing_required_field() {
        let mut form = QuoteForm::with_fields(QuoteFields {
            email: "  ".to_owned(),
            ..filled()
        });
        assert!(form.begin());

        assert!(!form.validate());
        assert_eq!(form.status, FormStatus::Error);
        assert_eq!(form.message.as_deref(), Some(QUOTE_MISSING_FIELDS));
        assert_eq!(form.fields.name, "Juan Pérez");
    }

    #[test]
    fn quote_fields_set_parses_insurance_type() {
        let mut fields = QuoteFields::default();
        fields.set("insurance_type", "vida".to_owned());
        assert_eq!(fields.insurance_type, InsuranceType::Vida);
        fields.set("insurance_type", "Mascotas".to_owned());
        assert_eq!(fields.insurance_type, InsuranceType::Autos);
        fields.set("unexpected", "x".to_owned());
        assert_eq!(fields, QuoteFields::default());
    }

    #[test]
    fn submission_carries_fields() {
        let form = QuoteForm::with_fields(filled());
        let sub = form.submission(None);
        assert_eq!(sub.name, "Juan Pérez");
        assert_eq!(sub.insurance_type, InsuranceType::Propiedad);
        assert!(sub.attachment.is_none());
    }

    // ── login ────────────────────────────────────────────────────────

    #[test]
    fn login_blank_credentials_rejected() {
        let mut form = LoginForm::new();
        assert!(!form.begin("maria", ""));
        assert_eq!(form.error.as_deref(), Some(LOGIN_MISSING_FIELDS));
        assert!(!form.begin("  ", "secret"));
        assert!(!form.is_submitting());
    }

    #[test]
    fn login_single_submission_in_flight() {
        let mut form = LoginForm::new();
        assert!(form.begin("maria", "secret"));
        assert!(!form.begin("maria", "secret"));
        form.succeed();
        assert!(form.begin("maria", "secret"));
    }

    #[test]
    fn login_failure_shows_server_detail_exactly() {
        let mut form = LoginForm::new();
        assert!(form.begin("maria", "wrong"));
        form.fail_with(&ClientError::Api {
            status_code: 400,
            detail: Some("X".to_owned()),
        });
        assert_eq!(form.error.as_deref(), Some("X"));
        assert_eq!(form.username, "maria");
        assert!(!form.is_submitting());
    }

    #[test]
    fn login_failure_without_detail_uses_fallback() {
        let mut form = LoginForm::new();
        assert!(form.begin("maria", "wrong"));
        form.fail_with(&ClientError::Api {
            status_code: 500,
            detail: None,
        });
        assert_eq!(form.error.as_deref(), Some(LOGIN_FAILURE));

        assert!(form.begin("maria", "wrong"));
        form.fail_with(&ClientError::Timeout);
        assert_eq!(form.error.as_deref(), Some(LOGIN_FAILURE));
    }
}
