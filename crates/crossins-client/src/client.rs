//! CRM client implementation.

use reqwest::header::{CACHE_CONTROL, COOKIE, SET_COOKIE};
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response, StatusCode};
use tracing::debug;

use crate::error::ClientError;
use crate::types::{
    ApiErrorBody, AuthReply, DashboardSnapshot, LoginRequest, QuoteSubmission, SessionInfo,
};
use crate::{ClientConfig, CrmClient, Credentials, DEFAULT_API_BASE_URL, DEFAULT_QUOTE_ENDPOINT};

impl CrmClient {
    /// Create a client pointed at the local development backend.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Network` if the HTTP client cannot be built.
    pub fn new() -> Result<Self, ClientError> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client with full configuration.
    ///
    /// Empty URLs fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Config` if a URL is not `http(s)://`, or
    /// `ClientError::Network` if the HTTP client cannot be built.
    #[allow(clippy::needless_pass_by_value)]
    pub fn with_config(cfg: ClientConfig) -> Result<Self, ClientError> {
        let api_base_url = non_empty_or(&cfg.api_base_url, DEFAULT_API_BASE_URL)
            .trim_end_matches('/')
            .to_owned();
        let quote_endpoint = non_empty_or(&cfg.quote_endpoint, DEFAULT_QUOTE_ENDPOINT).to_owned();

        for (name, url) in [("api_base_url", &api_base_url), ("quote_endpoint", &quote_endpoint)] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ClientError::Config(format!(
                    "{name} must be an http(s) URL, got \"{url}\""
                )));
            }
        }

        let timeout = if cfg.timeout.is_zero() {
            ClientConfig::default().timeout
        } else {
            cfg.timeout
        };

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("crossins-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Network)?;

        Ok(Self {
            api_base_url,
            quote_endpoint,
            client,
        })
    }

    /// Base URL every API path is joined onto.
    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    /// Ask the backend "am I logged in, and as whom".
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Auth` on 401/403, `ClientError::Api` on any other
    /// non-success status, or a transport/decoding error.
    pub async fn fetch_session(&self, creds: &Credentials) -> Result<SessionInfo, ClientError> {
        let req = self
            .client
            .get(self.url("/auth/session/"))
            .header(CACHE_CONTROL, "no-store");
        let resp = send(with_credentials(req, creds)).await?;
        decode_json(resp).await
    }

    /// Post credentials as JSON to the backend login endpoint.
    ///
    /// On success the reply carries the session cookies to relay.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Auth`/`ClientError::Api` with the server `detail`
    /// when the backend rejects the login.
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthReply, ClientError> {
        let req = self
            .client
            .post(self.url("/auth/login/"))
            .json(&LoginRequest { username, password });
        let resp = send(req).await?;
        Ok(auth_reply(&resp))
    }

    /// End the backend session.
    ///
    /// Any HTTP answer counts as done: the status is recorded on the reply
    /// rather than turned into an error.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Timeout`/`ClientError::Network` if the backend
    /// could not be reached at all.
    pub async fn logout(&self, creds: &Credentials) -> Result<AuthReply, ClientError> {
        let req = with_credentials(self.client.post(self.url("/auth/logout/")), creds);
        let resp = req.send().await.map_err(transport_error)?;
        debug!(status = resp.status().as_u16(), "logout answered");
        Ok(auth_reply(&resp))
    }

    /// Load the staff dashboard snapshot.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Auth` when the caller is not a logged-in staff
    /// member, `ClientError::Api` for any other failure status.
    pub async fn dashboard_snapshot(
        &self,
        creds: &Credentials,
    ) -> Result<DashboardSnapshot, ClientError> {
        let req = with_credentials(self.client.get(self.url("/dashboard/metrics/")), creds);
        let resp = send(req).await?;
        decode_json(resp).await
    }

    /// Submit a quote request as a multipart form to the lead endpoint.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Config` for an unusable attachment MIME type, or
    /// the usual status/transport errors.
    pub async fn submit_quote(&self, quote: QuoteSubmission) -> Result<(), ClientError> {
        let mut form = Form::new()
            .text("name", quote.name)
            .text("phone", quote.phone)
            .text("email", quote.email)
            .text("insurance_type", quote.insurance_type.as_str())
            .text("notes", quote.notes);

        if let Some(file) = quote.attachment {
            let mut part = Part::bytes(file.bytes).file_name(file.file_name);
            if let Some(mime) = file.content_type.as_deref() {
                part = part
                    .mime_str(mime)
                    .map_err(|e| ClientError::Config(format!("invalid attachment type: {e}")))?;
            }
            form = form.part("attachment", part);
        }

        let req = self.client.post(&self.quote_endpoint).multipart(form);
        send(req).await?;
        Ok(())
    }

    // --- Private ---

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url, path)
    }
}

/// Send a request and turn every non-success status into an error.
async fn send(req: RequestBuilder) -> Result<Response, ClientError> {
    let resp = req.send().await.map_err(transport_error)?;
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    // Parse error body
    let error_text = resp.text().await.unwrap_or_default();
    let detail = serde_json::from_str::<ApiErrorBody>(&error_text)
        .ok()
        .and_then(|b| b.detail);

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(ClientError::Auth {
            status_code: status.as_u16(),
            detail,
        });
    }
    Err(ClientError::Api {
        status_code: status.as_u16(),
        detail,
    })
}

fn with_credentials(req: RequestBuilder, creds: &Credentials) -> RequestBuilder {
    match creds.cookie_header() {
        Some(cookie) => req.header(COOKIE, cookie),
        None => req,
    }
}

async fn decode_json<T: serde::de::DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    let text = resp.text().await.map_err(transport_error)?;
    serde_json::from_str(&text).map_err(ClientError::Json)
}

fn auth_reply(resp: &Response) -> AuthReply {
    AuthReply {
        status_code: resp.status().as_u16(),
        set_cookies: resp
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(ToOwned::to_owned)
            .collect(),
    }
}

fn transport_error(e: reqwest::Error) -> ClientError {
    if e.is_timeout() {
        ClientError::Timeout
    } else {
        ClientError::Network(e)
    }
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value.trim()
    }
}
