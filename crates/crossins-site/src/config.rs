//! Site configuration.
//!
//! Loads configuration from environment variables with local-development
//! defaults. All settings can be overridden via `CROSSINS_*` environment
//! variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crossins_client::{ClientConfig, DEFAULT_API_BASE_URL, DEFAULT_QUOTE_ENDPOINT};

use crate::format::{Locale, phone_href, whatsapp_href};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Site configuration.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Address to bind the HTTP listener to.
    pub bind_addr: SocketAddr,
    /// Log level filter (e.g., `info`, `debug`, `warn`).
    pub log_level: String,
    /// CRM API base URL.
    pub api_base_url: String,
    /// Lead-capture endpoint the quote form is forwarded to.
    pub quote_endpoint: String,
    /// Timeout applied to every backend call.
    pub request_timeout: Duration,
    /// Largest accepted quote submission (attachment included).
    pub max_upload_bytes: usize,
    /// Name of the backend session cookie expired on logout.
    pub session_cookie: String,
    /// Directory served under `/static`.
    pub static_dir: PathBuf,
    /// Locale used for dates.
    pub locale: Locale,
    /// Display-only contact constants.
    pub contact: ContactInfo,
}

/// Brokerage contact channels shown on the landing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactInfo {
    pub whatsapp_number: String,
    pub phone_number: String,
    pub support_email: String,
}

impl Default for ContactInfo {
    fn default() -> Self {
        Self {
            whatsapp_number: "+17876000000".to_owned(),
            phone_number: "+1 (787) 600-0000".to_owned(),
            support_email: "contacto@crossinsurance.com".to_owned(),
        }
    }
}

impl ContactInfo {
    /// `tel:` link for the phone number.
    pub fn phone_link(&self) -> String {
        phone_href(&self.phone_number)
    }

    /// `https://wa.me/` link for the WhatsApp number.
    pub fn whatsapp_link(&self) -> String {
        whatsapp_href(&self.whatsapp_number)
    }

    pub fn email_link(&self) -> String {
        format!("mailto:{}", self.support_email)
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT)),
            log_level: "info".to_owned(),
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            quote_endpoint: DEFAULT_QUOTE_ENDPOINT.to_owned(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            session_cookie: "sessionid".to_owned(),
            static_dir: PathBuf::from("./static"),
            locale: Locale::default(),
            contact: ContactInfo::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `PORT` — port to bind on, binds to `0.0.0.0`
    /// - `CROSSINS_BIND_ADDR` — full bind address (overrides `PORT`, default: `127.0.0.1:3000`)
    /// - `CROSSINS_LOG_LEVEL` — log filter (default: `info`)
    /// - `CROSSINS_API_BASE_URL` — CRM API base (default: `http://127.0.0.1:8000/api`)
    /// - `CROSSINS_QUOTE_ENDPOINT` — lead endpoint (default: `http://127.0.0.1:8000/api/leads/`)
    /// - `CROSSINS_WHATSAPP_NUMBER`, `CROSSINS_PHONE_NUMBER`, `CROSSINS_SUPPORT_EMAIL`
    /// - `CROSSINS_LOCALE` — `es-PR` or `en-US` (default: `es-PR`)
    /// - `CROSSINS_REQUEST_TIMEOUT` — seconds (default: `10`)
    /// - `CROSSINS_MAX_UPLOAD_BYTES` — quote body limit (default: 10 MiB)
    /// - `CROSSINS_SESSION_COOKIE` — backend session cookie name (default: `sessionid`)
    /// - `CROSSINS_STATIC_DIR` — static assets (default: `./static`)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key lookup; unparsable values fall
    /// back to their defaults.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let var = |key: &str| get(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        // Priority: CROSSINS_BIND_ADDR > PORT > default 127.0.0.1:3000
        let bind_addr = if let Some(addr) = var("CROSSINS_BIND_ADDR") {
            addr.parse().unwrap_or(defaults.bind_addr)
        } else if let Some(port) = var("PORT") {
            SocketAddr::from(([0, 0, 0, 0], port.parse().unwrap_or(DEFAULT_PORT)))
        } else {
            defaults.bind_addr
        };

        let request_timeout = var("CROSSINS_REQUEST_TIMEOUT")
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map_or(defaults.request_timeout, Duration::from_secs);

        let max_upload_bytes = var("CROSSINS_MAX_UPLOAD_BYTES")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.max_upload_bytes);

        let locale = var("CROSSINS_LOCALE")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.locale);

        let contact = ContactInfo {
            whatsapp_number: var("CROSSINS_WHATSAPP_NUMBER")
                .unwrap_or(defaults.contact.whatsapp_number),
            phone_number: var("CROSSINS_PHONE_NUMBER").unwrap_or(defaults.contact.phone_number),
            support_email: var("CROSSINS_SUPPORT_EMAIL").unwrap_or(defaults.contact.support_email),
        };

        Self {
            bind_addr,
            log_level: var("CROSSINS_LOG_LEVEL").unwrap_or(defaults.log_level),
            api_base_url: var("CROSSINS_API_BASE_URL").unwrap_or(defaults.api_base_url),
            quote_endpoint: var("CROSSINS_QUOTE_ENDPOINT").unwrap_or(defaults.quote_endpoint),
            request_timeout,
            max_upload_bytes,
            session_cookie: var("CROSSINS_SESSION_COOKIE").unwrap_or(defaults.session_cookie),
            static_dir: var("CROSSINS_STATIC_DIR").map_or(defaults.static_dir, PathBuf::from),
            locale,
            contact,
        }
    }

    /// Settings for the CRM client.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            api_base_url: self.api_base_url.clone(),
            quote_endpoint: self.quote_endpoint.clone(),
            timeout: self.request_timeout,
        }
    }
}
