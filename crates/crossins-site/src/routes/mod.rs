//! HTTP routes.
//!
//! Every page handler is one mount: it derives a [`Mount`] from the shutdown
//! token, forwards the browser's cookies to the CRM backend, and renders the
//! outcome.
//!
//! [`Mount`]: crossins_client::fetcher::Mount

pub mod auth;
pub mod dashboard;
pub mod landing;
pub mod quote;
pub mod session;

use std::sync::Arc;

use axum::Router;
use axum::http::header::{CACHE_CONTROL, COOKIE, SET_COOKIE, X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS};
use axum::http::{HeaderMap, HeaderValue};
use axum::response::Response;
use axum::routing::get;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crossins_client::Credentials;
use crossins_client::session::SessionSource;

use crate::state::AppState;

/// Build the Axum router with all routes and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    // Views that depend on the caller's session must never be cached.
    let private_routes = Router::new()
        .merge(dashboard::router())
        .merge(session::router())
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ));

    Router::new()
        .merge(landing::router())
        .merge(quote::router(state.config.max_upload_bytes))
        .merge(auth::router())
        .merge(private_routes)
        .route("/healthz", get(healthz))
        .nest_service("/static", ServeDir::new(&state.config.static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

/// The browser's cookies, forwarded to the backend as-is.
pub(crate) fn credentials(headers: &HeaderMap) -> Credentials {
    Credentials::from_cookie_header(headers.get(COOKIE).and_then(|v| v.to_str().ok()))
}

pub(crate) fn session_source(state: &AppState) -> Arc<dyn SessionSource> {
    state.client.clone()
}

/// Relay backend `Set-Cookie` values to the browser.
pub(crate) fn append_cookies(resp: &mut Response, cookies: &[String]) {
    for cookie in cookies {
        match HeaderValue::from_str(cookie) {
            Ok(value) => {
                resp.headers_mut().append(SET_COOKIE, value);
            }
            Err(_) => warn!("dropping backend Set-Cookie value that is not a valid header"),
        }
    }
}

/// Current year for the landing page footer.
pub(crate) fn current_year() -> i32 {
    use chrono::Datelike;
    chrono::Utc::now().year()
}
