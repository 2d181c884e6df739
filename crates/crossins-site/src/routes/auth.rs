//! Staff login and logout.
//!
//! The backend owns the session. Login relays its cookies to the browser;
//! logout resets the client view first and never waits on the backend's
//! opinion of the outcome.

use std::sync::Arc;

use axum::extract::rejection::FormRejection;
use axum::extract::{Query, State};
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, HeaderValue};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crossins_client::session::SessionShell;

use crate::error::AppError;
use crate::forms::LoginForm;
use crate::routes::dashboard::LOGIN_REQUIRED;
use crate::routes::{append_cookies, credentials, session_source};
use crate::state::AppState;
use crate::views::login;

/// Concurrent login/logout calls allowed against the backend.
const AUTH_CONCURRENCY: usize = 32;

/// `reason` value the dashboard redirects with.
pub const STAFF_REQUIRED_REASON: &str = "staff_required";

/// Build the auth router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/login", get(login_page).post(login_submit))
        .route("/logout", post(logout))
        .layer(tower::limit::ConcurrencyLimitLayer::new(AUTH_CONCURRENCY))
}

#[derive(Debug, Deserialize)]
struct LoginPageParams {
    reason: Option<String>,
}

#[derive(Deserialize)]
struct LoginSubmission {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

#[derive(Debug, Deserialize)]
struct LogoutParams {
    next: Option<String>,
}

async fn login_page(Query(params): Query<LoginPageParams>) -> Html<String> {
    let notice = (params.reason.as_deref() == Some(STAFF_REQUIRED_REASON)).then_some(LOGIN_REQUIRED);
    Html(login::render(&LoginForm::new(), notice))
}

async fn login_submit(
    State(state): State<Arc<AppState>>,
    Form(submission): Form<LoginSubmission>,
) -> Response {
    let mut form = LoginForm::new();
    if !form.begin(&submission.username, &submission.password) {
        return Html(login::render(&form, None)).into_response();
    }

    match state.client.login(&submission.username, &submission.password).await {
        Ok(reply) => {
            form.succeed();
            info!(cookies = reply.set_cookies.len(), "login accepted by backend");
            let mut resp = Redirect::to("/dashboard").into_response();
            append_cookies(&mut resp, &reply.set_cookies);
            resp
        }
        Err(e) => {
            warn!(error = %e, status = ?e.status_code(), "login rejected");
            form.fail_with(&e);
            Html(login::render(&form, None)).into_response()
        }
    }
}

/// Optimistic logout: the redirect goes out whatever the backend answered.
/// A missing or unreadable body only loses `next`.
async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    params: Result<Form<LogoutParams>, FormRejection>,
) -> Result<Response, AppError> {
    let next = match params {
        Ok(Form(params)) => params.next,
        Err(rejection) => {
            debug!(error = %rejection, "logout without readable form body");
            None
        }
    };

    let shell = SessionShell::new(session_source(&state), credentials(&headers));
    let backend_cookies = shell.logout().await;

    let mut resp = Redirect::to(logout_target(next.as_deref())).into_response();
    append_cookies(&mut resp, &backend_cookies);

    let name = &state.config.session_cookie;
    let prefix = format!("{name}=");
    if !backend_cookies.iter().any(|c| c.starts_with(&prefix)) {
        let expired = HeaderValue::from_str(&format!(
            "{name}=; Max-Age=0; Path=/; HttpOnly; SameSite=Lax"
        ))
        .map_err(|e| AppError::Internal(format!("invalid session cookie name: {e}")))?;
        resp.headers_mut().append(SET_COOKIE, expired);
    }

    Ok(resp)
}

/// Only the two in-site destinations are honored.
fn logout_target(next: Option<&str>) -> &'static str {
    match next {
        Some("/login") => "/login",
        _ => "/",
    }
}
