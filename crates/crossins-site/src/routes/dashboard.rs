//! Staff dashboard at `/dashboard`.

use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use tracing::debug;

use crossins_client::fetcher::{GuardMessages, GuardedFetcher, LoadOutcome};

use crate::routes::credentials;
use crate::state::AppState;
use crate::views::dashboard;

pub const LOGIN_REQUIRED: &str =
    "Necesitas iniciar sesión con una cuenta de staff para ver el dashboard.";
pub const LOAD_FAILED: &str = "No se pudo cargar el dashboard";
/// Where a login-required load sends the browser.
pub const STAFF_LOGIN_PATH: &str = "/login?reason=staff_required";

/// Build the dashboard router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/dashboard", get(dashboard_page))
}

fn messages() -> GuardMessages {
    GuardMessages {
        login_required: LOGIN_REQUIRED.to_owned(),
        load_failed: LOAD_FAILED.to_owned(),
    }
}

async fn dashboard_page(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let mount = state.mount();
    let creds = credentials(&headers);

    let mut fetcher = GuardedFetcher::new(messages(), STAFF_LOGIN_PATH);
    let outcome = fetcher
        .load(mount.token(), state.client.dashboard_snapshot(&creds))
        .await;
    let view = fetcher.into_state();

    match outcome {
        LoadOutcome::Loaded => Html(dashboard::render(&view, state.config.locale)).into_response(),
        LoadOutcome::LoginRequired => {
            Redirect::to(view.redirect.as_deref().unwrap_or(STAFF_LOGIN_PATH)).into_response()
        }
        LoadOutcome::Failed => (
            StatusCode::BAD_GATEWAY,
            Html(dashboard::render(&view, state.config.locale)),
        )
            .into_response(),
        LoadOutcome::Cancelled | LoadOutcome::AlreadyLoaded => {
            debug!("dashboard render abandoned");
            StatusCode::SERVICE_UNAVAILABLE.into_response()
        }
    }
}
