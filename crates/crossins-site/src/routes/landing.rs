//! Landing page at `/`.

use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Html;
use axum::routing::get;
use tokio::sync::watch;

use crossins_client::SessionInfo;
use crossins_client::session::SessionShell;

use crate::forms::QuoteForm;
use crate::routes::{credentials, current_year, session_source};
use crate::state::AppState;
use crate::views::landing::{self, LandingPage};

/// Build the landing router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(landing_page))
}

async fn landing_page(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Html<String> {
    let session = mounted_session(&state, &headers).await;
    Html(render(&state, &session.borrow(), &QuoteForm::new()))
}

/// Mount a session shell for this render and hand out a subscription to it.
/// Every consumer of the page reads the session through this receiver; it
/// keeps the last value after the shell is dropped.
pub(crate) async fn mounted_session(
    state: &AppState,
    headers: &HeaderMap,
) -> watch::Receiver<SessionInfo> {
    let mount = state.mount();
    let shell = SessionShell::mount(session_source(state), credentials(headers), mount.token()).await;
    shell.subscribe()
}

pub(crate) fn render(state: &AppState, session: &SessionInfo, quote: &QuoteForm) -> String {
    landing::render(&LandingPage {
        session,
        contact: &state.config.contact,
        quote,
        year: current_year(),
    })
}
