//! `GET /session`: the session query as JSON, for menus that refresh before
//! opening.

use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::routing::get;
use axum::{Json, Router};

use crossins_client::SessionInfo;

use crate::routes::landing::mounted_session;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/session", get(session_status))
}

async fn session_status(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Json<SessionInfo> {
    let session = mounted_session(&state, &headers).await;
    let value = session.borrow().clone();
    Json(value)
}
