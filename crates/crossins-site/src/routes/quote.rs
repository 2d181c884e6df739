//! Quote form submission at `POST /quote`.

use std::sync::Arc;

use axum::Router;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::HeaderMap;
use axum::response::Html;
use axum::routing::post;
use tower_http::limit::RequestBodyLimitLayer;
use tracing::{info, warn};

use crossins_client::Attachment;

use crate::error::AppError;
use crate::forms::{QuoteFields, QuoteForm};
use crate::routes::landing::{mounted_session, render};
use crate::state::AppState;

/// Build the quote router. Bodies above `max_upload_bytes` are rejected.
pub fn router(max_upload_bytes: usize) -> Router<Arc<AppState>> {
    Router::new()
        .route("/quote", post(submit_quote))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_upload_bytes))
}

/// Parse the form, forward it to the lead endpoint and re-render the landing
/// page with the result.
async fn submit_quote(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Html<String>, AppError> {
    let (fields, attachment) = read_quote(multipart).await?;

    let mut form = QuoteForm::with_fields(fields);
    if form.begin() && form.validate() {
        match state.client.submit_quote(form.submission(attachment)).await {
            Ok(()) => {
                info!(insurance_type = %form.fields.insurance_type, "quote request forwarded");
                form.succeed();
            }
            Err(e) => {
                warn!(error = %e, status = ?e.status_code(), "quote request failed");
                form.fail();
            }
        }
    }

    let session = mounted_session(&state, &headers).await;
    Ok(Html(render(&state, &session.borrow(), &form)))
}

async fn read_quote(
    mut multipart: Multipart,
) -> Result<(QuoteFields, Option<Attachment>), AppError> {
    let mut fields = QuoteFields::default();
    let mut attachment = None;

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(ToOwned::to_owned) else {
            continue;
        };
        if name == "attachment" {
            let file_name = field.file_name().unwrap_or_default().to_owned();
            let content_type = field.content_type().map(ToOwned::to_owned);
            let bytes = field.bytes().await?;
            // An untouched file input still sends an empty part.
            if !file_name.is_empty() && !bytes.is_empty() {
                attachment = Some(Attachment {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
        } else {
            fields.set(&name, field.text().await?);
        }
    }

    Ok((fields, attachment))
}
