//! HTTP error types for the site.
//!
//! Backend failures never reach this type: every handler turns them into a
//! message on the page it renders. What is left are malformed requests and
//! broken server state, rendered as a small HTML page.

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::views;

/// Application-level error returned from HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Client sent invalid input.
    #[error("bad request: {0}")]
    BadRequest(String),
    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, title, message) = match &self {
            Self::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                "Solicitud inválida",
                msg.as_str(),
            ),
            Self::Internal(msg) => {
                tracing::error!(error = %msg, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error interno",
                    "Ocurrió un error inesperado. Intenta nuevamente más tarde.",
                )
            }
        };

        (status, Html(views::error_page(title, message))).into_response()
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::BadRequest("El archivo adjunto es demasiado grande.".to_owned())
        } else {
            Self::BadRequest(err.body_text())
        }
    }
}
