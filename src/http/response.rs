//! Response construction.
//!
//! # Responsibilities
//! - Build JSON, plain-text and empty responses with a status
//! - Provide the `{ "message": ... }` error envelope
//!
//! # Design Decisions
//! - JSON bodies always carry `content-type: application/json`
//! - Plain-text bodies carry `text/plain; charset=utf-8`

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// JSON error envelope.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorMessage {
    pub message: &'static str,
}

pub fn json<T: Serialize>(status: StatusCode, body: &T) -> Response {
    (status, Json(body)).into_response()
}

pub fn text(status: StatusCode, body: &'static str) -> Response {
    (status, body).into_response()
}

pub fn empty(status: StatusCode) -> Response {
    status.into_response()
}

pub fn message(status: StatusCode, message: &'static str) -> Response {
    json(status, &ErrorMessage { message })
}
