//! Request handling.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) and echo it on the response
//! - Carry the parsed pieces a route handler needs (params, query, body)
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Body is buffered once by the dispatcher; handlers see bytes
//! - Decoding failures read as "absent", handlers decide the response

use axum::body::Bytes;
use axum::extract::Query;
use axum::http::{HeaderName, Uri};
use serde::de::DeserializeOwned;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

use crate::routing::PathParams;

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Layer assigning a UUID v4 request ID when the client sent none.
pub fn set_request_id_layer() -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::new(HeaderName::from_static(X_REQUEST_ID), MakeRequestUuid)
}

/// Layer copying the request ID onto the response.
pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::new(HeaderName::from_static(X_REQUEST_ID))
}

/// A request after route matching.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub params: PathParams,
    pub uri: Uri,
    pub body: Bytes,
}

impl RouteRequest {
    pub fn new(params: PathParams, uri: Uri, body: Bytes) -> Self {
        Self { params, uri, body }
    }

    /// A captured path parameter.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }

    /// Decode the query string, `None` if it does not fit `T`.
    pub fn query<T: DeserializeOwned>(&self) -> Option<T> {
        Query::<T>::try_from_uri(&self.uri).ok().map(|Query(q)| q)
    }

    /// Decode the body as JSON, `None` if empty or malformed.
    pub fn json<T: DeserializeOwned>(&self) -> Option<T> {
        if self.body.is_empty() {
            return None;
        }
        serde_json::from_slice(&self.body).ok()
    }
}
