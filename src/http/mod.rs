//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, catch-all dispatcher)
//!     → request.rs (request ID, RouteRequest: params, query, body)
//!     → routing (method + path pattern → task handler)
//!     → response.rs (JSON / plain text / empty bodies)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{RouteRequest, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
