//! Task Service Library
//!
//! A small HTTP CRUD service for task records, backed by a JSON snapshot
//! file rewritten on every mutation.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod store;
pub mod tasks;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use tasks::{Task, TaskStore};
