//! Task resource.
//!
//! # Data Flow
//! ```text
//! RouteRequest (params, query, body)
//!     → handlers.rs (validate, look up, mutate)
//!     → TaskStore ("tasks" table, snapshot persisted)
//!     → Response (JSON, plain text or empty)
//! ```

pub mod handlers;
pub mod routes;
pub mod types;

pub use routes::{task_routes, TaskHandler};
pub use types::{Task, TaskPayload};

use crate::store::Database;

/// Name of the table holding task records.
pub const TASKS_TABLE: &str = "tasks";

/// Record store specialised to tasks.
pub type TaskStore = Database<Task>;
