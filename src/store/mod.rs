//! Record store subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     snapshot file (JSON)
//!     → database.rs (decode all tables)
//!     → in-memory tables, ordered by insertion
//!
//! Mutation (insert / update / delete):
//!     apply to in-memory table
//!     → rewrite whole snapshot file
//!     → on write failure: restore previous table, return error
//! ```
//!
//! # Design Decisions
//! - Full-snapshot persistence; last successful write wins
//! - Records are typed via the `Record` trait, addressed by table name
//! - No internal locking: the owner serializes access

pub mod database;
pub mod error;

pub use database::{Database, Filter, Record};
pub use error::{StoreError, StoreResult};
