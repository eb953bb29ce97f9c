//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → router.rs (ordered route lookup)
//!     → matcher.rs (compare segments, capture `:params`)
//!     → Return: matched Route + PathParams, or NoMatch
//!
//! Route Compilation (at startup):
//!     (method, "/tasks/:id", handler)[]
//!     → Compile patterns into segments
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex (segment comparison only)
//! - Deterministic: same input always matches same route
//! - First match wins (registration order)

pub mod matcher;
pub mod router;

pub use matcher::{PathParams, PathPattern, PatternError};
pub use router::{Route, RouteMatch, RouteTable};
