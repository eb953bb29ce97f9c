//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store (method, pattern, handler) entries in registration order
//! - Look up the first entry matching a request method and path
//! - Return the matched route with its captured parameters, or no-match
//!
//! # Design Decisions
//! - Immutable after construction (shared via `Arc` without locks)
//! - O(n) scan in registration order; first match wins
//! - Explicit `None` rather than a silent default route

use axum::http::Method;

use crate::routing::matcher::{PathParams, PathPattern, PatternError};

/// A single route table entry.
#[derive(Debug, Clone)]
pub struct Route<H> {
    method: Method,
    pattern: PathPattern,
    handler: H,
}

impl<H> Route<H> {
    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }
}

/// Result of a successful lookup.
#[derive(Debug)]
pub struct RouteMatch<'a, H> {
    pub route: &'a Route<H>,
    pub params: PathParams,
}

/// Ordered list of routes.
#[derive(Debug, Clone)]
pub struct RouteTable<H> {
    routes: Vec<Route<H>>,
}

impl<H> Default for RouteTable<H> {
    fn default() -> Self {
        Self { routes: Vec::new() }
    }
}

impl<H> RouteTable<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a route. Fails only if the pattern does not compile.
    pub fn route(mut self, method: Method, pattern: &str, handler: H) -> Result<Self, PatternError> {
        let pattern = PathPattern::parse(pattern)?;
        self.routes.push(Route {
            method,
            pattern,
            handler,
        });
        Ok(self)
    }

    /// Find the first route whose method and pattern both match.
    pub fn find(&self, method: &Method, path: &str) -> Option<RouteMatch<'_, H>> {
        self.routes
            .iter()
            .filter(|route| route.method == *method)
            .find_map(|route| {
                route
                    .pattern
                    .match_path(path)
                    .map(|params| RouteMatch { route, params })
            })
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Route<H>> {
        self.routes.iter()
    }
}
