//! The task route table.

use axum::http::Method;
use axum::response::Response;

use crate::http::request::RouteRequest;
use crate::routing::{PatternError, RouteTable};
use crate::store::StoreResult;
use crate::tasks::handlers::{
    complete_task, create_task, delete_task, get_task, list_tasks, update_task,
};
use crate::tasks::TaskStore;

/// Signature shared by all task handlers.
pub type TaskHandler = fn(RouteRequest, &mut TaskStore) -> StoreResult<Response>;

/// Build the ordered route table served by the HTTP server.
pub fn task_routes() -> Result<RouteTable<TaskHandler>, PatternError> {
    RouteTable::new()
        .route(Method::GET, "/tasks", list_tasks as TaskHandler)?
        .route(Method::GET, "/tasks/:id", get_task)?
        .route(Method::POST, "/tasks", create_task)?
        .route(Method::PUT, "/tasks/:id", update_task)?
        .route(Method::PATCH, "/tasks/:id/complete", complete_task)?
        .route(Method::DELETE, "/tasks/:id", delete_task)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_table_shape() {
        let routes = task_routes().unwrap();
        let entries: Vec<_> = routes
            .iter()
            .map(|r| (r.method().clone(), r.pattern().as_str().to_string()))
            .collect();

        assert_eq!(
            entries,
            vec![
                (Method::GET, "/tasks".to_string()),
                (Method::GET, "/tasks/:id".to_string()),
                (Method::POST, "/tasks".to_string()),
                (Method::PUT, "/tasks/:id".to_string()),
                (Method::PATCH, "/tasks/:id/complete".to_string()),
                (Method::DELETE, "/tasks/:id".to_string()),
            ]
        );
    }

    #[test]
    fn test_dispatch_lookup() {
        let routes = task_routes().unwrap();

        let m = routes.find(&Method::PATCH, "/tasks/abc/complete").unwrap();
        assert_eq!(m.params.get("id"), Some("abc"));

        assert!(routes.find(&Method::PATCH, "/tasks/abc").is_none());
        assert!(routes.find(&Method::POST, "/tasks/abc").is_none());
        assert!(routes.find(&Method::GET, "/").is_none());
    }
}
