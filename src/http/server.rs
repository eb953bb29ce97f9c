//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with a catch-all dispatch handler
//! - Wire up middleware (tracing, timeout, request ID)
//! - Dispatch requests through the task route table
//! - Serialize handler execution around the record store
//! - Observability (metrics, correlation IDs)

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ServiceConfig;
use crate::http::request::{
    propagate_request_id_layer, set_request_id_layer, RouteRequest, X_REQUEST_ID,
};
use crate::observability::metrics;
use crate::routing::{PatternError, RouteTable};
use crate::tasks::{task_routes, TaskHandler, TaskStore};

/// Application state injected into the dispatcher.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteTable<TaskHandler>>,
    pub store: Arc<Mutex<TaskStore>>,
    pub max_body_size: usize,
}

/// HTTP server for the task service.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a new HTTP server owning `store`.
    pub fn new(config: ServiceConfig, store: TaskStore) -> Result<Self, PatternError> {
        let state = AppState {
            routes: Arc::new(task_routes()?),
            store: Arc::new(Mutex::new(store)),
            max_body_size: config.security.max_body_size,
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(dispatch_handler))
            .route("/", any(dispatch_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id_layer())
    }

    /// The fully layered router, e.g. for in-process requests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}

/// Dispatcher: matches the route table and runs the handler.
async fn dispatch_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let method = request.method().clone();
    let method_str = method.to_string();
    let path = request.uri().path().to_string();

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        "Dispatching request"
    );

    let Some(matched) = state.routes.find(&method, &path) else {
        tracing::warn!(request_id = %request_id, method = %method, path = %path, "No route matched");
        metrics::record_request(&method_str, 404, "none", start_time);
        return (StatusCode::NOT_FOUND, "No matching route found").into_response();
    };
    let route = matched.route.pattern().as_str();

    let (parts, body) = request.into_parts();
    let body = match axum::body::to_bytes(body, state.max_body_size).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(request_id = %request_id, error = %e, "Request body rejected");
            metrics::record_request(&method_str, 413, route, start_time);
            return (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large").into_response();
        }
    };

    let handler = *matched.route.handler();
    let route_request = RouteRequest::new(matched.params, parts.uri, body);

    let result = {
        let mut store = state.store.lock().unwrap_or_else(PoisonError::into_inner);
        handler(route_request, &mut store)
    };

    let response = match result {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(request_id = %request_id, route = %route, error = %e, "Failed to persist task store");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to persist task store").into_response()
        }
    };

    tracing::debug!(
        request_id = %request_id,
        status = response.status().as_u16(),
        route = %route,
        "Request completed"
    );
    metrics::record_request(&method_str, response.status().as_u16(), route, start_time);
    response
}
