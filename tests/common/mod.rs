//! Shared utilities for integration tests.

#![allow(dead_code)]

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use std::net::SocketAddr;
use std::path::PathBuf;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tower::ServiceExt;

use task_service::{HttpServer, ServiceConfig, Shutdown, TaskStore};

/// An in-process app backed by a store file in its own temp directory.
pub struct TestApp {
    pub dir: TempDir,
    pub db_path: PathBuf,
    pub router: Router,
}

/// Raw response pieces.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is not JSON")
    }

    pub fn text(&self) -> &str {
        std::str::from_utf8(&self.body).expect("response body is not UTF-8")
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    }
}

pub fn test_config(db_path: &std::path::Path) -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.storage.path = db_path.to_string_lossy().into_owned();
    config
}

/// Build an app over a fresh store in `subdir` of a new temp directory.
pub fn test_app_in(subdir: &str) -> TestApp {
    build_app(subdir, |_| {})
}

/// Build an app whose config is adjusted before the server is created.
pub fn test_app_with(configure: impl FnOnce(&mut ServiceConfig)) -> TestApp {
    build_app("data", configure)
}

fn build_app(subdir: &str, configure: impl FnOnce(&mut ServiceConfig)) -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().join(subdir);
    std::fs::create_dir_all(&data_dir).unwrap();
    let db_path = data_dir.join("db.json");

    let mut config = test_config(&db_path);
    configure(&mut config);

    let store = TaskStore::open(&db_path).unwrap();
    let server = HttpServer::new(config, store).unwrap();

    TestApp {
        dir,
        db_path,
        router: server.router(),
    }
}

pub fn test_app() -> TestApp {
    test_app_in("data")
}

impl TestApp {
    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(value) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(value.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        self.send_request(request).await
    }

    pub async fn send_raw(&self, method: Method, uri: &str, body: &'static str) -> TestResponse {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::from(body))
            .unwrap();
        self.send_request(request).await
    }

    async fn send_request(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Create a task and return it as listed by `GET /tasks`.
    pub async fn create(&self, title: &str, description: &str) -> Value {
        let res = self
            .send(
                Method::POST,
                "/tasks",
                Some(serde_json::json!({ "title": title, "description": description })),
            )
            .await;
        assert_eq!(res.status, StatusCode::CREATED);

        let list = self.send(Method::GET, "/tasks", None).await.json();
        list.as_array().unwrap().last().unwrap().clone()
    }
}

/// Serve a fresh app over TCP on an ephemeral port.
pub async fn start_server(dir: &TempDir) -> (SocketAddr, Shutdown) {
    let db_path = dir.path().join("db.json");
    let store = TaskStore::open(&db_path).unwrap();
    let server = HttpServer::new(test_config(&db_path), store).unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}
