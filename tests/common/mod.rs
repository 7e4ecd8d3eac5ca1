#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use asset_store::config::AppConfig;
use asset_store::routes::routes;
use asset_store::services::asset_service::AssetService;
use asset_store::services::asset_store::JsonFileStore;
use axum::Router;
use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request, Response};
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

/// A router backed by a JSON file inside a fresh temp directory.
///
/// The directory lives as long as the harness, so tests can inspect the
/// backing file between requests.
pub struct TestApp {
    pub dir: TempDir,
    pub data_file: PathBuf,
    pub router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_data_path("assets.json")
    }

    /// Back the router with `relative` inside the temp directory. The path
    /// is used as given; nothing is created along it.
    pub fn with_data_path(relative: &str) -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let data_file = dir.path().join(relative);
        let static_dir = dir.path().join("static");
        std::fs::create_dir_all(&static_dir).expect("create static dir");
        std::fs::write(
            static_dir.join("index.html"),
            "<!doctype html><title>Assets</title>",
        )
        .expect("write index.html");

        let cfg = AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            data_file: data_file.clone(),
            static_dir,
            cors: true,
        };
        let service = AssetService::new(Arc::new(JsonFileStore::new(data_file.clone())));
        let router = routes::app(service, &cfg);

        Self {
            dir,
            data_file,
            router,
        }
    }

    /// Same as [`TestApp::new`] but with the backing file pre-populated.
    pub fn with_data(contents: &str) -> Self {
        let app = Self::new();
        std::fs::write(&app.data_file, contents).expect("seed data file");
        app
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send(empty_request(Method::GET, uri)).await
    }

    pub async fn delete(&self, uri: &str) -> Response<Body> {
        self.send(empty_request(Method::DELETE, uri)).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> Response<Body> {
        self.send(json_request(Method::POST, uri, &body)).await
    }

    pub async fn put_json(&self, uri: &str, body: Value) -> Response<Body> {
        self.send(json_request(Method::PUT, uri, &body)).await
    }

    /// Names of the entries directly inside the temp directory.
    pub fn dir_entries(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.dir.path())
            .expect("read temp dir")
            .map(|e| e.expect("dir entry").file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// Parsed contents of the backing file.
    pub fn persisted(&self) -> Value {
        let text = std::fs::read_to_string(&self.data_file).expect("read data file");
        serde_json::from_str(&text).expect("data file is JSON")
    }
}

pub fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(method: Method, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body is JSON")
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("body is UTF-8")
}
