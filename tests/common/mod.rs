use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use graphlex_backend::{routes::build_router, state::AppState};
use http_body_util::BodyExt;
use serde::de::DeserializeOwned;
use tower::ServiceExt;

/// Router over the built-in catalog, plus the state behind it.
pub fn test_app() -> (Router, Arc<AppState>) {
    test_app_with(AppState::default())
}

pub fn test_app_with(state: AppState) -> (Router, Arc<AppState>) {
    let state = Arc::new(state);
    (build_router(state.clone()), state)
}

/// Helper to make requests to the test app
pub struct TestClient {
    router: Router,
}

impl TestClient {
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    pub async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read response body")
            .to_bytes()
            .to_vec();

        TestResponse { status, body }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send("GET", uri, Body::empty(), false).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send("DELETE", uri, Body::empty(), false).await
    }

    pub async fn post_json(&self, uri: &str, body: serde_json::Value) -> TestResponse {
        self.send("POST", uri, Body::from(body.to_string()), true).await
    }

    async fn send(&self, method: &str, uri: &str, body: Body, json: bool) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if json {
            builder = builder.header("content-type", "application/json");
        }
        let request = builder.body(body).expect("Failed to build request");
        self.request(request).await
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn assert_status(&self, expected: StatusCode) {
        assert_eq!(
            self.status,
            expected,
            "Unexpected status; body: {}",
            String::from_utf8_lossy(&self.body)
        );
    }

    pub fn json<T: DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse response JSON")
    }
}
