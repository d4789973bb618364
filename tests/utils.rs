#![allow(dead_code)]

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, Response, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

use dispatch_relay::config::Settings;
use dispatch_relay::github::{DispatchClient, DispatchRequest, UpstreamResponse};
use dispatch_relay::{create_app, AppState};

#[derive(Clone)]
pub enum Outcome {
    Respond(u16, String),
    Fail(String),
    Panic,
}

/// Records every dispatch instead of sending it.
#[derive(Clone)]
pub struct MockDispatchClient {
    outcome: Outcome,
    calls: Arc<Mutex<Vec<DispatchRequest>>>,
}

impl MockDispatchClient {
    pub fn new(outcome: Outcome) -> Self {
        Self {
            outcome,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn accepting() -> Self {
        Self::new(Outcome::Respond(204, String::new()))
    }

    pub fn calls(&self) -> Vec<DispatchRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl DispatchClient for MockDispatchClient {
    async fn send(&self, request: &DispatchRequest) -> Result<UpstreamResponse> {
        self.calls.lock().unwrap().push(request.clone());

        match &self.outcome {
            Outcome::Respond(status, body) => Ok(UpstreamResponse {
                status: *status,
                body: body.clone(),
            }),
            Outcome::Fail(message) => Err(anyhow!(message.clone())),
            Outcome::Panic => panic!("dispatcher exploded"),
        }
    }
}

pub fn test_settings() -> Settings {
    Settings::from_vars([
        ("GITHUB_TOKEN", "ghp_test"),
        ("GITHUB_OWNER", "alice"),
        ("GITHUB_REPO", "deployments"),
    ])
    .expect("test settings")
}

pub fn test_app(settings: Settings, client: MockDispatchClient) -> Router {
    create_app(AppState {
        config: settings,
        dispatcher: Arc::new(client),
    })
}

pub async fn post_webhook(app: Router, body: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri("/webhook")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn read_json(response: Response<Body>) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}
