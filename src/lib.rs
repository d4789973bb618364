use axum::{response::IntoResponse, response::Response, Router};
use std::any::Any;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod error;
pub mod github;
pub mod handlers;
pub mod models;
pub mod openapi;
pub mod routes;

use error::RelayError;
use github::DispatchClient;

#[derive(Clone)]
pub struct AppState {
    pub config: config::Settings,
    pub dispatcher: Arc<dyn DispatchClient>,
}

/// Create the main Axum application router
pub fn create_app(state: AppState) -> Router {
    let openapi = openapi::ApiDoc::openapi();

    Router::new()
        .merge(routes::webhook::webhook_router())
        .merge(routes::health::health_router())
        // Serve Swagger UI
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

/// Turn a panicking handler into the same JSON error body as any other fault.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };

    tracing::error!("Unexpected fault while handling request: {}", detail);
    RelayError::Internal(detail).into_response()
}
