use axum::{routing::get, Router};

use crate::{handlers, AppState};

pub fn health_router() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::check))
}
