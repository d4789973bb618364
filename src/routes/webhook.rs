use axum::{routing::post, Router};

use crate::{handlers, AppState};

pub fn webhook_router() -> Router<AppState> {
    Router::new().route("/webhook", post(handlers::webhook::receive))
}
