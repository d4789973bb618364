use utoipa::OpenApi;

use crate::error::ErrorResponse;
use crate::handlers::{health, webhook};
use crate::models::{PushData, PushNotification, RepositoryInfo};

/// Generate the OpenAPI documentation for the entire API
#[derive(OpenApi)]
#[openapi(
    paths(
        health::check,
        webhook::receive,
    ),
    components(
        schemas(
            health::HealthResponse,
            PushNotification,
            RepositoryInfo,
            PushData,
            webhook::WebhookResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "webhook", description = "Registry push notifications"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documents_every_route() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/health"));
        assert!(doc.paths.paths.contains_key("/webhook"));
    }
}
