use serde::{Deserialize, Serialize};

use super::image::ImageReference;

/// `event_type` the target workflow listens for.
pub const IMAGE_PUSHED_EVENT: &str = "docker-image-pushed";

/// Body of a `POST /repos/{owner}/{repo}/dispatches` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchEvent {
    pub event_type: String,
    pub client_payload: ClientPayload,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientPayload {
    pub image: String,
}

impl DispatchEvent {
    pub fn image_pushed(image: &ImageReference) -> Self {
        Self {
            event_type: IMAGE_PUSHED_EVENT.to_string(),
            client_payload: ClientPayload {
                image: image.to_string(),
            },
        }
    }
}
