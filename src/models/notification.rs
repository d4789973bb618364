use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::image::ImageReference;
use crate::error::RelayError;

/// Push notification as sent by the Docker Hub webhook.
///
/// Only the fields needed to name the image are modelled; the rest of the
/// payload is ignored.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PushNotification {
    pub repository: RepositoryInfo,
    pub push_data: PushData,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RepositoryInfo {
    /// `name` or `owner/name`
    pub repo_name: String,
    /// Owner used to qualify an unqualified `repo_name`
    pub namespace: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PushData {
    /// Tag that was pushed
    pub tag: String,
    /// Account that pushed the image
    pub pusher: Option<String>,
}

impl PushNotification {
    pub fn image_reference(&self) -> Result<ImageReference, RelayError> {
        ImageReference::compose(
            &self.repository.repo_name,
            self.repository.namespace.as_deref(),
            &self.push_data.tag,
        )
    }
}
