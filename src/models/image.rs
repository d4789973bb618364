use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::RelayError;

/// A pushed container image, `owner/name:tag`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageReference {
    /// `owner/name`
    pub repository: String,
    pub tag: String,
}

impl ImageReference {
    /// Build a reference from the pieces of a registry notification.
    ///
    /// A `repo_name` that already contains `/` is used verbatim and
    /// `namespace` is ignored. Otherwise the name is qualified as
    /// `namespace/repo_name`.
    pub fn compose(
        repo_name: &str,
        namespace: Option<&str>,
        tag: &str,
    ) -> Result<Self, RelayError> {
        check_component("repository.repo_name", repo_name)?;
        check_component("push_data.tag", tag)?;

        let repository = if repo_name.contains('/') {
            repo_name.to_string()
        } else {
            let namespace = namespace.unwrap_or_default();
            if namespace.is_empty() {
                return Err(RelayError::InvalidPayload(format!(
                    "repository.namespace is required when repo_name '{}' is not qualified",
                    repo_name
                )));
            }
            check_component("repository.namespace", namespace)?;
            format!("{}/{}", namespace, repo_name)
        };

        Ok(Self {
            repository,
            tag: tag.to_string(),
        })
    }
}

impl fmt::Display for ImageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.repository, self.tag)
    }
}

fn check_component(field: &str, value: &str) -> Result<(), RelayError> {
    if value.is_empty() {
        return Err(RelayError::InvalidPayload(format!("{} must not be empty", field)));
    }
    if value.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(RelayError::InvalidPayload(format!(
            "{} contains whitespace or control characters",
            field
        )));
    }
    Ok(())
}
