use anyhow::Result;
use async_trait::async_trait;
use secrecy::Secret;

use crate::models::DispatchEvent;

pub mod client;

pub use client::GitHubClient;

/// Media type GitHub expects on REST v3 requests.
pub const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

/// Repository that receives `repository_dispatch` events, with the token
/// allowed to trigger them.
#[derive(Debug, Clone)]
pub struct DispatchTarget {
    pub owner: String,
    pub repo: String,
    pub token: Secret<String>,
}

impl DispatchTarget {
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    pub fn dispatches_url(&self, api_url: &str) -> String {
        format!(
            "{}/repos/{}/{}/dispatches",
            api_url.trim_end_matches('/'),
            self.owner,
            self.repo
        )
    }
}

/// A single outbound dispatch call.
#[derive(Debug, Clone)]
pub struct DispatchRequest {
    pub url: String,
    pub token: Secret<String>,
    pub event: DispatchEvent,
}

/// Status and raw body of whatever the API answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: String,
}

impl UpstreamResponse {
    /// GitHub acknowledges a dispatch with `204 No Content` and nothing else.
    pub fn is_accepted(&self) -> bool {
        self.status == 204
    }
}

/// Sends dispatch events. Implemented over HTTP by [`GitHubClient`]; tests
/// substitute their own.
#[async_trait]
pub trait DispatchClient: Send + Sync + 'static {
    /// POST the event and report the response.
    ///
    /// Returns `Err` only when no response was received at all.
    async fn send(&self, request: &DispatchRequest) -> Result<UpstreamResponse>;
}
