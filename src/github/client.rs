use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderValue, ACCEPT, AUTHORIZATION};
use secrecy::ExposeSecret;
use std::time::Duration;

use super::{DispatchClient, DispatchRequest, UpstreamResponse, GITHUB_ACCEPT};
use crate::config::GitHubSettings;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// [`DispatchClient`] backed by the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
}

impl GitHubClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { http })
    }

    pub fn from_settings(settings: &GitHubSettings) -> Result<Self> {
        Self::new(Duration::from_secs(settings.timeout_seconds))
    }
}

#[async_trait]
impl DispatchClient for GitHubClient {
    async fn send(&self, request: &DispatchRequest) -> Result<UpstreamResponse> {
        let mut authorization =
            HeaderValue::from_str(&format!("token {}", request.token.expose_secret()))
                .context("GITHUB_TOKEN is not a valid header value")?;
        authorization.set_sensitive(true);

        let response = self
            .http
            .post(&request.url)
            .header(AUTHORIZATION, authorization)
            .header(ACCEPT, GITHUB_ACCEPT)
            .json(&request.event)
            .send()
            .await
            .with_context(|| format!("POST {} failed", request.url))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .context("Failed to read GitHub API response body")?;

        Ok(UpstreamResponse { status, body })
    }
}
