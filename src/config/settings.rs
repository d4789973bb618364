use anyhow::{Context, Result};
use reqwest::header::HeaderValue;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::net::IpAddr;
use std::path::Path;
use url::Url;
use validator::Validate;

use crate::error::RelayError;
use crate::github::DispatchTarget;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

#[derive(Debug, Clone, Validate)]
pub struct Settings {
    #[validate]
    pub server: ServerSettings,
    #[validate]
    pub github: GitHubSettings,
}

#[derive(Debug, Clone, Validate)]
pub struct ServerSettings {
    #[validate(custom = "validate_ip_addr")]
    pub bind_address: String,
    pub port: u16,
}

#[derive(Debug, Clone, Validate)]
pub struct GitHubSettings {
    pub token: Option<Secret<String>>,
    pub owner: Option<String>,
    /// Repository name, or `owner/repo` when no owner is configured separately.
    pub repo: Option<String>,
    #[validate(custom = "validate_url")]
    pub api_url: String,
    /// Upper bound on a single dispatch request
    #[validate(range(min = 1, max = 300))]
    pub timeout_seconds: u64,
}

/// Flat view of the process environment, as `envy` sees it.
#[derive(Debug, Deserialize)]
struct EnvSettings {
    github_token: Option<Secret<String>>,
    github_owner: Option<String>,
    github_repo: Option<String>,
    #[serde(default = "default_api_url")]
    github_api_url: String,
    #[serde(default = "default_timeout_seconds")]
    dispatch_timeout_seconds: u64,
    #[serde(default = "default_bind_address")]
    bind_address: String,
    #[serde(default = "default_port")]
    port: u16,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Settings {
    /// Load configuration from the process environment.
    ///
    /// A `.env` file in the working directory is honoured if present.
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_env()
    }

    /// Load configuration, reading variables from the given env file first.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        dotenv::from_path(path)
            .with_context(|| format!("Failed to read env file {}", path.display()))?;
        Self::from_env()
    }

    fn from_env() -> Result<Self> {
        let env = envy::from_env::<EnvSettings>()
            .context("Failed to parse configuration from environment variables")?;
        Self::build(env)
    }

    /// Load configuration from explicit key/value pairs instead of the
    /// process environment. Keys use the environment variable names.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars = vars.into_iter().map(|(k, v)| (k.into(), v.into()));
        let env = envy::from_iter::<_, EnvSettings>(vars)
            .context("Failed to parse configuration")?;
        Self::build(env)
    }

    fn build(env: EnvSettings) -> Result<Self> {
        let settings = Settings {
            server: ServerSettings {
                bind_address: env.bind_address,
                port: env.port,
            },
            github: GitHubSettings {
                token: env
                    .github_token
                    .filter(|token| !token.expose_secret().trim().is_empty()),
                owner: non_empty(env.github_owner),
                repo: non_empty(env.github_repo),
                api_url: env.github_api_url,
                timeout_seconds: env.dispatch_timeout_seconds,
            },
        };

        settings
            .validate_all()
            .context("Configuration validation failed")?;

        Ok(settings)
    }

    pub fn validate_all(&self) -> Result<(), validator::ValidationErrors> {
        self.validate()?;
        self.server.validate()?;
        self.github.validate()?;
        Ok(())
    }
}

impl ServerSettings {
    pub fn address(&self) -> String {
        match self.bind_address.parse::<IpAddr>() {
            Ok(IpAddr::V6(_)) => format!("[{}]:{}", self.bind_address, self.port),
            _ => format!("{}:{}", self.bind_address, self.port),
        }
    }
}

impl GitHubSettings {
    /// Environment variables that must be set before a dispatch can be sent.
    pub fn missing_vars(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.token.is_none() {
            missing.push("GITHUB_TOKEN");
        }
        match (&self.owner, &self.repo) {
            (_, None) => missing.push("GITHUB_REPO"),
            (None, Some(repo)) if !repo.contains('/') => missing.push("GITHUB_OWNER"),
            _ => {}
        }
        missing
    }

    /// Resolve where dispatch events go.
    ///
    /// A `GITHUB_REPO` of the form `owner/repo` takes precedence over
    /// `GITHUB_OWNER`.
    pub fn target(&self) -> Result<DispatchTarget, RelayError> {
        let missing = self.missing_vars();
        let (Some(token), Some(repo), true) = (&self.token, &self.repo, missing.is_empty()) else {
            return Err(RelayError::Config(format!(
                "Missing required configuration: {}",
                missing.join(", ")
            )));
        };

        let (owner, name) = match (repo.split_once('/'), &self.owner) {
            (Some((owner, name)), _) => (owner, name),
            (None, Some(owner)) => (owner.as_str(), repo.as_str()),
            (None, None) => {
                return Err(RelayError::Config(
                    "Missing required configuration: GITHUB_OWNER".to_string(),
                ))
            }
        };

        if owner.is_empty() || owner.contains('/') || name.is_empty() || name.contains('/') {
            return Err(RelayError::Config(format!(
                "GITHUB_OWNER/GITHUB_REPO must name a single repository, got '{}/{}'",
                owner, name
            )));
        }

        if HeaderValue::from_str(&format!("token {}", token.expose_secret())).is_err() {
            return Err(RelayError::Config(
                "GITHUB_TOKEN is not a valid header value".to_string(),
            ));
        }

        Ok(DispatchTarget {
            owner: owner.to_string(),
            repo: name.to_string(),
            token: token.clone(),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn validate_ip_addr(addr: &str) -> Result<(), validator::ValidationError> {
    addr.parse::<IpAddr>()
        .map(|_| ())
        .map_err(|_| validator::ValidationError::new("invalid_ip_address"))
}

fn validate_url(url: &str) -> Result<(), validator::ValidationError> {
    Url::parse(url)
        .map(|_| ())
        .map_err(|_| validator::ValidationError::new("invalid_url"))
}
