use anyhow::{Context, Result};
use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use serde_json::Value;
use std::sync::Arc;

use crate::config::Config;
use crate::error::{ParseError, kind_of};
use crate::models::Repository;

/// Where an analyze cycle gets its data from.
pub trait ProfileSource {
    /// Public repositories of `username`, in the order the API returns them.
    async fn fetch_repos(&self, username: &str) -> Result<Vec<Repository>>;

    /// Raw public event stream of `username`.
    async fn fetch_events(&self, username: &str) -> Result<Value>;
}

#[derive(Clone)]
pub struct GithubClient {
    api_base: Arc<String>,
    http: Arc<Client>,
}

impl GithubClient {
    /// Create an unauthenticated REST client for the configured API root.
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("gh-analyzer"));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            api_base: Arc::new(config.api_url.trim_end_matches('/').to_string()),
            http: Arc::new(builder.build().context("Failed to build HTTP client")?),
        })
    }

    /// Single GET returning the body as untyped JSON.
    ///
    /// Non-2xx statuses are not errors here: GitHub answers with a JSON error
    /// object, which then fails shape validation downstream.
    async fn get_json(&self, path: &str) -> Result<Value> {
        let url = format!("{}{path}", self.api_base);
        tracing::debug!(%url, "GET");

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("Network error requesting {url}: {e}"))?;

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "GitHub API returned non-success status");
        }

        resp.json()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to parse JSON from {url}: {e}"))
    }
}

impl ProfileSource for GithubClient {
    async fn fetch_repos(&self, username: &str) -> Result<Vec<Repository>> {
        let json = self.get_json(&format!("/users/{username}/repos")).await?;
        let repos = parse_repos(json).context("Unexpected repository list response")?;
        tracing::debug!(username, count = repos.len(), "fetched repositories");
        Ok(repos)
    }

    async fn fetch_events(&self, username: &str) -> Result<Value> {
        self.get_json(&format!("/users/{username}/events/public"))
            .await
    }
}

/// Validate an untyped repository list body.
pub fn parse_repos(json: Value) -> Result<Vec<Repository>, ParseError> {
    if !json.is_array() {
        return Err(ParseError::NotAnArray {
            what: "repositories",
            found: kind_of(&json),
        });
    }
    serde_json::from_value(json).map_err(ParseError::Repository)
}
