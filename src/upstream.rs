use crate::types::{Comment, Post};
use anyhow::{Context, Result, bail};
use reqwest::Client;
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use std::time::Duration;

const BASE_URL: &str = "https://jsonplaceholder.typicode.com";
const COMMENTS_PATH: &str = "comments";
const POSTS_PATH: &str = "posts";

/// Every upstream call is bounded by this timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ============================================================================
// Upstream trait
// ============================================================================

#[allow(async_fn_in_trait)]
pub trait Upstream: Send + Sync {
    /// Fetch the full comment collection.
    async fn fetch_comments(&self) -> Result<Vec<Comment>>;

    /// Fetch the full post collection.
    async fn fetch_posts(&self) -> Result<Vec<Post>>;

    /// Fetch a single post by id.
    async fn fetch_post(&self, id: u32) -> Result<Post>;
}

// ============================================================================
// JsonPlaceholderUpstream — JSONPlaceholder API implementation
// ============================================================================

pub struct JsonPlaceholderUpstream {
    client: Client,
    base_url: String,
}

impl JsonPlaceholderUpstream {
    pub fn new() -> Result<Self> {
        Self::with_base_url(BASE_URL.to_string())
    }

    pub fn with_base_url(base_url: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to build http client")?;

        Ok(Self { client, base_url })
    }

    async fn fetch_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}/{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .context("failed to perform http request")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("unexpected upstream status {status}: {body}");
        }

        response
            .json::<T>()
            .await
            .context("failed to decode upstream response")
    }
}

impl Upstream for JsonPlaceholderUpstream {
    async fn fetch_comments(&self) -> Result<Vec<Comment>> {
        self.fetch_json(COMMENTS_PATH)
            .await
            .context("failed to get comments from upstream")
    }

    async fn fetch_posts(&self) -> Result<Vec<Post>> {
        self.fetch_json(POSTS_PATH)
            .await
            .context("failed to get posts from upstream")
    }

    async fn fetch_post(&self, id: u32) -> Result<Post> {
        self.fetch_json(&format!("{}/{}", POSTS_PATH, id))
            .await
            .with_context(|| format!("failed to get post {} from upstream", id))
    }
}

// ============================================================================
// Test utilities
// ============================================================================
