//! Access to the external APIs the digest is built from.
//!
//! Collectors talk to GitHub and Brave Search through the [`DigestApi`]
//! trait so the HTTP layer can be swapped for an in-memory one in tests.

pub mod http;

pub use http::{ApiSettings, HttpApi};

use crate::models::{NewsItem, Release, RepoSearch, Repository, WebSearch};
use async_trait::async_trait;
use thiserror::Error;

/// Operations the collectors need from the outside world.
#[async_trait]
pub trait DigestApi: Send + Sync {
    /// Search GitHub repositories.
    async fn search_repositories(
        &self,
        search: &RepoSearch,
        token: Option<&str>,
    ) -> Result<Vec<Repository>, ApiError>;

    /// Fetch the latest release of an "owner/name" repository.
    async fn latest_release(&self, repo: &str, token: Option<&str>) -> Result<Release, ApiError>;

    /// Run a web search.
    async fn search_web(&self, search: &WebSearch, api_key: &str)
        -> Result<Vec<NewsItem>, ApiError>;
}

/// Failure of a single external call.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {source}")]
    Request { source: reqwest::Error },

    #[error("API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode response: {source}")]
    Decode { source: reqwest::Error },

    #[error("response is missing `{0}`")]
    MissingField(&'static str),
}
