//! reqwest-backed implementation of [`DigestApi`].

use super::{ApiError, DigestApi};
use crate::models::{
    NewsItem, Release, RepoSearch, Repository, RepositorySearchResponse, WebSearch,
    WebSearchResponse,
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{header, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Endpoints and transport settings for the HTTP client.
#[derive(Debug, Clone)]
pub struct ApiSettings {
    /// GitHub REST API base URL.
    pub github_url: String,
    /// Brave web search endpoint.
    pub search_url: String,
    pub user_agent: String,
    pub timeout_seconds: u64,
}

/// Talks to the GitHub REST API and Brave Search over HTTPS.
pub struct HttpApi {
    http_client: reqwest::Client,
    settings: ApiSettings,
}

impl HttpApi {
    pub fn new(settings: ApiSettings) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .user_agent(settings.user_agent.clone())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http_client,
            settings,
        })
    }

    fn github_get(&self, path: &str, token: Option<&str>) -> RequestBuilder {
        let url = format!("{}{}", self.settings.github_url.trim_end_matches('/'), path);
        let request = self
            .http_client
            .get(url)
            .header(header::ACCEPT, "application/vnd.github.v3+json");

        match token {
            Some(token) => request.header(header::AUTHORIZATION, format!("token {}", token)),
            None => request,
        }
    }
}

/// Send a request and decode a successful JSON body.
async fn fetch_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
    let response = request
        .send()
        .await
        .map_err(|source| ApiError::Request { source })?;

    let response = check_status(response).await?;

    response
        .json::<T>()
        .await
        .map_err(|source| ApiError::Decode { source })
}

async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl DigestApi for HttpApi {
    async fn search_repositories(
        &self,
        search: &RepoSearch,
        token: Option<&str>,
    ) -> Result<Vec<Repository>, ApiError> {
        debug!("GitHub search: {:?}", search);

        let request = self.github_get("/search/repositories", token).query(&[
            ("q", search.query.clone()),
            ("sort", search.sort.to_string()),
            ("order", search.order.to_string()),
            ("per_page", search.per_page.to_string()),
        ]);

        let response: RepositorySearchResponse = fetch_json(request).await?;
        Ok(response.items)
    }

    async fn latest_release(&self, repo: &str, token: Option<&str>) -> Result<Release, ApiError> {
        debug!("Fetching latest release of {}", repo);

        let request = self.github_get(&format!("/repos/{}/releases/latest", repo), token);
        fetch_json(request).await
    }

    async fn search_web(
        &self,
        search: &WebSearch,
        api_key: &str,
    ) -> Result<Vec<NewsItem>, ApiError> {
        debug!("Web search: {:?}", search);

        let request = self
            .http_client
            .get(&self.settings.search_url)
            .header("X-Subscription-Token", api_key)
            .header(header::ACCEPT, "application/json")
            .query(&[
                ("q", search.query.clone()),
                ("freshness", search.freshness.clone()),
                ("count", search.count.to_string()),
                ("summary", "true".to_string()),
            ]);

        let response: WebSearchResponse = fetch_json(request).await?;
        Ok(response.into_items())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> ApiSettings {
        ApiSettings {
            github_url: "https://api.github.com/".to_string(),
            search_url: "https://api.search.brave.com/res/v1/web/search".to_string(),
            user_agent: "ai-digest-test".to_string(),
            timeout_seconds: 5,
        }
    }

    #[test]
    fn test_github_request_with_token() {
        let api = HttpApi::new(settings()).unwrap();
        let request = api
            .github_get("/repos/google/jax/releases/latest", Some("secret"))
            .build()
            .unwrap();

        assert_eq!(
            request.url().as_str(),
            "https://api.github.com/repos/google/jax/releases/latest"
        );
        assert_eq!(
            request.headers().get(header::AUTHORIZATION).unwrap(),
            "token secret"
        );
        assert_eq!(
            request.headers().get(header::ACCEPT).unwrap(),
            "application/vnd.github.v3+json"
        );
    }

    #[test]
    fn test_github_request_without_token() {
        let api = HttpApi::new(settings()).unwrap();
        let request = api.github_get("/search/repositories", None).build().unwrap();

        assert!(request.headers().get(header::AUTHORIZATION).is_none());
    }
}
