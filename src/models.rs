//! Data models for the digest.
//!
//! This module contains the records fetched from GitHub and Brave Search
//! and the digest document assembled from them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Maximum number of characters kept from a release body.
pub const RELEASE_BODY_LIMIT: usize = 200;

/// A repository as returned by the GitHub search API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    /// GitHub's numeric repository id (unique).
    pub id: u64,
    /// Short repository name.
    pub name: String,
    /// Repository name in "owner/name" format.
    #[serde(default)]
    pub full_name: String,
    /// Link to the repository page.
    pub html_url: String,
    /// Number of stars.
    #[serde(default)]
    pub stargazers_count: u64,
    /// Primary language, if GitHub detected one.
    #[serde(default)]
    pub language: Option<String>,
    /// Repository description.
    #[serde(default)]
    pub description: Option<String>,
    /// Last time the repository was updated.
    pub updated_at: DateTime<Utc>,
}

impl Repository {
    /// Returns the description lower-cased, or an empty string.
    pub fn description_lowercase(&self) -> String {
        self.description
            .as_deref()
            .map(str::to_lowercase)
            .unwrap_or_default()
    }

    /// Whether the repository has a non-empty description.
    pub fn has_description(&self) -> bool {
        self.description.as_deref().is_some_and(|d| !d.is_empty())
    }
}

/// Search results envelope for `/search/repositories`.
#[derive(Debug, Clone, Deserialize)]
pub struct RepositorySearchResponse {
    #[serde(default)]
    pub items: Vec<Repository>,
}

/// A release as returned by the GitHub latest-release API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Release {
    pub tag_name: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub body: Option<String>,
    pub html_url: String,
}

/// A recent release of one of the tracked frameworks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameworkUpdate {
    /// Framework repository in "owner/name" format.
    pub repo: String,
    /// Release tag.
    pub version: String,
    /// Release display name.
    pub name: Option<String>,
    /// When the release was published.
    pub published_at: DateTime<Utc>,
    /// Release notes, truncated.
    pub body: String,
    /// Link to the release page.
    pub url: String,
}

impl FrameworkUpdate {
    /// Build an update record from a fetched release.
    pub fn from_release(repo: &str, release: Release, published_at: DateTime<Utc>) -> Self {
        Self {
            repo: repo.to_string(),
            version: release.tag_name,
            name: release.name,
            published_at,
            body: truncate_body(release.body.as_deref()),
            url: release.html_url,
        }
    }

    /// The framework name without its owner ("pytorch/pytorch" -> "pytorch").
    pub fn framework_name(&self) -> &str {
        self.repo
            .split_once('/')
            .map(|(_, name)| name)
            .unwrap_or(&self.repo)
    }
}

/// Truncate release notes to [`RELEASE_BODY_LIMIT`] characters and mark the cut.
pub fn truncate_body(body: Option<&str>) -> String {
    match body {
        Some(text) if !text.trim().is_empty() => {
            let truncated: String = text.chars().take(RELEASE_BODY_LIMIT).collect();
            format!("{}...", truncated)
        }
        _ => "*No release notes provided.*".to_string(),
    }
}

/// A web search result from Brave Search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub url: String,
    /// Human-readable age such as "3 hours ago".
    #[serde(default)]
    pub age: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Brave Search response envelope.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebSearchResponse {
    #[serde(default)]
    pub web: Option<WebResults>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebResults {
    #[serde(default)]
    pub results: Vec<NewsItem>,
}

impl WebSearchResponse {
    pub fn into_items(self) -> Vec<NewsItem> {
        self.web.map(|w| w.results).unwrap_or_default()
    }
}

/// Sort key accepted by the repository search API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Stars,
    Updated,
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Stars => write!(f, "stars"),
            SortKey::Updated => write!(f, "updated"),
        }
    }
}

/// Sort order accepted by the repository search API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    #[allow(dead_code)] // Accepted by the search API; collectors only sort descending
    Asc,
    Desc,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Asc => write!(f, "asc"),
            SortOrder::Desc => write!(f, "desc"),
        }
    }
}

/// Parameters of a single repository search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSearch {
    pub query: String,
    pub sort: SortKey,
    pub order: SortOrder,
    pub per_page: u32,
}

/// Parameters of a single web search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebSearch {
    pub query: String,
    /// Brave freshness filter ("pd" = past day).
    pub freshness: String,
    pub count: u32,
}

/// The collected data for one day's digest.
#[derive(Debug, Clone, Serialize)]
pub struct Digest {
    /// Date the digest is for.
    pub date: NaiveDate,
    /// When the digest was generated.
    pub generated_at: DateTime<Utc>,
    pub new_repos: Vec<Repository>,
    pub trending_repos: Vec<Repository>,
    pub framework_updates: Vec<FrameworkUpdate>,
    pub news: Vec<NewsItem>,
}

impl Digest {
    /// New and trending repositories, in that order, unique by id.
    ///
    /// A repository found by both collectors is counted once; the new-repo
    /// record wins.
    pub fn unique_repos(&self) -> Vec<&Repository> {
        let mut seen = HashSet::new();
        self.new_repos
            .iter()
            .chain(self.trending_repos.iter())
            .filter(|repo| seen.insert(repo.id))
            .collect()
    }

    /// File name for the digest with the given extension.
    pub fn file_name(&self, extension: &str) -> String {
        format!("ai-digest-{}.{}", self.date.format("%Y-%m-%d"), extension)
    }
}

#[cfg(test)]
pub mod fixtures {
    use super::*;
    use chrono::TimeZone;

    /// Fixed run time used across the test suite.
    pub fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap()
    }

    pub fn repo(id: u64, stars: u64, description: Option<&str>) -> Repository {
        Repository {
            id,
            name: format!("repo-{}", id),
            full_name: format!("owner/repo-{}", id),
            html_url: format!("https://github.com/owner/repo-{}", id),
            stargazers_count: stars,
            language: Some("Python".to_string()),
            description: description.map(String::from),
            updated_at: now(),
        }
    }

    pub fn release(tag: &str, published_at: Option<DateTime<Utc>>) -> Release {
        Release {
            tag_name: tag.to_string(),
            name: Some(format!("Release {}", tag)),
            published_at,
            body: Some("Bug fixes and performance improvements".to_string()),
            html_url: format!("https://github.com/owner/repo/releases/tag/{}", tag),
        }
    }
}
