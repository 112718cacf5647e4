//! Discovery of AI repositories created since yesterday.

use super::{pace, search_github};
use crate::analysis::{dedup_by_id, filter_new_repos};
use crate::client::DigestApi;
use crate::config::DigestContext;
use crate::models::{Repository, SortKey, SortOrder};
use tracing::{debug, info};

/// Topics searched for new repositories.
pub const NEW_REPO_TOPICS: [&str; 8] = [
    "artificial intelligence",
    "machine learning",
    "deep learning",
    "neural network",
    "computer vision",
    "natural language processing",
    "llm",
    "transformer",
];

const PER_QUERY: u32 = 5;
const MAX_NEW_REPOS: usize = 10;

/// Search queries restricted to repositories created after yesterday.
pub fn new_repo_queries(ctx: &DigestContext) -> Vec<String> {
    let cutoff = ctx.yesterday().format("%Y-%m-%d");
    NEW_REPO_TOPICS
        .iter()
        .map(|topic| format!("{} created:>{}", topic, cutoff))
        .collect()
}

/// Find notable repositories created in the last day.
pub async fn get_new_repositories(api: &dyn DigestApi, ctx: &DigestContext) -> Vec<Repository> {
    info!("🔍 Searching for new AI repositories...");

    let mut all_repos = Vec::new();
    for (i, query) in new_repo_queries(ctx).iter().enumerate() {
        pace(ctx, i).await;
        let repos = search_github(api, ctx, query, SortKey::Stars, SortOrder::Desc, PER_QUERY).await;
        debug!("{} results for \"{}\"", repos.len(), query);
        all_repos.extend(repos);
    }

    filter_new_repos(dedup_by_id(all_repos), MAX_NEW_REPOS)
}
