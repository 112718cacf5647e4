//! Discovery of established AI repositories with recent activity.

use super::{pace, search_github};
use crate::analysis::dedup_by_id;
use crate::client::DigestApi;
use crate::config::DigestContext;
use crate::models::{Repository, SortKey, SortOrder};
use tracing::info;

/// Queries for trending repositories; each carries its own star floor.
pub const TRENDING_QUERIES: [&str; 5] = [
    "artificial intelligence stars:>50",
    "machine learning stars:>100",
    "deep learning stars:>50",
    "llm stars:>50",
    "transformer stars:>50",
];

const PER_QUERY: u32 = 10;
const MAX_TRENDING: usize = 15;

/// Find recently updated, already popular AI repositories.
pub async fn get_trending_repositories(
    api: &dyn DigestApi,
    ctx: &DigestContext,
) -> Vec<Repository> {
    info!("📈 Finding trending AI repositories...");

    let mut all_repos = Vec::new();
    for (i, query) in TRENDING_QUERIES.iter().enumerate() {
        pace(ctx, i).await;
        all_repos
            .extend(search_github(api, ctx, query, SortKey::Updated, SortOrder::Desc, PER_QUERY).await);
    }

    let mut unique = dedup_by_id(all_repos);
    unique.truncate(MAX_TRENDING);
    unique
}
