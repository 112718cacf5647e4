//! Collectors gather one kind of record from one external source.
//!
//! Every collector runs its queries one after another with a fixed pause
//! in between and never fails: a query that errors is logged and counts
//! as "no results".

pub mod frameworks;
pub mod news;
pub mod new_repos;
pub mod trending;

pub use frameworks::get_framework_updates;
pub use new_repos::get_new_repositories;
pub use news::get_ai_news;
pub use trending::get_trending_repositories;

use crate::client::DigestApi;
use crate::config::DigestContext;
use crate::models::{RepoSearch, Repository, SortKey, SortOrder};
use tracing::error;

/// Search GitHub repositories, degrading any failure to an empty result.
pub async fn search_github(
    api: &dyn DigestApi,
    ctx: &DigestContext,
    query: &str,
    sort: SortKey,
    order: SortOrder,
    per_page: u32,
) -> Vec<Repository> {
    let search = RepoSearch {
        query: query.to_string(),
        sort,
        order,
        per_page,
    };

    match api.search_repositories(&search, ctx.github_token()).await {
        Ok(repos) => repos,
        Err(e) => {
            error!("GitHub search error for \"{}\": {}", query, e);
            Vec::new()
        }
    }
}

/// Sleep for the configured query delay before every query but the first.
pub(crate) async fn pace(ctx: &DigestContext, index: usize) {
    if index > 0 && !ctx.query_delay.is_zero() {
        tokio::time::sleep(ctx.query_delay).await;
    }
}
