//! Recent releases of the major ML frameworks.

use super::pace;
use crate::client::{ApiError, DigestApi};
use crate::config::DigestContext;
use crate::models::FrameworkUpdate;
use chrono::{DateTime, Utc};
use tracing::{debug, error, info};

/// Framework repositories whose latest release is tracked.
pub const FRAMEWORKS: [&str; 7] = [
    "pytorch/pytorch",
    "tensorflow/tensorflow",
    "huggingface/transformers",
    "openai/openai-python",
    "anthropics/anthropic-sdk-python",
    "microsoft/DeepSpeed",
    "google/jax",
];

/// A release counts as recent when at most this many whole days old.
pub const RELEASE_WINDOW_DAYS: i64 = 7;

/// Whether a release published at `published_at` is inside the window.
pub fn is_recent_release(published_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    (now - published_at).num_days() <= RELEASE_WINDOW_DAYS
}

async fn fetch_update(
    api: &dyn DigestApi,
    ctx: &DigestContext,
    repo: &str,
) -> Result<Option<FrameworkUpdate>, ApiError> {
    let release = api.latest_release(repo, ctx.github_token()).await?;
    let published_at = release
        .published_at
        .ok_or(ApiError::MissingField("published_at"))?;

    if !is_recent_release(published_at, ctx.now) {
        debug!("{} {} is older than {} days", repo, release.tag_name, RELEASE_WINDOW_DAYS);
        return Ok(None);
    }

    Ok(Some(FrameworkUpdate::from_release(repo, release, published_at)))
}

/// Collect framework releases published in the last week.
pub async fn get_framework_updates(
    api: &dyn DigestApi,
    ctx: &DigestContext,
) -> Vec<FrameworkUpdate> {
    info!("🔧 Checking framework updates...");

    let mut updates = Vec::new();
    for (i, repo) in FRAMEWORKS.iter().enumerate() {
        pace(ctx, i).await;
        match fetch_update(api, ctx, repo).await {
            Ok(Some(update)) => updates.push(update),
            Ok(None) => {}
            Err(e) => error!("Error fetching releases for {}: {}", repo, e),
        }
    }

    updates
}
