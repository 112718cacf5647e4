//! Repository deduplication and filtering.
//!
//! Search results from several queries are merged before use; these helpers
//! make sure each repository appears once and apply the quality filter for
//! freshly created repositories.

use crate::models::Repository;
use std::collections::HashSet;

/// Minimum stars for a new repository to be notable on its own.
pub const NEW_REPO_MIN_STARS: u64 = 5;

/// Description keywords that make a new repository notable regardless of stars.
pub const NEW_REPO_KEYWORDS: [&str; 3] = ["ai", "machine learning", "deep learning"];

/// Remove repositories whose id was already seen, keeping the first occurrence.
pub fn dedup_by_id(repos: Vec<Repository>) -> Vec<Repository> {
    let mut seen = HashSet::new();
    repos.into_iter().filter(|repo| seen.insert(repo.id)).collect()
}

/// Whether a newly created repository is worth listing.
pub fn is_notable_new_repo(repo: &Repository) -> bool {
    if repo.stargazers_count >= NEW_REPO_MIN_STARS {
        return true;
    }

    let description = repo.description_lowercase();
    NEW_REPO_KEYWORDS
        .iter()
        .any(|keyword| description.contains(keyword))
}

/// Keep notable repositories, preserving order, up to `limit`.
pub fn filter_new_repos(repos: Vec<Repository>, limit: usize) -> Vec<Repository> {
    repos
        .into_iter()
        .filter(is_notable_new_repo)
        .take(limit)
        .collect()
}
