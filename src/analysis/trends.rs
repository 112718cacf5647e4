//! Trend analysis and watch-list selection over collected repositories.

use crate::models::{FrameworkUpdate, Repository};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Description keywords counted as topics.
pub const TOPIC_KEYWORDS: [&str; 8] = [
    "llm",
    "transformer",
    "vision",
    "nlp",
    "generative",
    "diffusion",
    "gan",
    "reinforcement",
];

/// Number of languages and topics reported.
pub const TOP_N: usize = 3;

/// Watch-list bounds (both exclusive).
pub const WATCH_MIN_STARS: u64 = 10;
pub const WATCH_MAX_STARS: u64 = 1000;

/// A watched repository must have been updated within this many days.
pub const WATCH_WINDOW_DAYS: i64 = 7;

pub const WATCH_LIST_SIZE: usize = 5;

/// What the collected data says is popular right now.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TrendSummary {
    /// Most common primary languages with counts.
    pub languages: Vec<(String, usize)>,
    /// Most common description topics with counts.
    pub topics: Vec<(String, usize)>,
    /// Frameworks with a recent release.
    pub frameworks: Vec<String>,
}

impl TrendSummary {
    /// True when no category produced any signal.
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty() && self.topics.is_empty() && self.frameworks.is_empty()
    }
}

/// Count one occurrence of `key`, remembering first-seen order.
fn tally(counts: &mut Vec<(String, usize)>, key: &str) {
    match counts.iter_mut().find(|(k, _)| k == key) {
        Some((_, count)) => *count += 1,
        None => counts.push((key.to_string(), 1)),
    }
}

/// Highest counts first; equal counts keep first-seen order.
fn top(mut counts: Vec<(String, usize)>, n: usize) -> Vec<(String, usize)> {
    counts.sort_by_key(|(_, count)| std::cmp::Reverse(*count));
    counts.truncate(n);
    counts
}

/// Tally languages, description topics and active frameworks.
pub fn analyze_trends<'a>(
    repos: impl IntoIterator<Item = &'a Repository>,
    updates: &[FrameworkUpdate],
) -> TrendSummary {
    let mut languages = Vec::new();
    let mut topics = Vec::new();

    for repo in repos {
        if let Some(ref language) = repo.language {
            tally(&mut languages, language);
        }

        let description = repo.description_lowercase();
        for keyword in TOPIC_KEYWORDS {
            if description.contains(keyword) {
                tally(&mut topics, keyword);
            }
        }
    }

    TrendSummary {
        languages: top(languages, TOP_N),
        topics: top(topics, TOP_N),
        frameworks: updates
            .iter()
            .map(|u| u.framework_name().to_string())
            .collect(),
    }
}

/// Pick promising early-stage repositories: described, moderately starred
/// and recently active. Highest stars first.
pub fn select_watch_list<'a>(
    repos: impl IntoIterator<Item = &'a Repository>,
    now: DateTime<Utc>,
) -> Vec<&'a Repository> {
    let cutoff = now - Duration::days(WATCH_WINDOW_DAYS);

    let mut promising: Vec<&Repository> = repos
        .into_iter()
        .filter(|repo| {
            repo.has_description()
                && repo.stargazers_count > WATCH_MIN_STARS
                && repo.stargazers_count < WATCH_MAX_STARS
                && repo.updated_at > cutoff
        })
        .collect();

    promising.sort_by_key(|repo| std::cmp::Reverse(repo.stargazers_count));
    promising.truncate(WATCH_LIST_SIZE);
    promising
}
