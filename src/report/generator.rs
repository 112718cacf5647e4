//! Markdown digest generation.
//!
//! This module renders a [`Digest`] into the daily markdown document and
//! writes finished digests to disk.

use crate::analysis::{analyze_trends, select_watch_list, TrendSummary};
use crate::models::{Digest, FrameworkUpdate, NewsItem, Repository};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

const MAX_NEW_REPOS: usize = 8;
const MAX_TRENDING: usize = 10;
const MAX_NEWS: usize = 8;

pub const NO_NEW_REPOS: &str = "*No significant new repositories found in the last 24 hours.*";
pub const NO_TRENDING: &str = "*No trending repositories identified.*";
pub const NO_UPDATES: &str = "*No major framework updates in the past week.*";
pub const NO_NEWS: &str = "*No recent AI news found.*";
pub const NO_TRENDS: &str = "*No significant trends identified in current data.*";
pub const NO_WATCH_LIST: &str = "*No promising early-stage projects identified.*";

/// Generate the complete markdown digest.
pub fn generate_markdown_digest(digest: &Digest) -> String {
    let mut output = String::new();

    output.push_str(&generate_header(digest));

    output.push_str("## 🆕 New Notable Repositories (Last 24 Hours)\n\n");
    output.push_str(&generate_entries(
        digest.new_repos.iter().take(MAX_NEW_REPOS).map(format_repo),
        NO_NEW_REPOS,
    ));

    output.push_str("## 📈 Trending AI Projects\n\n");
    output.push_str(&generate_entries(
        digest.trending_repos.iter().take(MAX_TRENDING).map(format_repo),
        NO_TRENDING,
    ));

    output.push_str("## 🔧 Framework & Library Updates\n\n");
    output.push_str(&generate_entries(
        digest.framework_updates.iter().map(format_framework_update),
        NO_UPDATES,
    ));

    output.push_str("## 📰 AI Community News & Developments\n\n");
    output.push_str(&generate_entries(
        digest.news.iter().take(MAX_NEWS).map(format_news_item),
        NO_NEWS,
    ));

    output.push_str("## 🔮 Key Trends & Patterns\n\n");
    let trends = analyze_trends(digest.unique_repos(), &digest.framework_updates);
    output.push_str(&generate_trends_section(&trends));
    output.push_str("\n\n");

    output.push_str("## 👀 Projects to Watch\n\n");
    let watch_list = select_watch_list(digest.unique_repos(), digest.generated_at);
    output.push_str(&generate_watch_list_section(&watch_list));
    output.push_str("\n\n");

    output.push_str(&generate_footer());

    output
}

/// Title, date line and generation timestamp.
fn generate_header(digest: &Digest) -> String {
    let mut header = String::new();

    header.push_str("# Open-Source AI Daily Digest\n\n");
    header.push_str(&format!("**{}**  \n", digest.date.format("%B %d, %Y")));
    header.push_str(&format!(
        "*Generated: {}*\n\n",
        digest.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    header.push_str("---\n\n");

    header
}

/// Rendered entries separated by blank lines, or the placeholder.
fn generate_entries(entries: impl Iterator<Item = String>, placeholder: &str) -> String {
    let mut section = String::new();

    for entry in entries {
        section.push_str(&entry);
        section.push('\n');
    }

    if section.is_empty() {
        section.push_str(placeholder);
        section.push_str("\n\n");
    }

    section
}

fn generate_trends_section(trends: &TrendSummary) -> String {
    if trends.is_empty() {
        return NO_TRENDS.to_string();
    }

    let mut section = String::new();

    if !trends.languages.is_empty() {
        let languages: Vec<String> = trends
            .languages
            .iter()
            .map(|(language, count)| format!("{} ({})", language, count))
            .collect();
        section.push_str(&format!("**Popular Languages:** {}\n\n", languages.join(", ")));
    }

    if !trends.topics.is_empty() {
        let topics: Vec<String> = trends
            .topics
            .iter()
            .map(|(topic, count)| format!("{} ({})", topic.to_uppercase(), count))
            .collect();
        section.push_str(&format!("**Trending Topics:** {}\n\n", topics.join(", ")));
    }

    if !trends.frameworks.is_empty() {
        section.push_str(&format!(
            "**Active Frameworks:** {}\n\n",
            trends.frameworks.join(", ")
        ));
    }

    section
}

fn generate_watch_list_section(watch_list: &[&Repository]) -> String {
    if watch_list.is_empty() {
        return format!("{}\n", NO_WATCH_LIST);
    }

    let entries: Vec<String> = watch_list.iter().map(|repo| format_repo(repo)).collect();
    format!("{}\n", entries.join("\n"))
}

/// Generate the digest footer.
fn generate_footer() -> String {
    let mut footer = String::new();

    footer.push_str("---\n\n");
    footer.push_str(
        "*This digest was automatically generated by ai-digest using GitHub API, Brave Search, and AI analysis.*  \n",
    );
    footer.push_str(
        "*Sources: GitHub trending, new repositories, framework releases, and AI community news.*",
    );

    footer
}

/// Render one repository entry.
pub fn format_repo(repo: &Repository) -> String {
    let language = repo.language.as_deref().unwrap_or("Unknown");
    let description = repo
        .description
        .as_deref()
        .filter(|d| !d.is_empty())
        .unwrap_or("No description available");

    format!(
        "**[{}]({})** ({} ⭐)\n*{}*\n{}\n",
        repo.name,
        repo.html_url,
        format_count(repo.stargazers_count),
        language,
        description
    )
}

/// Render one framework release entry.
pub fn format_framework_update(update: &FrameworkUpdate) -> String {
    format!(
        "**[{}]({})** - {}\n*Released: {}*\n{}\n",
        update.repo,
        update.url,
        update.version,
        update.published_at.format("%b %d"),
        update.body
    )
}

/// Render one news entry.
pub fn format_news_item(item: &NewsItem) -> String {
    format!(
        "**[{}]({})**\n*{}*\n{}\n",
        item.title,
        item.url,
        item.age.as_deref().unwrap_or("Recent"),
        item.description.as_deref().unwrap_or_default()
    )
}

/// Format a count with thousands separators ("12345" -> "12,345").
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }

    out
}

/// JSON view of a digest, including the derived sections.
#[derive(Serialize)]
struct JsonDigest<'a> {
    #[serde(flatten)]
    digest: &'a Digest,
    trends: TrendSummary,
    watch_list: Vec<&'a Repository>,
}

/// Generate a JSON digest.
pub fn generate_json_digest(digest: &Digest) -> Result<String> {
    let report = JsonDigest {
        digest,
        trends: analyze_trends(digest.unique_repos(), &digest.framework_updates),
        watch_list: select_watch_list(digest.unique_repos(), digest.generated_at),
    };
    serde_json::to_string_pretty(&report).map_err(Into::into)
}

/// Write a rendered digest into `dir`, creating the directory if needed.
///
/// An existing file with the same name is overwritten.
pub fn write_digest(dir: &Path, file_name: &str, content: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let path = dir.join(file_name);
    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write digest to {}", path.display()))?;

    Ok(path)
}
