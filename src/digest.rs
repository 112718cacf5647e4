//! Digest orchestration.
//!
//! Runs the four collectors concurrently, assembles the [`Digest`] and
//! persists the rendered document.

use crate::cli::OutputFormat;
use crate::client::DigestApi;
use crate::collectors::{
    get_ai_news, get_framework_updates, get_new_repositories, get_trending_repositories,
};
use crate::config::DigestContext;
use crate::models::Digest;
use crate::report;
use anyhow::Result;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::info;

/// Collect everything for the digest dated `date`.
///
/// The collectors run concurrently and cannot fail; a collector whose
/// queries all errored simply contributes an empty section.
pub async fn collect_digest(api: &dyn DigestApi, ctx: &DigestContext, date: NaiveDate) -> Digest {
    info!("🤖 Generating AI digest for {}...", date.format("%Y-%m-%d"));

    let (new_repos, trending_repos, framework_updates, news) = futures::join!(
        get_new_repositories(api, ctx),
        get_trending_repositories(api, ctx),
        get_framework_updates(api, ctx),
        get_ai_news(api, ctx),
    );

    Digest {
        date,
        generated_at: ctx.now,
        new_repos,
        trending_repos,
        framework_updates,
        news,
    }
}

/// Render a digest in the requested format.
pub fn render_digest(digest: &Digest, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Markdown => Ok(report::generate_markdown_digest(digest)),
        OutputFormat::Json => report::generate_json_digest(digest),
    }
}

/// Collect, render and write a digest. Returns the path written.
pub async fn generate_digest(
    api: &dyn DigestApi,
    ctx: &DigestContext,
    date: NaiveDate,
    output_dir: &Path,
    format: OutputFormat,
) -> Result<PathBuf> {
    let digest = collect_digest(api, ctx, date).await;
    let content = render_digest(&digest, format)?;

    let path = report::write_digest(output_dir, &digest.file_name(format.extension()), &content)?;

    info!("✅ AI digest generated: {}", path.display());
    info!(
        "📊 Stats: {} new repos, {} trending, {} updates, {} news items",
        digest.new_repos.len(),
        digest.trending_repos.len(),
        digest.framework_updates.len(),
        digest.news.len()
    );

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::MockApi;
    use crate::collectors::test_support::context;
    use crate::models::fixtures::{now, release, repo};
    use crate::report::generator::NO_NEWS;
    use chrono::Duration;
    use tokio_test::assert_ok;

    fn digest_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn scenario_api() -> MockApi {
        let mut qualifying = repo(1, 25, Some("Agents for everyone"));
        qualifying.name = "agent-kit".to_string();
        let mut unqualified = repo(2, 1, Some("Personal dotfiles"));
        unqualified.name = "dotfiles".to_string();

        MockApi::new()
            .with_search("llm created:>2026-10-15", vec![qualifying, unqualified])
            .with_search(
                "machine learning stars:>100",
                vec![
                    repo(10, 5_000, Some("Training toolkit")),
                    repo(11, 800, Some("Vision models")),
                    repo(12, 150, None),
                ],
            )
            .with_release(
                "pytorch/pytorch",
                release("v2.9.0", Some(now() - Duration::days(1))),
            )
            .with_release(
                "tensorflow/tensorflow",
                release("v2.20.0", Some(now() - Duration::days(30))),
            )
    }

    fn count_entries(section: &str) -> usize {
        section.matches("**[").count()
    }

    fn section<'a>(markdown: &'a str, heading: &str, next: &str) -> &'a str {
        let start = markdown.find(heading).unwrap();
        let end = markdown.find(next).unwrap();
        &markdown[start..end]
    }

    #[tokio::test]
    async fn test_collect_digest() {
        let api = scenario_api();

        let digest = collect_digest(&api, &context(), digest_date()).await;

        assert_eq!(digest.new_repos.len(), 1);
        assert_eq!(digest.new_repos[0].name, "agent-kit");
        assert_eq!(digest.trending_repos.len(), 3);
        assert_eq!(digest.framework_updates.len(), 1);
        assert!(digest.news.is_empty());
        assert_eq!(digest.generated_at, now());
    }

    #[tokio::test]
    async fn test_generate_digest_end_to_end() {
        let api = scenario_api();
        let temp = tempfile::tempdir().unwrap();
        let out_dir = temp.path().join("logs");

        let path = assert_ok!(
            generate_digest(&api, &context(), digest_date(), &out_dir, OutputFormat::Markdown)
                .await
        );

        assert_eq!(path, out_dir.join("ai-digest-2026-10-16.md"));
        let markdown = std::fs::read_to_string(&path).unwrap();

        let new_section = section(&markdown, "## 🆕", "## 📈");
        assert_eq!(count_entries(new_section), 1);
        assert!(new_section.contains("agent-kit"));
        assert!(!new_section.contains("dotfiles"));

        let trending_section = section(&markdown, "## 📈", "## 🔧");
        assert_eq!(count_entries(trending_section), 3);

        let updates_section = section(&markdown, "## 🔧", "## 📰");
        assert_eq!(count_entries(updates_section), 1);
        assert!(updates_section.contains("v2.9.0"));
        assert!(!updates_section.contains("v2.20.0"));

        let news_section = section(&markdown, "## 📰", "## 🔮");
        assert!(news_section.contains(NO_NEWS));
    }

    #[tokio::test]
    async fn test_generate_json_digest_file() {
        let api = MockApi::new();
        let temp = tempfile::tempdir().unwrap();

        let path = generate_digest(&api, &context(), digest_date(), temp.path(), OutputFormat::Json)
            .await
            .unwrap();

        assert_eq!(path.file_name().unwrap(), "ai-digest-2026-10-16.json");
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["new_repos"].as_array().unwrap().len(), 0);
        assert!(json["trends"].is_object());
    }

    #[tokio::test]
    async fn test_unwritable_output_dir_fails() {
        let api = MockApi::new();
        let temp = tempfile::tempdir().unwrap();
        let blocker = temp.path().join("not-a-dir");
        std::fs::write(&blocker, "file").unwrap();

        let result = generate_digest(
            &api,
            &context(),
            digest_date(),
            &blocker,
            OutputFormat::Markdown,
        )
        .await;

        assert!(result.is_err());
    }
}
