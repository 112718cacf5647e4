//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.ai-digest.toml` files, and resolves the final settings into the
//! immutable [`DigestContext`] every collector receives.

use crate::client::ApiSettings;
use anyhow::{Context, Result};
use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default configuration file name.
pub const CONFIG_FILE: &str = ".ai-digest.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// GitHub API settings.
    #[serde(default)]
    pub github: GithubConfig,

    /// Web search settings.
    #[serde(default)]
    pub search: SearchConfig,

    /// Collection pacing.
    #[serde(default)]
    pub collect: CollectConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Directory digests are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

fn default_output_dir() -> String {
    "logs".to_string()
}

/// GitHub API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubConfig {
    /// REST API base URL.
    #[serde(default = "default_github_url")]
    pub api_url: String,

    /// User-Agent sent with every request (GitHub rejects requests without one).
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_url: default_github_url(),
            user_agent: default_user_agent(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_github_url() -> String {
    "https://api.github.com".to_string()
}

fn default_user_agent() -> String {
    format!("ai-digest/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeout() -> u64 {
    30
}

/// Brave Search settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Web search endpoint.
    #[serde(default = "default_search_url")]
    pub api_url: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_url: default_search_url(),
        }
    }
}

fn default_search_url() -> String {
    "https://api.search.brave.com/res/v1/web/search".to_string()
}

/// Collection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectConfig {
    /// Pause between successive queries of one collector, in milliseconds.
    #[serde(default = "default_query_delay")]
    pub query_delay_ms: u64,
}

impl Default for CollectConfig {
    fn default() -> Self {
        Self {
            query_delay_ms: default_query_delay(),
        }
    }
}

fn default_query_delay() -> u64 {
    1000
}

/// API credentials. Both are optional.
#[derive(Clone, Default)]
pub struct Credentials {
    /// GitHub token; raises the search rate limit.
    pub github_token: Option<String>,
    /// Brave Search subscription key; news collection is skipped without it.
    pub brave_api_key: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("github_token", &self.github_token.as_ref().map(|_| "***"))
            .field("brave_api_key", &self.brave_api_key.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Everything a collector needs to know about the current run.
#[derive(Debug, Clone)]
pub struct DigestContext {
    /// Run time; all freshness windows are measured from here.
    pub now: DateTime<Utc>,
    pub credentials: Credentials,
    /// Pause between successive queries within one collector.
    pub query_delay: Duration,
}

impl DigestContext {
    pub fn new(now: DateTime<Utc>, credentials: Credentials, query_delay: Duration) -> Self {
        Self {
            now,
            credentials,
            query_delay,
        }
    }

    /// The day before the run date, used as the "created after" cutoff.
    pub fn yesterday(&self) -> NaiveDate {
        let today = self.now.date_naive();
        today.checked_sub_days(Days::new(1)).unwrap_or(today)
    }

    pub fn github_token(&self) -> Option<&str> {
        self.credentials.github_token.as_deref()
    }

    pub fn brave_api_key(&self) -> Option<&str> {
        self.credentials.brave_api_key.as_deref()
    }
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings when given.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref dir) = args.output_dir {
            self.general.output_dir = dir.display().to_string();
        }

        if let Some(timeout) = args.timeout {
            self.github.timeout_seconds = timeout;
        }

        if let Some(delay) = args.delay_ms {
            self.collect.query_delay_ms = delay;
        }
    }

    /// HTTP client settings derived from this configuration.
    pub fn api_settings(&self) -> ApiSettings {
        ApiSettings {
            github_url: self.github.api_url.clone(),
            search_url: self.search.api_url.clone(),
            user_agent: self.github.user_agent.clone(),
            timeout_seconds: self.github.timeout_seconds,
        }
    }

    /// Build the run context for a run starting at `now`.
    pub fn context(&self, credentials: Credentials, now: DateTime<Utc>) -> DigestContext {
        DigestContext::new(
            now,
            credentials,
            Duration::from_millis(self.collect.query_delay_ms),
        )
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use clap::Parser;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.output_dir, "logs");
        assert_eq!(config.github.api_url, "https://api.github.com");
        assert_eq!(config.collect.query_delay_ms, 1000);
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[general]
output_dir = "digests"

[github]
timeout_seconds = 10

[collect]
query_delay_ms = 250
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.general.output_dir, "digests");
        assert_eq!(config.github.timeout_seconds, 10);
        assert_eq!(config.github.api_url, "https://api.github.com");
        assert_eq!(config.collect.query_delay_ms, 250);
        assert!(config.search.api_url.contains("brave.com"));
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[github]"));
        assert!(toml_str.contains("[search]"));
        assert!(toml_str.contains("[collect]"));
    }

    #[test]
    fn test_context_yesterday() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 0, 30, 0).unwrap();
        let ctx = Config::default().context(Credentials::default(), now);

        assert_eq!(ctx.yesterday(), NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());
        assert_eq!(ctx.query_delay, Duration::from_millis(1000));
    }

    #[test]
    fn test_cli_overrides_file_values() {
        let args = crate::cli::Args::try_parse_from([
            "ai-digest",
            "--output-dir",
            "out",
            "--delay-ms",
            "0",
        ])
        .unwrap();
        let mut config: Config = toml::from_str("[github]\ntimeout_seconds = 5\n").unwrap();

        config.merge_with_args(&args);

        assert_eq!(config.general.output_dir, "out");
        assert_eq!(config.collect.query_delay_ms, 0);
        assert_eq!(config.github.timeout_seconds, 5);
    }

    #[test]
    fn test_credentials_debug_is_redacted() {
        let credentials = Credentials {
            github_token: Some("ghp_secret".to_string()),
            brave_api_key: None,
        };
        let printed = format!("{:?}", credentials);
        assert!(!printed.contains("ghp_secret"));
        assert!(printed.contains("***"));
    }
}
