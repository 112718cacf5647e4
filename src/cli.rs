//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use chrono::NaiveDate;
use clap::error::ErrorKind;
use clap::Parser;
use std::path::PathBuf;

/// ai-digest - daily digest of open-source AI activity
///
/// Collects new and trending AI repositories from GitHub, recent
/// releases of the major ML frameworks and (with a Brave Search key)
/// the day's AI news, then writes a markdown digest.
///
/// Examples:
///   ai-digest
///   ai-digest 2026-10-16
///   ai-digest --output-dir digests --format json
///   ai-digest --init-config
#[derive(Parser, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Digest date (YYYY-MM-DD); defaults to today (UTC)
    #[arg(value_name = "DATE", value_parser = parse_date)]
    pub date: Option<NaiveDate>,

    /// Directory the digest is written to
    ///
    /// Defaults to `logs`, or `output_dir` from .ai-digest.toml
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .ai-digest.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format (markdown, json)
    #[arg(long, default_value = "markdown", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// GitHub token for higher API rate limits
    ///
    /// Falls back to the GITHUB_TOKEN environment variable.
    #[arg(long, env = "GH_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Brave Search subscription key; news is skipped without it
    #[arg(long, env = "BRAVE_API_KEY", hide_env_values = true)]
    pub brave_api_key: Option<String>,

    /// HTTP request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Pause between successive API queries in milliseconds
    #[arg(long, value_name = "MS")]
    pub delay_ms: Option<u64>,

    /// Generate a default .ai-digest.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

impl OutputFormat {
    /// File extension used for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Markdown => "md",
            OutputFormat::Json => "json",
        }
    }
}

/// Exit code for a failed argument parse.
fn parse_error_exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => 0,
        _ => 1,
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| format!("expected a date like 2026-10-16: {}", e))
}

impl Args {
    /// Parse command-line arguments.
    ///
    /// Invalid arguments exit with code 1; `--help` and `--version` exit 0.
    pub fn parse_args() -> Self {
        match Self::try_parse() {
            Ok(args) => args,
            Err(e) => {
                let _ = e.print();
                std::process::exit(parse_error_exit_code(e.kind()));
            }
        }
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err("Timeout must be at least 1 second".to_string());
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// GitHub token from `--github-token`/`GH_TOKEN`, else `GITHUB_TOKEN`.
    pub fn github_token(&self) -> Option<String> {
        non_empty(self.github_token.clone())
            .or_else(|| non_empty(std::env::var("GITHUB_TOKEN").ok()))
    }

    pub fn brave_api_key(&self) -> Option<String> {
        non_empty(self.brave_api_key.clone())
    }
}

impl std::fmt::Debug for Args {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Args")
            .field("date", &self.date)
            .field("output_dir", &self.output_dir)
            .field("config", &self.config)
            .field("verbose", &self.verbose)
            .field("quiet", &self.quiet)
            .field("format", &self.format)
            .field("github_token", &self.github_token.as_ref().map(|_| "***"))
            .field("brave_api_key", &self.brave_api_key.as_ref().map(|_| "***"))
            .field("timeout", &self.timeout)
            .field("delay_ms", &self.delay_ms)
            .field("init_config", &self.init_config)
            .finish()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args() -> Args {
        Args {
            date: None,
            output_dir: None,
            config: None,
            verbose: false,
            quiet: false,
            format: OutputFormat::Markdown,
            github_token: None,
            brave_api_key: None,
            timeout: None,
            delay_ms: None,
            init_config: false,
        }
    }

    #[test]
    fn test_parse_date_argument() {
        let args = Args::try_parse_from(["ai-digest", "2026-10-16"]).unwrap();
        assert_eq!(args.date, NaiveDate::from_ymd_opt(2026, 10, 16));

        assert!(Args::try_parse_from(["ai-digest", "16/10/2026"]).is_err());
    }

    #[test]
    fn test_debug_hides_credentials() {
        let args = Args::try_parse_from([
            "ai-digest",
            "--github-token",
            "ghp_SECRET",
            "--brave-api-key",
            "brv_SECRET",
        ])
        .unwrap();

        let printed = format!("{:?}", args);

        assert!(!printed.contains("ghp_SECRET"));
        assert!(!printed.contains("brv_SECRET"));
        assert!(printed.contains("github_token: Some(\"***\")"));
        assert!(printed.contains("brave_api_key: Some(\"***\")"));
    }

    #[test]
    fn test_invalid_date_exits_with_one() {
        let err = Args::try_parse_from(["ai-digest", "2026-13-45"]).unwrap_err();
        assert_eq!(parse_error_exit_code(err.kind()), 1);

        let help = Args::try_parse_from(["ai-digest", "--help"]).unwrap_err();
        assert_eq!(parse_error_exit_code(help.kind()), 0);
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_zero_timeout() {
        let mut args = make_args();
        args.timeout = Some(0);
        assert!(args.validate().is_err());

        args.timeout = Some(10);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }

    #[test]
    fn test_blank_brave_key_is_ignored() {
        let mut args = make_args();
        args.brave_api_key = Some("  ".to_string());
        assert!(args.brave_api_key().is_none());

        args.brave_api_key = Some("key".to_string());
        assert_eq!(args.brave_api_key().as_deref(), Some("key"));
    }

    #[test]
    fn test_output_format_extension() {
        assert_eq!(OutputFormat::Markdown.extension(), "md");
        assert_eq!(OutputFormat::Json.extension(), "json");
    }
}
