//! AI news from Brave web search.

use super::pace;
use crate::client::DigestApi;
use crate::config::DigestContext;
use crate::models::{NewsItem, WebSearch};
use tracing::{error, info, warn};

/// Web searches run for the news section.
pub const NEWS_QUERIES: [&str; 6] = [
    "AI artificial intelligence breakthrough new research",
    "machine learning paper release arxiv",
    "OpenAI Anthropic Google AI Meta AI announcement",
    "LLM large language model release update",
    "computer vision breakthrough",
    "natural language processing NLP advancement",
];

/// Brave freshness filter: past day.
const FRESHNESS: &str = "pd";
const PER_QUERY: u32 = 5;
const MAX_NEWS: usize = 10;

/// Gather the day's AI news. Returns nothing when no search key is configured.
pub async fn get_ai_news(api: &dyn DigestApi, ctx: &DigestContext) -> Vec<NewsItem> {
    let Some(api_key) = ctx.brave_api_key() else {
        warn!("BRAVE_API_KEY not available - skipping web news search");
        return Vec::new();
    };

    info!("📰 Gathering AI news...");

    let mut all_news = Vec::new();
    for (i, query) in NEWS_QUERIES.iter().enumerate() {
        pace(ctx, i).await;
        let search = WebSearch {
            query: query.to_string(),
            freshness: FRESHNESS.to_string(),
            count: PER_QUERY,
        };
        match api.search_web(&search, api_key).await {
            Ok(items) => all_news.extend(items),
            Err(e) => error!("Web search error for \"{}\": {}", query, e),
        }
    }

    all_news.truncate(MAX_NEWS);
    all_news
}
