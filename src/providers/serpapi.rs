//! [SerpApi](https://serpapi.com) Google News engine.
//!
//! Google News results arrive under `news_results` with `link`, `snippet`,
//! `thumbnail` and a `date` like `05/06/2025, 02:30 PM, +0000 UTC`. Older
//! responses (and proxies in front of SerpApi) use an `articles` array in the
//! NewsAPI layout, so both field sets are accepted.

use serde::Deserialize;
use serde_json::Value;

use super::{build_article, ArticleShape, EndpointConfig, RawSource};
use crate::models::Article;

pub fn endpoint() -> EndpointConfig {
    EndpointConfig {
        url_template: "https://serpapi.com/search.json?engine=google_news&q={query}&gl={country}&hl={language}&api_key={api_key}"
            .to_string(),
        articles_fields: vec!["articles".to_string(), "news_results".to_string()],
        shape: ArticleShape::SerpApi,
        api_key_env: Some("SERPAPI_KEY".to_string()),
    }
}

// Both layouts can appear in the same item, so each name gets its own field
// (serde aliases reject an item that carries both).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArticle {
    title: Option<String>,
    snippet: Option<String>,
    description: Option<String>,
    link: Option<String>,
    url: Option<String>,
    thumbnail: Option<String>,
    url_to_image: Option<String>,
    source: Option<RawSource>,
    date: Option<String>,
    published_at: Option<String>,
}

pub(super) fn adapt(item: &Value) -> Option<Article> {
    let raw = RawArticle::deserialize(item).ok()?;
    build_article(
        raw.title,
        raw.snippet.or(raw.description),
        raw.link.or(raw.url),
        raw.thumbnail.or(raw.url_to_image),
        raw.source.and_then(RawSource::into_name),
        raw.date.or(raw.published_at),
    )
}
