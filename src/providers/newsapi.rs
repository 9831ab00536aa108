//! [NewsAPI](https://newsapi.org) top headlines.
//!
//! Items look like:
//!
//! ```json
//! { "source": { "id": null, "name": "BBC News" }, "title": "...",
//!   "description": "...", "url": "...", "urlToImage": "...",
//!   "publishedAt": "2025-05-06T14:30:00Z" }
//! ```

use serde::Deserialize;
use serde_json::Value;

use super::{build_article, ArticleShape, EndpointConfig, RawSource};
use crate::models::Article;

pub fn endpoint() -> EndpointConfig {
    EndpointConfig {
        url_template:
            "https://newsapi.org/v2/top-headlines?country={country}&sortBy={sort_by}&apiKey={api_key}"
                .to_string(),
        articles_fields: vec!["articles".to_string()],
        shape: ArticleShape::NewsApi,
        api_key_env: Some("NEXT_PUBLIC_NEWS_API_KEY".to_string()),
    }
}

#[allow(non_snake_case)]
#[derive(Debug, Deserialize)]
struct RawArticle {
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    urlToImage: Option<String>,
    source: Option<RawSource>,
    publishedAt: Option<String>,
}

pub(super) fn adapt(item: &Value) -> Option<Article> {
    let raw = RawArticle::deserialize(item).ok()?;
    build_article(
        raw.title,
        raw.description,
        raw.url,
        raw.urlToImage,
        raw.source.and_then(RawSource::into_name),
        raw.publishedAt,
    )
}
