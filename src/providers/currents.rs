//! [Currents API](https://currentsapi.services) latest news.
//!
//! The response carries its articles under `news`. Items have no source
//! field, so the author stands in for it; `image` is often the literal
//! string `"None"`.

use serde::Deserialize;
use serde_json::Value;

use super::{build_article, clean, ArticleShape, EndpointConfig, RawSource};
use crate::models::Article;

pub fn endpoint() -> EndpointConfig {
    EndpointConfig {
        url_template:
            "https://api.currentsapi.services/v1/latest-news?language={language}&apiKey={api_key}"
                .to_string(),
        articles_fields: vec!["news".to_string()],
        shape: ArticleShape::Currents,
        api_key_env: Some("NEXT_PUBLIC_CURRENTS_API_KEY".to_string()),
    }
}

#[derive(Debug, Deserialize)]
struct RawArticle {
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    image: Option<String>,
    author: Option<String>,
    source: Option<RawSource>,
    published: Option<String>,
}

pub(super) fn adapt(item: &Value) -> Option<Article> {
    let raw = RawArticle::deserialize(item).ok()?;
    let source = raw
        .source
        .and_then(RawSource::into_name)
        .or_else(|| clean(raw.author));
    build_article(
        raw.title,
        raw.description,
        raw.url,
        raw.image,
        source,
        raw.published,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use serde_json::json;

    #[test]
    fn test_adapt_currents_item() {
        let item = json!({
            "id": "abc",
            "title": "Rain in Lisbon",
            "description": "Heavy rain expected.",
            "url": "https://currents.test/rain",
            "author": "Lusa",
            "image": "None",
            "language": "en",
            "category": ["world"],
            "published": "2025-05-06 09:15:00 +0000"
        });
        let article = adapt(&item).unwrap();
        assert_eq!(article.source.as_deref(), Some("Lusa"));
        assert!(article.image.is_none());
        assert_eq!(article.published_at.unwrap().hour(), 9);
    }

    #[test]
    fn test_adapt_plain_text_source_wins_over_author() {
        let item = json!({
            "title": "Election results",
            "url": "https://currents.test/vote",
            "author": "Staff",
            "source": "Público"
        });
        let article = adapt(&item).unwrap();
        assert_eq!(article.source.as_deref(), Some("Público"));
    }
}
