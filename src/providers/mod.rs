//! News search endpoints and their article-shape adapters.
//!
//! One fetcher serves every provider. What differs between them is captured
//! in an [`EndpointConfig`]:
//!
//! 1. **URL template**: where to send the request, with `{api_key}`,
//!    `{query}`, `{language}`, `{country}` and `{sort_by}` placeholders
//! 2. **Article fields**: which top-level JSON array holds the articles
//! 3. **Shape**: how one array element maps onto an [`Article`]
//!
//! # Supported Providers
//!
//! | Provider | Module | Array field | Key variable |
//! |----------|--------|-------------|--------------|
//! | SerpApi Google News | [`serpapi`] | `articles` / `news_results` | `SERPAPI_KEY` |
//! | Currents | [`currents`] | `news` | `NEXT_PUBLIC_CURRENTS_API_KEY` |
//! | NewsAPI | [`newsapi`] | `articles` | `NEXT_PUBLIC_NEWS_API_KEY` |
//!
//! Custom endpoints can be described in YAML and loaded with
//! [`EndpointConfig::from_yaml_file`].

use clap::ValueEnum;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::ConfigError;
use crate::models::Article;
use crate::utils::{parse_timestamp, strip_html};

pub mod currents;
pub mod newsapi;
pub mod serpapi;

/// Built-in endpoint presets selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Provider {
    Serpapi,
    Currents,
    Newsapi,
}

/// Adapter that turns one provider JSON item into an [`Article`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArticleShape {
    NewsApi,
    Currents,
    SerpApi,
}

impl ArticleShape {
    /// Map one element of the article array. Items without a title or link
    /// yield `None`.
    pub fn adapt(self, item: &Value) -> Option<Article> {
        match self {
            ArticleShape::NewsApi => newsapi::adapt(item),
            ArticleShape::Currents => currents::adapt(item),
            ArticleShape::SerpApi => serpapi::adapt(item),
        }
    }
}

/// Everything the fetcher needs to know about one news endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EndpointConfig {
    /// Request URL with placeholders.
    pub url_template: String,
    /// Candidate top-level array fields, first match wins.
    pub articles_fields: Vec<String>,
    pub shape: ArticleShape,
    /// Environment variable holding the API key.
    #[serde(default)]
    pub api_key_env: Option<String>,
}

/// Values substituted into an endpoint's URL template.
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    pub api_key: String,
    pub query: String,
    pub language: String,
    pub country: String,
    pub sort_by: String,
}

impl EndpointConfig {
    pub fn preset(provider: Provider) -> Self {
        match provider {
            Provider::Serpapi => serpapi::endpoint(),
            Provider::Currents => currents::endpoint(),
            Provider::Newsapi => newsapi::endpoint(),
        }
    }

    /// Load a custom endpoint description from a YAML file.
    ///
    /// ```yaml
    /// url_template: "https://example.test/v2/everything?q={query}&apiKey={api_key}"
    /// articles_fields: [articles]
    /// shape: news_api
    /// api_key_env: EXAMPLE_NEWS_KEY
    /// ```
    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })
    }

    /// Fill the URL template. Every value is percent-encoded.
    pub fn build_url(&self, params: &QueryParams) -> Result<Url, url::ParseError> {
        let filled = self
            .url_template
            .replace("{api_key}", &urlencoding::encode(&params.api_key))
            .replace("{query}", &urlencoding::encode(&params.query))
            .replace("{language}", &urlencoding::encode(&params.language))
            .replace("{country}", &urlencoding::encode(&params.country))
            .replace("{sort_by}", &urlencoding::encode(&params.sort_by));
        Url::parse(&filled)
    }

    /// Pull the article array out of a response body.
    ///
    /// Returns `None` when none of the candidate fields is a JSON array, which
    /// callers treat the same as "no articles".
    pub fn extract_articles(&self, body: &Value) -> Option<Vec<Article>> {
        let (field, items) = self
            .articles_fields
            .iter()
            .find_map(|f| body.get(f).and_then(Value::as_array).map(|a| (f, a)))?;

        let articles: Vec<Article> = items.iter().filter_map(|i| self.shape.adapt(i)).collect();
        let skipped = items.len() - articles.len();
        if skipped > 0 {
            debug!(%field, skipped, "Dropped items without title or link");
        }
        Some(articles)
    }
}

/// `source` as sent by providers: either a bare name or `{ "name": ... }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawSource {
    Name(String),
    Object { name: Option<String> },
}

impl RawSource {
    pub(crate) fn into_name(self) -> Option<String> {
        match self {
            RawSource::Name(name) => clean(Some(name)),
            RawSource::Object { name } => clean(name),
        }
    }
}

/// Trim a text field; empty strings and placeholder values become `None`.
pub(crate) fn clean(value: Option<String>) -> Option<String> {
    let value = value?;
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") || trimmed == "null" {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Assemble an [`Article`] from already-extracted raw fields.
pub(crate) fn build_article(
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    image: Option<String>,
    source: Option<String>,
    published: Option<String>,
) -> Option<Article> {
    Some(Article {
        title: clean(title)?,
        url: clean(url)?,
        description: clean(description.map(|d| strip_html(&d))),
        image: clean(image),
        source,
        published_at: published.as_deref().and_then(parse_timestamp),
    })
}
