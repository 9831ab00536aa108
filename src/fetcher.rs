//! The single outbound request that populates the view.
//!
//! # Architecture
//!
//! - [`ArticleSource`]: what the view awaits on start-up
//! - [`HttpFetcher`]: the real implementation, one GET against an
//!   [`EndpointConfig`]
//!
//! # Failure Policy
//!
//! Every failure (network, non-2xx status, invalid JSON, bad URL) is logged and
//! collapses into an empty article list. There is no retry and no partial
//! result, and a response without the expected array field also counts as
//! "no articles".

use reqwest::Client;
use serde_json::Value;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{error, info, instrument, warn};

use crate::error::FetchError;
use crate::models::Article;
use crate::providers::{EndpointConfig, QueryParams};
use crate::utils::{redact_api_key, truncate_for_log};

/// Something the view can load its articles from.
///
/// Implementations must never fail: any problem resolves to an empty list.
pub trait ArticleSource {
    async fn fetch_articles(&self) -> Vec<Article>;
}

/// Fetches articles over HTTP from one configured endpoint.
pub struct HttpFetcher {
    client: Client,
    endpoint: EndpointConfig,
    params: QueryParams,
}

impl HttpFetcher {
    /// Build a fetcher with a request timeout.
    ///
    /// The API key inside `params` is not checked; a missing key surfaces as
    /// an API error at fetch time.
    pub fn new(
        endpoint: EndpointConfig,
        params: QueryParams,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            endpoint,
            params,
        })
    }

    /// Perform the request and decode the article array.
    #[instrument(level = "debug", skip_all)]
    async fn try_fetch(&self) -> Result<Vec<Article>, FetchError> {
        let url = self.endpoint.build_url(&self.params)?;
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: redact_api_key(&truncate_for_log(&body, 300)),
            });
        }

        let value: Value = serde_json::from_str(&body)?;
        match self.endpoint.extract_articles(&value) {
            Some(articles) => Ok(articles),
            None => {
                warn!(
                    candidates = ?self.endpoint.articles_fields,
                    response_preview = %truncate_for_log(&body, 300),
                    "Response has no article array; treating as empty"
                );
                Ok(Vec::new())
            }
        }
    }

    fn redacted_url(&self) -> String {
        match self.endpoint.build_url(&self.params) {
            Ok(url) => redact_api_key(url.as_str()),
            Err(_) => redact_api_key(&self.endpoint.url_template),
        }
    }
}

// Hand-written so the API key in `params` never reaches the logs.
impl fmt::Debug for HttpFetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpFetcher")
            .field("endpoint", &self.endpoint)
            .field("query", &self.params.query)
            .field("has_api_key", &!self.params.api_key.is_empty())
            .finish()
    }
}

impl ArticleSource for HttpFetcher {
    #[instrument(level = "info", skip_all, fields(url = %self.redacted_url()))]
    async fn fetch_articles(&self) -> Vec<Article> {
        let t0 = Instant::now();
        let res = self.try_fetch().await;
        let elapsed_ms = t0.elapsed().as_millis();

        match res {
            Ok(articles) => {
                info!(count = articles.len(), elapsed_ms, "Fetched articles");
                articles
            }
            Err(e) => {
                error!(elapsed_ms, error = %e, "Failed to fetch news");
                Vec::new()
            }
        }
    }
}
