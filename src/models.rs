//! Data model for articles shown in the view.
//!
//! Every provider has its own wire format (see [`crate::providers`]); the
//! adapters normalize each item into a single [`Article`] so the filter and
//! renderer never see provider-specific shapes.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A news article as held by the view.
///
/// Produced by an endpoint adapter from one element of the API's article
/// array. The list of articles is only ever replaced wholesale by a fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Headline. Used for display and filtering.
    pub title: String,
    /// Short summary or snippet, if the provider sent one.
    pub description: Option<String>,
    /// Link to the full story.
    pub url: String,
    /// Link to a lead image.
    pub image: Option<String>,
    /// Publisher name, normalized from whatever shape the provider uses.
    pub source: Option<String>,
    /// Publication timestamp, if present and parseable.
    pub published_at: Option<DateTime<FixedOffset>>,
}

impl Article {
    /// Source name to display on a card.
    ///
    /// Falls back to the registrable part of the link's host, e.g.
    /// `"https://www.bbc.co.uk/news/1"` -> `"bbc"`, when the provider did not
    /// name a source.
    pub fn source_label(&self) -> String {
        if let Some(name) = self.source.as_deref().filter(|s| !s.trim().is_empty()) {
            return name.trim().to_string();
        }
        self.host_tag().unwrap_or_else(|| "Unknown source".to_string())
    }

    fn host_tag(&self) -> Option<String> {
        let parsed = url::Url::parse(&self.url).ok()?;
        let host = parsed.host_str()?;
        let mut parts: Vec<&str> = host.split('.').collect();
        if parts.len() >= 2 {
            // drop the TLD, then a second-level suffix such as "co" in "co.uk"
            parts.pop();
            let second_level = matches!(
                parts[parts.len() - 1],
                "co" | "com" | "org" | "net" | "gov" | "ac"
            );
            if parts.len() >= 2 && second_level {
                parts.pop();
            }
        }
        parts.last().map(|p| p.to_string())
    }

    /// Publication date as `YYYY-MM-DD`, if known.
    pub fn published_date(&self) -> Option<String> {
        self.published_at
            .map(|ts| ts.date_naive().format("%Y-%m-%d").to_string())
    }
}
