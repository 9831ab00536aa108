//! View state for the news page.
//!
//! # State Machine
//!
//! ```text
//! Loading ──fetch settles──▶ Empty ◀──term change──▶ Populated
//! ```
//!
//! `Loading` is left exactly once, when the single fetch completes, whether it
//! succeeded or not. Afterwards every term change recomputes the visible
//! subset and therefore the state. The detail overlay is orthogonal: opening
//! or closing it never touches the article list or the term.

use tracing::{debug, info, instrument, warn};

use crate::fetcher::ArticleSource;
use crate::filter::filter;
use crate::models::Article;

/// What the main area of the page shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayState {
    Loading,
    Empty,
    Populated,
}

/// State owned by the news page.
#[derive(Debug)]
pub struct NewsView {
    articles: Vec<Article>,
    term: String,
    loading: bool,
    selected: Option<Article>,
}

impl Default for NewsView {
    fn default() -> Self {
        Self::new()
    }
}

impl NewsView {
    /// A fresh view, in `Loading` until [`NewsView::load`] completes.
    pub fn new() -> Self {
        Self {
            articles: Vec::new(),
            term: String::new(),
            loading: true,
            selected: None,
        }
    }

    /// Run the one fetch this view will ever do and leave `Loading`.
    ///
    /// Calling it again after the first load is a no-op.
    #[instrument(level = "info", skip_all)]
    pub async fn load<S: ArticleSource>(&mut self, source: &S) {
        if !self.loading {
            warn!("Articles already loaded; ignoring second fetch");
            return;
        }
        let articles = source.fetch_articles().await;
        info!(count = articles.len(), "Loaded articles into view");
        self.articles = articles;
        self.loading = false;
    }

    /// Every fetched article, regardless of the search term.
    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    /// Replace the search term. The visible set follows immediately.
    pub fn set_term(&mut self, term: impl Into<String>) {
        self.term = term.into();
        debug!(term = %self.term, visible = self.visible().len(), "Search term updated");
    }

    /// Articles matching the current term, in fetch order.
    pub fn visible(&self) -> Vec<&Article> {
        filter(&self.articles, &self.term)
    }

    pub fn state(&self) -> DisplayState {
        if self.loading {
            DisplayState::Loading
        } else if self.visible().is_empty() {
            DisplayState::Empty
        } else {
            DisplayState::Populated
        }
    }

    /// Open the detail overlay for the `index`-th visible card (0-based).
    ///
    /// Returns `false`, leaving everything untouched, when no such card is
    /// currently shown.
    pub fn select(&mut self, index: usize) -> bool {
        if self.loading {
            return false;
        }
        let Some(article) = self.visible().get(index).map(|a| (*a).clone()) else {
            debug!(index, "Ignoring selection outside the visible cards");
            return false;
        };
        debug!(index, title = %article.title, "Opened detail");
        self.selected = Some(article);
        true
    }

    pub fn close_detail(&mut self) {
        self.selected = None;
    }

    /// The article shown in the detail overlay, if open.
    pub fn detail(&self) -> Option<&Article> {
        self.selected.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::HttpFetcher;
    use crate::providers::{EndpointConfig, Provider, QueryParams};
    use std::cell::Cell;
    use std::time::Duration;

    struct StaticSource {
        articles: Vec<Article>,
        calls: Cell<usize>,
    }

    impl StaticSource {
        fn new(titles: &[&str]) -> Self {
            let articles = titles
                .iter()
                .enumerate()
                .map(|(i, t)| Article {
                    title: t.to_string(),
                    description: None,
                    url: format!("https://news.test/{}", i),
                    image: None,
                    source: None,
                    published_at: None,
                })
                .collect();
            Self {
                articles,
                calls: Cell::new(0),
            }
        }
    }

    impl ArticleSource for StaticSource {
        async fn fetch_articles(&self) -> Vec<Article> {
            self.calls.set(self.calls.get() + 1);
            self.articles.clone()
        }
    }

    #[tokio::test]
    async fn test_loading_until_fetch_settles() {
        let source = StaticSource::new(&["Rain in Lisbon", "Election results"]);
        let mut view = NewsView::new();
        assert_eq!(view.state(), DisplayState::Loading);
        assert!(view.visible().is_empty());

        view.load(&source).await;
        assert_eq!(view.state(), DisplayState::Populated);
        assert_eq!(view.articles().len(), 2);
    }

    #[tokio::test]
    async fn test_term_changes_toggle_empty_and_populated() {
        let source = StaticSource::new(&["Rain in Lisbon", "Election results"]);
        let mut view = NewsView::new();
        view.load(&source).await;

        view.set_term("rain");
        assert_eq!(view.state(), DisplayState::Populated);
        assert_eq!(view.visible().len(), 1);
        assert_eq!(view.visible()[0].title, "Rain in Lisbon");

        view.set_term("snow");
        assert_eq!(view.state(), DisplayState::Empty);

        view.set_term("");
        assert_eq!(view.visible().len(), 2);
        // filtering never re-fetches
        assert_eq!(source.calls.get(), 1);
    }

    #[tokio::test]
    async fn test_load_happens_once() {
        let source = StaticSource::new(&["One"]);
        let mut view = NewsView::new();
        view.load(&source).await;
        view.load(&source).await;
        assert_eq!(source.calls.get(), 1);
    }

    #[tokio::test]
    async fn test_empty_fetch_shows_empty() {
        let source = StaticSource::new(&[]);
        let mut view = NewsView::new();
        view.load(&source).await;
        assert_eq!(view.state(), DisplayState::Empty);
    }

    #[tokio::test]
    async fn test_network_failure_shows_empty_not_error() {
        let endpoint = EndpointConfig {
            url_template: "http://127.0.0.1:9/search?api_key={api_key}".to_string(),
            ..EndpointConfig::preset(Provider::Serpapi)
        };
        let fetcher =
            HttpFetcher::new(endpoint, QueryParams::default(), Duration::from_secs(2)).unwrap();
        let mut view = NewsView::new();
        view.load(&fetcher).await;

        assert_eq!(view.state(), DisplayState::Empty);
        assert!(view.articles().is_empty());
    }

    #[tokio::test]
    async fn test_detail_is_orthogonal_to_list_state() {
        let source = StaticSource::new(&["Rain in Lisbon", "Election results"]);
        let mut view = NewsView::new();
        view.load(&source).await;
        view.set_term("election");

        assert!(view.select(0));
        assert_eq!(view.detail().unwrap().title, "Election results");
        assert_eq!(view.state(), DisplayState::Populated);
        assert_eq!(view.term(), "election");

        // the overlay survives a term change that hides its card
        view.set_term("rain");
        assert_eq!(view.detail().unwrap().title, "Election results");

        view.close_detail();
        assert!(view.detail().is_none());
        assert_eq!(view.visible()[0].title, "Rain in Lisbon");
    }

    #[tokio::test]
    async fn test_select_out_of_range_is_rejected() {
        let source = StaticSource::new(&["Only"]);
        let mut view = NewsView::new();
        assert!(!view.select(0));

        view.load(&source).await;
        assert!(!view.select(1));
        assert!(view.detail().is_none());
        assert!(view.select(0));
    }
}
