//! Plain-text rendering of the news page.
//!
//! # Layout
//!
//! ```text
//! NEWS TODAY                                      Search: rain
//! ══════════════════════════════════════════════════════════════
//! ┌────────────────────────────┐  ┌────────────────────────────┐
//! │ [1] Rain in Lisbon         │  │ [2] Rain returns to Porto  │
//! │ ...                        │  │ ...                        │
//! └────────────────────────────┘  └────────────────────────────┘
//! ```
//!
//! The main area shows exactly one of the loading line, the empty line, or the
//! card grid. When the detail overlay is open it replaces the main area; the
//! header stays.

use itertools::Itertools;

use crate::models::Article;
use crate::utils::{clamp_lines, fit_width, wrap_text};
use crate::view::{DisplayState, NewsView};

const PAGE_TITLE: &str = "NEWS TODAY";
const LOADING_TEXT: &str = "Loading news...";
const EMPTY_TEXT: &str = "No news found";
const CARD_GAP: usize = 2;
const TITLE_LINES: usize = 2;
const DESCRIPTION_LINES: usize = 3;
/// Narrowest card that still fits an index marker and a few words.
const MIN_CARD_WIDTH: usize = 24;

/// Layout settings for [`render_page`].
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Cards per grid row, 1 to 3.
    pub columns: usize,
    /// Total page width in characters.
    pub width: usize,
    /// Text for the static advertising placeholder, if any.
    pub ad_slot: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            columns: 2,
            width: 100,
            ad_slot: None,
        }
    }
}

impl RenderOptions {
    /// Columns actually used: fewer when the page is too narrow.
    fn effective_columns(&self) -> usize {
        let fit = (self.width + CARD_GAP) / (MIN_CARD_WIDTH + CARD_GAP);
        self.columns.clamp(1, 3).min(fit.max(1))
    }

    fn card_width(&self) -> usize {
        let cols = self.effective_columns();
        let gaps = CARD_GAP * (cols - 1);
        (self.width.saturating_sub(gaps) / cols).max(MIN_CARD_WIDTH)
    }
}

/// Render the whole page for the view's current state.
pub fn render_page(view: &NewsView, opts: &RenderOptions) -> String {
    let mut lines = header_lines(view.term(), opts.width);

    if let Some(ad) = &opts.ad_slot {
        lines.extend(ad_slot_lines(ad, opts.width));
    }
    lines.push(String::new());

    if let Some(article) = view.detail() {
        lines.extend(detail_lines(article, opts.width));
        return lines.join("\n");
    }

    match view.state() {
        DisplayState::Loading => lines.push(centered(LOADING_TEXT, opts.width)),
        DisplayState::Empty => lines.push(centered(EMPTY_TEXT, opts.width)),
        DisplayState::Populated => lines.extend(grid_lines(&view.visible(), opts)),
    }
    lines.join("\n")
}

fn header_lines(term: &str, width: usize) -> Vec<String> {
    let search = format!("Search: {}", term);
    let used = PAGE_TITLE.chars().count() + search.chars().count();
    let header = if used < width {
        format!("{}{}{}", PAGE_TITLE, " ".repeat(width - used), search)
    } else {
        format!("{}  {}", PAGE_TITLE, search)
    };
    vec![header, "═".repeat(width)]
}

fn ad_slot_lines(text: &str, width: usize) -> Vec<String> {
    let inner = width.saturating_sub(4).max(1);
    let mut lines = vec![format!("┌{}┐", "╌".repeat(inner + 2))];
    lines.push(format!("│ {} │", fit_width(&centered("Advertisement", inner), inner)));
    for line in wrap_text(text, inner) {
        lines.push(format!("│ {} │", fit_width(&centered(&line, inner), inner)));
    }
    lines.push(format!("└{}┘", "╌".repeat(inner + 2)));
    lines
}

fn centered(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", " ".repeat(width.saturating_sub(len) / 2), text)
}

/// Lay out cards in rows of `columns`, numbering them from 1.
fn grid_lines(articles: &[&Article], opts: &RenderOptions) -> Vec<String> {
    let card_width = opts.card_width();
    let gap = " ".repeat(CARD_GAP);
    let mut lines = Vec::new();

    for (row_idx, row) in articles.chunks(opts.effective_columns()).enumerate() {
        let cards: Vec<Vec<String>> = row
            .iter()
            .enumerate()
            .map(|(i, a)| card_lines(a, row_idx * opts.effective_columns() + i + 1, card_width))
            .collect();
        let height = cards.iter().map(Vec::len).max().unwrap_or(0);
        for line_idx in 0..height {
            let joined = cards
                .iter()
                .map(|c| c.get(line_idx).cloned().unwrap_or_else(|| " ".repeat(card_width)))
                .join(&gap);
            lines.push(joined.trim_end().to_string());
        }
        lines.push(String::new());
    }
    lines
}

/// One bordered card, every line exactly `width` characters.
fn card_lines(article: &Article, number: usize, width: usize) -> Vec<String> {
    let inner = width.saturating_sub(4);
    let mut body = Vec::new();

    let title = format!("[{}] {}", number, article.title);
    body.extend(padded(clamp_lines(&title, inner, TITLE_LINES), TITLE_LINES));

    let description = article.description.as_deref().unwrap_or("");
    body.extend(padded(
        clamp_lines(description, inner, DESCRIPTION_LINES),
        DESCRIPTION_LINES,
    ));

    body.push(if article.image.is_some() {
        "[image]".to_string()
    } else {
        String::new()
    });
    body.push(article.source_label());
    body.push(format!("Read more: {}", article.url));

    let mut lines = vec![format!("┌{}┐", "─".repeat(inner + 2))];
    lines.extend(body.iter().map(|l| format!("│ {} │", fit_width(l, inner))));
    lines.push(format!("└{}┘", "─".repeat(inner + 2)));
    lines
}

fn padded(mut lines: Vec<String>, height: usize) -> Vec<String> {
    lines.resize(height, String::new());
    lines
}

/// The detail overlay for one article.
pub fn detail_lines(article: &Article, width: usize) -> Vec<String> {
    let inner = width.saturating_sub(4).max(MIN_CARD_WIDTH);
    let mut body = Vec::new();

    body.push(fit_width("[x] close with :close", inner));
    body.push(String::new());
    body.extend(wrap_text(&article.title.to_uppercase(), inner));
    body.push(String::new());

    let source = article.source_label();
    let date = article.published_date().unwrap_or_default();
    let used = source.chars().count() + date.chars().count();
    body.push(if used < inner {
        format!("{}{}{}", source, " ".repeat(inner - used), date)
    } else {
        format!("{} {}", source, date)
    });
    body.push(String::new());

    if let Some(description) = &article.description {
        body.extend(wrap_text(description, inner));
        body.push(String::new());
    }
    if let Some(image) = &article.image {
        body.push(format!("Image: {}", image));
    }
    body.push(format!("Read the full article: {}", article.url));

    let mut lines = vec![format!("╔{}╗", "═".repeat(inner + 2))];
    lines.extend(body.iter().map(|l| format!("║ {} ║", fit_width(l, inner))));
    lines.push(format!("╚{}╝", "═".repeat(inner + 2)));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::ArticleSource;
    use chrono::DateTime;

    struct Fixed(Vec<Article>);

    impl ArticleSource for Fixed {
        async fn fetch_articles(&self) -> Vec<Article> {
            self.0.clone()
        }
    }

    fn article(title: &str) -> Article {
        Article {
            title: title.to_string(),
            description: Some("A longer description of what happened today.".to_string()),
            url: format!("https://news.test/{}", title.len()),
            image: Some("https://news.test/img.jpg".to_string()),
            source: Some("Público".to_string()),
            published_at: DateTime::parse_from_rfc3339("2025-05-06T09:00:00Z").ok(),
        }
    }

    async fn loaded(titles: &[&str]) -> NewsView {
        let mut view = NewsView::new();
        view.load(&Fixed(titles.iter().map(|t| article(t)).collect())).await;
        view
    }

    #[test]
    fn test_render_loading() {
        let page = render_page(&NewsView::new(), &RenderOptions::default());
        assert!(page.starts_with(PAGE_TITLE));
        assert!(page.contains(LOADING_TEXT));
        assert!(!page.contains(EMPTY_TEXT));
    }

    #[tokio::test]
    async fn test_render_empty_after_search() {
        let mut view = loaded(&["Rain in Lisbon"]).await;
        view.set_term("snow");
        let page = render_page(&view, &RenderOptions::default());
        assert!(page.contains("Search: snow"));
        assert!(page.contains(EMPTY_TEXT));
        assert!(!page.contains("Rain in Lisbon"));
    }

    #[tokio::test]
    async fn test_render_grid_rows() {
        let view = loaded(&["Rain in Lisbon", "Election results", "Markets rally"]).await;
        let opts = RenderOptions {
            columns: 2,
            width: 80,
            ad_slot: None,
        };
        let page = render_page(&view, &opts);
        let first_row = page
            .lines()
            .find(|l| l.contains("[1] Rain in Lisbon"))
            .unwrap();
        assert!(first_row.contains("[2] Election results"));
        assert!(page.contains("[3] Markets rally"));
        assert!(page.contains("Read more: https://news.test/"));
        assert!(page.contains("[image]"));
        assert!(page.contains("Público"));
        for line in page.lines().skip(1) {
            assert!(line.chars().count() <= 80, "line too wide: {:?}", line);
        }
    }

    #[test]
    fn test_card_clamps_title_and_description() {
        let mut a = article("word ".repeat(40).trim());
        a.description = Some("text ".repeat(80));
        let lines = card_lines(&a, 1, 30);
        assert_eq!(lines.len(), 2 + TITLE_LINES + DESCRIPTION_LINES + 3);
        assert!(lines.iter().all(|l| l.chars().count() == 30));
        assert!(lines[2].contains('…'));
    }

    #[test]
    fn test_effective_columns_narrow_page() {
        let opts = RenderOptions {
            columns: 3,
            width: 40,
            ad_slot: None,
        };
        assert_eq!(opts.effective_columns(), 1);
        let opts = RenderOptions {
            columns: 9,
            width: 200,
            ad_slot: None,
        };
        assert_eq!(opts.effective_columns(), 3);
    }

    #[tokio::test]
    async fn test_render_detail_overlay() {
        let mut view = loaded(&["Rain in Lisbon", "Election results"]).await;
        assert!(view.select(1));
        let page = render_page(&view, &RenderOptions::default());
        assert!(page.contains("ELECTION RESULTS"));
        assert!(page.contains("2025-05-06"));
        assert!(page.contains("Read the full article: https://news.test/"));
        assert!(page.contains("Image: https://news.test/img.jpg"));
        assert!(!page.contains("[1] Rain in Lisbon"));

        view.close_detail();
        let page = render_page(&view, &RenderOptions::default());
        assert!(page.contains("[1] Rain in Lisbon"));
    }

    #[tokio::test]
    async fn test_render_ad_slot() {
        let view = loaded(&["Rain in Lisbon"]).await;
        let opts = RenderOptions {
            ad_slot: Some("Your banner here".to_string()),
            ..Default::default()
        };
        let page = render_page(&view, &opts);
        assert!(page.contains("Advertisement"));
        assert!(page.contains("Your banner here"));
    }
}
