//! Client-side search over the fetched articles.

use crate::models::Article;

/// Articles whose title contains `term`, ignoring case, in their original order.
///
/// An empty term matches everything. Recomputed from the full list on every
/// term change; nothing is cached.
pub fn filter<'a>(articles: &'a [Article], term: &str) -> Vec<&'a Article> {
    if term.is_empty() {
        return articles.iter().collect();
    }
    let needle = term.to_lowercase();
    articles
        .iter()
        .filter(|a| a.title.to_lowercase().contains(&needle))
        .collect()
}
