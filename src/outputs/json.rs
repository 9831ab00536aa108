//! JSON export of the articles currently on screen.
//!
//! # Output Structure
//!
//! ```text
//! json_output_dir/
//! └── 2025-05-06/
//!     └── articles.json
//! ```
//!
//! A later export on the same day overwrites the file.

use chrono::Local;
use serde::Serialize;
use std::error::Error;
use tokio::fs;
use tracing::{error, info, instrument};

use crate::models::Article;

/// What gets written: when, for which term, and the visible articles.
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    /// Export date in `YYYY-MM-DD` format.
    pub local_date: String,
    /// Export time in `HH:MM:SS` format.
    pub local_time: String,
    pub search_term: &'a str,
    pub articles: &'a [&'a Article],
}

/// Write the visible articles to `{json_output_dir}/{date}/articles.json`.
///
/// Returns the path written.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir))]
pub async fn write_snapshot(
    articles: &[&Article],
    search_term: &str,
    json_output_dir: &str,
) -> Result<String, Box<dyn Error>> {
    let now = Local::now();
    let snapshot = Snapshot {
        local_date: now.date_naive().to_string(),
        local_time: now.time().format("%H:%M:%S").to_string(),
        search_term,
        articles,
    };
    let json = serde_json::to_string_pretty(&snapshot)?;

    let full_json_dir = format!(
        "{}/{}",
        json_output_dir.trim_end_matches('/'),
        snapshot.local_date
    );
    info!(%full_json_dir, "Ensuring JSON directory exists");
    if let Err(e) = fs::create_dir_all(&full_json_dir).await {
        error!(%full_json_dir, error = %e, "Failed to create JSON dir");
        return Err(e.into());
    }

    let output_json_filename = format!("{}/articles.json", full_json_dir);
    fs::write(&output_json_filename, json).await?;
    info!(path = %output_json_filename, count = articles.len(), "Wrote articles JSON");

    Ok(output_json_filename)
}
