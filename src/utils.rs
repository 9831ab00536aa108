//! Helpers for text layout, timestamp parsing, log hygiene and file output.
//!
//! - Word wrapping and line clamping for card rendering
//! - HTML tag stripping for provider snippets
//! - Lenient timestamp parsing across provider date formats
//! - API key redaction and truncation for logging
//! - Output directory validation

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument};

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));
static SPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid space regex"));
static KEY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)((?:api_?key|apikey)=)[^&]*").expect("valid key regex")
});

/// Truncate a string for logging purposes.
///
/// Long strings are cut at `max` characters with an ellipsis and a byte count
/// of what was dropped.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}…(+{} bytes)", &s[..cut], s.len() - cut),
    }
}

/// Replace the value of any `api_key` / `apiKey` query parameter with `***`.
pub fn redact_api_key(url: &str) -> String {
    KEY_RE.replace_all(url, "${1}***").into_owned()
}

/// Remove HTML tags and collapse runs of whitespace.
pub fn strip_html(s: &str) -> String {
    let without_tags = TAG_RE.replace_all(s, " ");
    SPACE_RE.replace_all(without_tags.trim(), " ").into_owned()
}

/// Parse a provider timestamp.
///
/// Accepted formats:
/// - RFC 3339 (`2025-05-06T14:30:00Z`), used by NewsAPI
/// - `2025-05-06 14:30:00 +0000`, used by Currents
/// - `05/06/2025, 02:30 PM, +0000 UTC`, used by SerpApi Google News
/// - a bare `2025-05-06 14:30:00`, taken as UTC
///
/// Anything else yields `None`.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts);
    }
    if let Ok(ts) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S %z") {
        return Some(ts);
    }
    let serp = raw.trim_end_matches(" UTC");
    if let Ok(ts) = DateTime::parse_from_str(serp, "%m/%d/%Y, %I:%M %p, %z") {
        return Some(ts);
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc().fixed_offset())
}

/// Greedy word wrap to `width` characters.
///
/// Words longer than `width` are hard-split. Returns at least one line.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let mut chars: Vec<char> = word.chars().collect();
        while chars.len() > width {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = chars.split_off(width);
            lines.push(chars.into_iter().collect());
            chars = rest;
        }
        let word_len = chars.len();
        if word_len == 0 {
            continue;
        }
        if current_len > 0 && current_len + 1 + word_len > width {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.extend(chars);
        current_len += word_len;
    }

    if current_len > 0 || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Wrap `text` and keep at most `max_lines`, marking the cut with `…`.
pub fn clamp_lines(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    let mut lines = wrap_text(text, width);
    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            let keep = width.saturating_sub(1);
            let mut cut: String = last.chars().take(keep).collect();
            cut.push('…');
            *last = cut;
        }
    }
    lines
}

/// Pad or cut `s` to exactly `width` characters.
pub fn fit_width(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        s.chars().take(width).collect()
    } else {
        format!("{}{}", s, " ".repeat(width - len))
    }
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if needed, then writes and removes a probe file.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(path).await?;
    let probe_path = format!("{}/..__probe_write__", path.trim_end_matches('/'));
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_truncate_for_log_short_string() {
        assert_eq!(truncate_for_log("Hello, world!", 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_multibyte() {
        let result = truncate_for_log("notícias hoje", 4);
        assert!(result.starts_with("notí…"));
    }

    #[test]
    fn test_redact_api_key() {
        assert_eq!(
            redact_api_key("https://serpapi.com/search.json?q=news&api_key=secret"),
            "https://serpapi.com/search.json?q=news&api_key=***"
        );
        assert_eq!(
            redact_api_key("https://x.test/v1?apiKey=abc&language=en"),
            "https://x.test/v1?apiKey=***&language=en"
        );
        assert_eq!(redact_api_key("https://x.test/v1"), "https://x.test/v1");
    }

    #[test]
    fn test_strip_html() {
        assert_eq!(
            strip_html("<b>Storm</b> hits   the <a href=\"x\">coast</a>"),
            "Storm hits the coast"
        );
        assert_eq!(strip_html("plain"), "plain");
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let rfc = parse_timestamp("2025-05-06T14:30:00Z").unwrap();
        assert_eq!((rfc.year(), rfc.month(), rfc.day()), (2025, 5, 6));

        let currents = parse_timestamp("2025-05-06 14:30:00 +0000").unwrap();
        assert_eq!(currents.hour(), 14);

        let serp = parse_timestamp("05/06/2025, 02:30 PM, +0000 UTC").unwrap();
        assert_eq!((serp.month(), serp.day(), serp.hour()), (5, 6, 14));

        let naive = parse_timestamp("2025-05-06 14:30:00").unwrap();
        assert_eq!(naive.offset().local_minus_utc(), 0);

        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_wrap_text() {
        assert_eq!(
            wrap_text("the quick brown fox", 9),
            vec!["the quick", "brown fox"]
        );
        assert_eq!(wrap_text("", 10), vec![""]);
        assert_eq!(wrap_text("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_clamp_lines() {
        let lines = clamp_lines("one two three four five six", 9, 2);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "one two");
        assert!(lines[1].ends_with('…'));
        assert!(lines[1].chars().count() <= 9);
    }

    #[test]
    fn test_fit_width() {
        assert_eq!(fit_width("abc", 5), "abc  ");
        assert_eq!(fit_width("abcdef", 3), "abc");
        assert_eq!(fit_width("ção", 3), "ção");
    }

    #[tokio::test]
    async fn test_ensure_writable_dir_creates_missing() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b");
        let path = nested.to_str().unwrap();
        ensure_writable_dir(path).await.unwrap();
        assert!(nested.is_dir());
    }
}
