//! Formatting helpers for article cards and log output.
//!
//! This module provides:
//! - Relative publication age ("5m ago", "3d ago", "Jan 5")
//! - Source-name cleanup for card bylines
//! - String truncation for headings and log previews

use chrono::{DateTime, Datelike, TimeZone};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::Display;

use crate::models::Source;

const MINUTE_MS: i64 = 60 * 1000;
const HOUR_MS: i64 = 60 * MINUTE_MS;

static TRAILING_DOT_COM: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.com$").unwrap());
static LEADING_THE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^The ").unwrap());

/// Describe how long ago `published` was, relative to `now`.
///
/// All buckets use integer-truncating division of the elapsed milliseconds:
///
/// | Elapsed        | Output            |
/// |----------------|-------------------|
/// | < 1 minute     | `Just now`        |
/// | < 1 hour       | `{m}m ago`        |
/// | < 24 hours     | `{h}h ago`        |
/// | < 7 days       | `{d}d ago`        |
/// | otherwise      | `Jan 5` / `Jan 5, 2023` |
///
/// The year is only shown when it differs from `now`'s year. Timestamps in
/// the future count as "Just now".
///
/// # Examples
///
/// ```ignore
/// let now = Utc::now();
/// assert_eq!(relative_age(&(now - Duration::seconds(30)), &now), "Just now");
/// assert_eq!(relative_age(&(now - Duration::hours(23)), &now), "23h ago");
/// ```
pub fn relative_age<Tz>(published: &DateTime<Tz>, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let elapsed_ms = now
        .clone()
        .signed_duration_since(published.clone())
        .num_milliseconds();
    let hours = elapsed_ms / HOUR_MS;
    let days = hours / 24;

    if hours < 1 {
        let minutes = elapsed_ms / MINUTE_MS;
        if minutes < 1 {
            "Just now".to_string()
        } else {
            format!("{minutes}m ago")
        }
    } else if hours < 24 {
        format!("{hours}h ago")
    } else if days < 7 {
        format!("{days}d ago")
    } else if published.year() != now.year() {
        published.format("%b %-d, %Y").to_string()
    } else {
        published.format("%b %-d").to_string()
    }
}

/// Clean up an outlet name for display.
///
/// Strips a trailing `.com` and a leading `"The "`, then trims whitespace.
/// Missing or empty names become `"Unknown Source"`.
pub fn format_source_name(source: Option<&Source>) -> String {
    let Some(name) = source.and_then(|s| s.name.as_deref()) else {
        return "Unknown Source".to_string();
    };
    if name.is_empty() {
        return "Unknown Source".to_string();
    }
    let name = TRAILING_DOT_COM.replace(name, "");
    let name = LEADING_THE.replace(&name, "");
    name.trim().to_string()
}

/// Shorten a label to `max` characters, appending `...` when cut.
pub fn truncate_label(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max).collect();
        format!("{head}...")
    }
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to `max` bytes (backing off to a char boundary) with
/// an ellipsis and a count of the omitted bytes appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}
