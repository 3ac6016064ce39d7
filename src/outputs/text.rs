//! Plain-text rendering of article cards.
//!
//! A card looks like:
//!
//! ```text
//!  3. ★ Headline goes here
//!     Guardian · 2h ago
//!     First line of the description...
//!     https://example.com/story
//! ```

use chrono::{DateTime, Local};
use itertools::Itertools;
use std::fmt::Write;

use crate::feed::FeedState;
use crate::models::{Article, Category, NewsPage};
use crate::utils::{format_source_name, relative_age};

const BOOKMARK_ON: &str = "★";
const BOOKMARK_OFF: &str = "☆";

/// Byline age for an article; falls back to the raw timestamp if it does
/// not parse.
pub fn age_label(article: &Article, now: &DateTime<Local>) -> String {
    match article.published() {
        Some(published) => relative_age(&published.with_timezone(&Local), now),
        None => article.published_at.clone(),
    }
}

/// Render one card. `index` is 1-based.
pub fn render_card(index: usize, article: &Article, bookmarked: bool, now: &DateTime<Local>) -> String {
    let mut out = String::new();
    let marker = if bookmarked { BOOKMARK_ON } else { BOOKMARK_OFF };
    writeln!(out, "{index:>3}. {marker} {}", article.title).unwrap();
    writeln!(
        out,
        "     {} · {}",
        format_source_name(article.source.as_ref()),
        age_label(article, now)
    )
    .unwrap();
    writeln!(out, "     {}", article.description).unwrap();
    writeln!(out, "     {}", article.url).unwrap();
    out
}

/// One line listing every category, with the selected one bracketed.
pub fn category_bar(selected: Category) -> String {
    Category::ALL
        .iter()
        .map(|c| {
            if *c == selected {
                format!("[{}]", c.label())
            } else {
                c.label().to_string()
            }
        })
        .join("  ")
}

/// Render the whole reader screen for `state`.
pub fn render_feed(state: &FeedState, now: &DateTime<Local>) -> String {
    let mut out = String::new();
    writeln!(out, "{}", category_bar(state.category())).unwrap();
    writeln!(out).unwrap();
    writeln!(out, "{}", state.heading()).unwrap();

    if state.is_loading() {
        writeln!(out, "Loading...").unwrap();
        return out;
    }

    if let Some(error) = state.error() {
        writeln!(out, "Error: {error}").unwrap();
        writeln!(out, "Type `retry` to try again.").unwrap();
        return out;
    }

    writeln!(
        out,
        "{} ({} total upstream)",
        state.count_line(),
        state.total_results()
    )
    .unwrap();
    writeln!(out).unwrap();

    if state.articles().is_empty() {
        writeln!(out, "No articles found").unwrap();
        writeln!(out, "{}", state.empty_hint()).unwrap();
        return out;
    }

    for (i, article) in state.articles().iter().enumerate() {
        out.push_str(&render_card(i + 1, article, state.is_bookmarked(&article.url), now));
        out.push('\n');
    }
    out
}

/// Render a one-shot result set under `heading`.
pub fn render_page(heading: &str, page: &NewsPage, now: &DateTime<Local>) -> String {
    let mut out = String::new();
    writeln!(out, "{heading}").unwrap();
    writeln!(
        out,
        "{} articles found ({} total upstream)",
        page.articles.len(),
        page.total_results
    )
    .unwrap();
    writeln!(out).unwrap();
    for (i, article) in page.articles.iter().enumerate() {
        out.push_str(&render_card(i + 1, article, false, now));
        out.push('\n');
    }
    out
}
