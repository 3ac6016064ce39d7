//! Data models for the news API and the results handed to the presentation layer.
//!
//! This module defines:
//! - [`Article`]: an article that survived placeholder filtering
//! - [`WireArticle`] / [`Envelope`]: the upstream JSON shapes before validation
//! - [`NewsPage`]: the result set of one request
//! - [`Category`], [`SortOrder`], [`FeedQuery`]: request parameters
//!
//! Field names follow the upstream camelCase JSON via `#[serde(rename_all)]`.

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Literal the upstream API substitutes for withdrawn content.
pub const REMOVED_PLACEHOLDER: &str = "[Removed]";

/// The outlet an article came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Source {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// A news item as returned by the upstream API, after placeholder filtering.
///
/// `title` and `description` are guaranteed non-empty and never equal to
/// [`REMOVED_PLACEHOLDER`]; see [`WireArticle::into_article`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub source: Option<Source>,
    pub author: Option<String>,
    pub title: String,
    pub description: String,
    /// Unique key used for bookmarks.
    pub url: String,
    pub url_to_image: Option<String>,
    /// ISO-8601 timestamp, kept verbatim.
    pub published_at: String,
    pub content: Option<String>,
}

impl Article {
    /// Parse `published_at`; `None` when upstream sent something unparseable.
    pub fn published(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.published_at)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// An article exactly as it appears on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireArticle {
    #[serde(default)]
    pub source: Option<Source>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default)]
    pub url_to_image: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub published_at: String,
    #[serde(default)]
    pub content: Option<String>,
}

impl WireArticle {
    /// Placeholder entries: empty or missing title/description, or either
    /// field carrying [`REMOVED_PLACEHOLDER`].
    pub fn is_placeholder(&self) -> bool {
        fn blank_or_removed(field: &Option<String>) -> bool {
            match field.as_deref() {
                None | Some("") => true,
                Some(s) => s == REMOVED_PLACEHOLDER,
            }
        }
        blank_or_removed(&self.title) || blank_or_removed(&self.description)
    }

    /// Promote to an [`Article`], or `None` for a placeholder.
    pub fn into_article(self) -> Option<Article> {
        if self.is_placeholder() {
            return None;
        }
        Some(Article {
            source: self.source,
            author: self.author,
            title: self.title?,
            description: self.description?,
            url: self.url,
            url_to_image: self.url_to_image,
            published_at: self.published_at,
            content: self.content,
        })
    }
}

/// Read an explicit `null` as the field's default, the same as absence.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Response body shared by both endpoints.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    /// Anything other than `"ok"`, including a missing status, is a rejection.
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_results: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub articles: Vec<WireArticle>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl Envelope {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// The result set of one request. Replaced, never merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsPage {
    pub articles: Vec<Article>,
    pub total_results: u64,
}

/// Headline categories accepted by the `top-headlines` endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Business,
    Entertainment,
    #[default]
    General,
    Health,
    Science,
    Sports,
    Technology,
}

impl Category {
    /// Display order used by the reader's category bar.
    pub const ALL: [Category; 7] = [
        Category::General,
        Category::Business,
        Category::Technology,
        Category::Entertainment,
        Category::Health,
        Category::Science,
        Category::Sports,
    ];

    /// Query-string value.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Business => "business",
            Category::Entertainment => "entertainment",
            Category::General => "general",
            Category::Health => "health",
            Category::Science => "science",
            Category::Sports => "sports",
            Category::Technology => "technology",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Business => "Business",
            Category::Entertainment => "Entertainment",
            Category::General => "General",
            Category::Health => "Health",
            Category::Science => "Science",
            Category::Sports => "Sports",
            Category::Technology => "Technology",
        }
    }

    /// Parse a user-typed category name, case-insensitively.
    pub fn parse(s: &str) -> Option<Category> {
        let wanted = s.trim().to_ascii_lowercase();
        Category::ALL.into_iter().find(|c| c.as_str() == wanted)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result ordering for the `everything` endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
pub enum SortOrder {
    #[serde(rename = "relevancy")]
    #[value(name = "relevancy")]
    Relevancy,
    #[serde(rename = "popularity")]
    #[value(name = "popularity")]
    Popularity,
    #[default]
    #[serde(rename = "publishedAt")]
    #[value(name = "publishedAt")]
    PublishedAt,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Relevancy => "relevancy",
            SortOrder::Popularity => "popularity",
            SortOrder::PublishedAt => "publishedAt",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters of one request: headline mode or search mode, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedQuery {
    Headlines {
        country: String,
        category: Option<Category>,
    },
    Search {
        text: String,
        sort: SortOrder,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wire(title: Option<&str>, description: Option<&str>) -> WireArticle {
        WireArticle {
            title: title.map(str::to_string),
            description: description.map(str::to_string),
            url: "https://example.com/a".to_string(),
            published_at: "2025-05-06T14:30:00Z".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_placeholder_detection() {
        assert!(!wire(Some("Title"), Some("Desc")).is_placeholder());
        assert!(wire(None, Some("Desc")).is_placeholder());
        assert!(wire(Some("Title"), None).is_placeholder());
        assert!(wire(Some(""), Some("Desc")).is_placeholder());
        assert!(wire(Some("Title"), Some("")).is_placeholder());
        assert!(wire(Some("[Removed]"), Some("Desc")).is_placeholder());
        assert!(wire(Some("Title"), Some("[Removed]")).is_placeholder());
    }

    #[test]
    fn test_removed_is_matched_literally() {
        assert!(!wire(Some("[removed]"), Some("Desc")).is_placeholder());
        assert!(!wire(Some("Title"), Some(" [Removed] ")).is_placeholder());
    }

    #[test]
    fn test_into_article_keeps_fields() {
        let article = wire(Some("Title"), Some("Desc")).into_article().unwrap();
        assert_eq!(article.title, "Title");
        assert_eq!(article.description, "Desc");
        assert_eq!(article.url, "https://example.com/a");
        assert!(wire(Some("[Removed]"), Some("Desc")).into_article().is_none());
    }

    #[test]
    fn test_envelope_deserialization() {
        let json = r#"{
            "status": "ok",
            "totalResults": 2,
            "articles": [
                {
                    "source": {"id": null, "name": "BBC News"},
                    "author": null,
                    "title": "Headline",
                    "description": "Body",
                    "url": "https://bbc.co.uk/1",
                    "urlToImage": null,
                    "publishedAt": "2025-05-06T14:30:00Z",
                    "content": null
                },
                {
                    "source": {"id": null, "name": "[Removed]"},
                    "title": "[Removed]",
                    "description": null,
                    "url": "https://removed.com",
                    "publishedAt": "1970-01-01T00:00:00Z"
                }
            ]
        }"#;
        let envelope: Envelope = serde_json::from_str(json).unwrap();
        assert!(envelope.is_ok());
        assert_eq!(envelope.total_results, 2);
        assert_eq!(envelope.articles.len(), 2);
        assert_eq!(
            envelope.articles[0].source.as_ref().unwrap().name.as_deref(),
            Some("BBC News")
        );
        assert!(envelope.articles[1].is_placeholder());
    }

    #[test]
    fn test_error_envelope_without_articles() {
        let json = r#"{"status":"error","code":"rateLimited","message":"rateLimited"}"#;
        let envelope: Envelope = serde_json::from_str(json).unwrap();
        assert!(!envelope.is_ok());
        assert!(envelope.articles.is_empty());
        assert_eq!(envelope.code.as_deref(), Some("rateLimited"));
    }

    #[test]
    fn test_envelope_tolerates_nulls_and_missing_status() {
        let json = r#"{"totalResults": null, "articles": null, "message": "quota"}"#;
        let envelope: Envelope = serde_json::from_str(json).unwrap();
        assert!(!envelope.is_ok());
        assert_eq!(envelope.status, "");
        assert_eq!(envelope.total_results, 0);
        assert!(envelope.articles.is_empty());
    }

    #[test]
    fn test_wire_article_with_null_url_and_date() {
        let json = r#"{"title": "[Removed]", "description": "[Removed]", "url": null, "publishedAt": null}"#;
        let article: WireArticle = serde_json::from_str(json).unwrap();
        assert_eq!(article.url, "");
        assert_eq!(article.published_at, "");
        assert!(article.is_placeholder());
    }

    #[test]
    fn test_article_serializes_camel_case() {
        let article = wire(Some("Title"), Some("Desc")).into_article().unwrap();
        let json = serde_json::to_string(&article).unwrap();
        assert!(json.contains("\"publishedAt\""));
        assert!(json.contains("\"urlToImage\""));
    }

    #[test]
    fn test_published_parses_rfc3339() {
        let article = wire(Some("Title"), Some("Desc")).into_article().unwrap();
        let published = article.published().unwrap();
        assert_eq!(published.to_rfc3339(), "2025-05-06T14:30:00+00:00");

        let mut bad = article.clone();
        bad.published_at = "yesterday".to_string();
        assert!(bad.published().is_none());
    }

    #[test]
    fn test_category_parse_and_labels() {
        assert_eq!(Category::parse("Technology"), Some(Category::Technology));
        assert_eq!(Category::parse(" sports "), Some(Category::Sports));
        assert_eq!(Category::parse("weather"), None);
        assert_eq!(Category::Health.label(), "Health");
        assert_eq!(Category::default(), Category::General);
    }

    #[test]
    fn test_sort_order_wire_names() {
        assert_eq!(SortOrder::default().as_str(), "publishedAt");
        assert_eq!(
            serde_json::to_string(&SortOrder::Popularity).unwrap(),
            "\"popularity\""
        );
    }
}
