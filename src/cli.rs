//! Command-line interface definitions for the news reader.
//!
//! Credentials and endpoint settings can come from flags, environment
//! variables, or a YAML file passed with `--config`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Overrides;
use crate::models::{Category, SortOrder};

/// Command-line arguments for the news reader.
///
/// # Examples
///
/// ```sh
/// # Top technology headlines
/// news_reader headlines --category technology
///
/// # Search, most popular first, as JSON
/// news_reader --json search "solar eclipse" --sort-by popularity
///
/// # Interactive reader
/// NEWS_API_KEY=... news_reader browse
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// News API key
    #[arg(long, env = "NEWS_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of the news API (e.g. https://newsapi.org/v2)
    #[arg(long, env = "NEWS_API_BASE_URL")]
    pub base_url: Option<String>,

    /// Two-letter country code for headlines
    #[arg(long, env = "NEWS_COUNTRY")]
    pub country: Option<String>,

    /// Number of articles to request
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=100))]
    pub page_size: Option<u32>,

    /// Optional path to a YAML config file
    #[arg(short, long, env = "NEWS_READER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print results as JSON instead of text cards
    #[arg(long, global = true)]
    pub json: bool,

    /// Write JSON results to this file instead of stdout
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show top headlines, optionally for one category
    Headlines {
        #[arg(long, value_enum)]
        category: Option<Category>,
    },
    /// Search all articles (English only)
    Search {
        query: String,
        #[arg(long, value_enum, default_value_t = SortOrder::PublishedAt)]
        sort_by: SortOrder,
    },
    /// Interactive reader on stdin/stdout
    Browse,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            country: self.country.clone(),
            page_size: self.page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_headlines() {
        let cli = Cli::parse_from([
            "news_reader",
            "--api-key",
            "k3y",
            "headlines",
            "--category",
            "technology",
        ]);
        assert_eq!(cli.api_key.as_deref(), Some("k3y"));
        assert_eq!(
            cli.command,
            Command::Headlines {
                category: Some(Category::Technology)
            }
        );
        assert!(!cli.json);
    }

    #[test]
    fn test_cli_search_defaults_to_published_at() {
        let cli = Cli::parse_from(["news_reader", "search", "mars rover"]);
        assert_eq!(
            cli.command,
            Command::Search {
                query: "mars rover".to_string(),
                sort_by: SortOrder::PublishedAt
            }
        );
    }

    #[test]
    fn test_cli_search_sort_and_global_flags() {
        let cli = Cli::parse_from([
            "news_reader",
            "--page-size",
            "5",
            "search",
            "mars",
            "--sort-by",
            "publishedAt",
            "--json",
            "-o",
            "/tmp/out.json",
        ]);
        assert!(cli.json);
        assert_eq!(cli.output, Some(PathBuf::from("/tmp/out.json")));
        assert_eq!(cli.overrides().page_size, Some(5));
        assert!(matches!(
            cli.command,
            Command::Search {
                sort_by: SortOrder::PublishedAt,
                ..
            }
        ));
    }

    #[test]
    fn test_cli_rejects_unknown_category() {
        assert!(Cli::try_parse_from(["news_reader", "headlines", "--category", "weather"]).is_err());
    }

    #[test]
    fn test_cli_rejects_zero_page_size() {
        assert!(Cli::try_parse_from(["news_reader", "--page-size", "0", "browse"]).is_err());
    }
}
