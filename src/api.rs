//! News API client.
//!
//! This module talks to a NewsAPI-compatible service over two GET endpoints:
//! - `top-headlines`, keyed by country and an optional category
//! - `everything`, keyed by a free-text query and a sort order
//!
//! # Architecture
//!
//! - [`HttpGet`]: the transport seam; one GET, status plus body back
//! - [`ReqwestGet`]: production transport on a shared `reqwest::Client`
//! - [`NewsClient`]: builds queries, validates the response envelope and drops
//!   placeholder articles
//!
//! There are no retries and no caching. Every call is independent and its
//! only side effect is the network request.

use std::time::Instant;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

use crate::config::NewsConfig;
use crate::error::NewsError;
use crate::models::{Article, Category, Envelope, FeedQuery, NewsPage, SortOrder, WireArticle};
use crate::utils::truncate_for_log;

const HEADLINES_ENDPOINT: &str = "top-headlines";
const SEARCH_ENDPOINT: &str = "everything";
const SEARCH_LANGUAGE: &str = "en";

/// Status and body of one HTTP exchange.
#[derive(Debug, Clone)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for issuing a single HTTP GET.
///
/// Implementors only fail when no response was obtained at all; a non-2xx
/// status is still an `Ok` reply and is judged by [`NewsClient`].
pub trait HttpGet {
    async fn get(&self, url: &Url) -> Result<HttpReply, NewsError>;
}

/// [`HttpGet`] backed by `reqwest`, with the client's default timeouts.
#[derive(Debug, Clone, Default)]
pub struct ReqwestGet {
    client: reqwest::Client,
}

impl ReqwestGet {
    pub fn new() -> Self {
        Self::from_client(reqwest::Client::new())
    }

    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl HttpGet for ReqwestGet {
    async fn get(&self, url: &Url) -> Result<HttpReply, NewsError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Ok(HttpReply {
                status: status.as_u16(),
                body: String::new(),
            });
        }
        let body = response.text().await?;
        Ok(HttpReply {
            status: status.as_u16(),
            body,
        })
    }
}

/// Client for the headlines and search endpoints.
///
/// Constructed once from an immutable [`NewsConfig`].
#[derive(Debug)]
pub struct NewsClient<H = ReqwestGet> {
    config: NewsConfig,
    http: H,
}

impl NewsClient<ReqwestGet> {
    pub fn new(config: NewsConfig) -> Self {
        Self::with_http(config, ReqwestGet::new())
    }
}

impl<H: HttpGet> NewsClient<H> {
    pub fn with_http(config: NewsConfig, http: H) -> Self {
        Self { config, http }
    }

    pub fn config(&self) -> &NewsConfig {
        &self.config
    }

    /// Fetch top headlines for `country`.
    ///
    /// `category` is sent only when present; without it the server returns
    /// its default mix.
    ///
    /// # Errors
    ///
    /// - [`NewsError::Configuration`] when no API key is configured (no
    ///   request is made)
    /// - [`NewsError::Transport`] on a non-2xx status
    /// - [`NewsError::Upstream`] when the envelope status is not `"ok"`
    /// - [`NewsError::Network`] / [`NewsError::Decode`] when no usable
    ///   response was obtained
    #[instrument(level = "info", skip(self))]
    pub async fn top_headlines(
        &self,
        country: &str,
        category: Option<Category>,
        page_size: u32,
    ) -> Result<NewsPage, NewsError> {
        let result: Result<NewsPage, NewsError> = async {
            let api_key = self.require_api_key()?;
            let mut params = vec![
                ("country", country.to_string()),
                ("apiKey", api_key.to_string()),
                ("pageSize", page_size.to_string()),
            ];
            if let Some(category) = category {
                params.push(("category", category.as_str().to_string()));
            }
            self.get_page(HEADLINES_ENDPOINT, &params, "Failed to fetch news")
                .await
        }
        .await;

        if let Err(e) = &result {
            error!(error = %e, "Error fetching news");
        }
        result
    }

    /// Search all articles matching `query`, pinned to English.
    ///
    /// Fails the same ways as [`NewsClient::top_headlines`].
    #[instrument(level = "info", skip(self, query), fields(query = %truncate_for_log(query, 80)))]
    pub async fn search(
        &self,
        query: &str,
        sort: SortOrder,
        page_size: u32,
    ) -> Result<NewsPage, NewsError> {
        let result: Result<NewsPage, NewsError> = async {
            let api_key = self.require_api_key()?;
            let params = vec![
                ("q", query.to_string()),
                ("sortBy", sort.as_str().to_string()),
                ("apiKey", api_key.to_string()),
                ("pageSize", page_size.to_string()),
                ("language", SEARCH_LANGUAGE.to_string()),
            ];
            self.get_page(SEARCH_ENDPOINT, &params, "Failed to search news")
                .await
        }
        .await;

        if let Err(e) = &result {
            error!(error = %e, "Error searching news");
        }
        result
    }

    /// Run either request kind with the configured page size.
    pub async fn fetch(&self, query: &FeedQuery) -> Result<NewsPage, NewsError> {
        let page_size = self.config.page_size;
        match query {
            FeedQuery::Headlines { country, category } => {
                self.top_headlines(country, *category, page_size).await
            }
            FeedQuery::Search { text, sort } => self.search(text, *sort, page_size).await,
        }
    }

    fn require_api_key(&self) -> Result<&str, NewsError> {
        self.config.api_key().ok_or_else(NewsError::missing_api_key)
    }

    async fn get_page(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
        fallback_message: &str,
    ) -> Result<NewsPage, NewsError> {
        let url = Url::parse_with_params(&self.config.endpoint(endpoint), params)
            .map_err(|e| NewsError::Configuration(format!("cannot build request URL: {e}")))?;

        let t0 = Instant::now();
        let reply = self.http.get(&url).await?;
        let elapsed_ms = t0.elapsed().as_millis() as u64;

        if !reply.is_success() {
            warn!(endpoint, status = reply.status, elapsed_ms, "Non-success HTTP status");
            return Err(NewsError::Transport {
                status: reply.status,
            });
        }

        let envelope: Envelope = serde_json::from_str(&reply.body).map_err(|e| {
            warn!(
                endpoint,
                error = %e,
                body_preview = %truncate_for_log(&reply.body, 300),
                "Response body is not a valid envelope"
            );
            NewsError::from(e)
        })?;

        if !envelope.is_ok() {
            warn!(
                endpoint,
                status = %envelope.status,
                code = ?envelope.code,
                "API rejected request"
            );
            let message = envelope
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| fallback_message.to_string());
            return Err(NewsError::Upstream(message));
        }

        let received = envelope.articles.len();
        let articles = drop_placeholders(envelope.articles);
        info!(
            endpoint,
            elapsed_ms,
            received,
            kept = articles.len(),
            dropped = received - articles.len(),
            total_results = envelope.total_results,
            "Fetched articles"
        );

        Ok(NewsPage {
            articles,
            total_results: envelope.total_results,
        })
    }
}

/// Remove placeholder entries, keeping the survivors in their original order.
///
/// Duplicate URLs are kept.
pub fn drop_placeholders(articles: Vec<WireArticle>) -> Vec<Article> {
    articles
        .into_iter()
        .filter_map(|a| {
            let url = a.url.clone();
            let kept = a.into_article();
            if kept.is_none() {
                debug!(%url, "Dropping placeholder article");
            }
            kept
        })
        .collect()
}
