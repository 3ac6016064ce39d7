//! Reader state and its transitions.
//!
//! [`FeedState`] holds everything the reader shows: the selected category,
//! the search box, loading/error flags, the current result set and the
//! bookmark set. User actions go through [`FeedState::dispatch`]; any action
//! that needs data returns a [`FetchTicket`], and the caller hands the
//! outcome back through [`FeedState::complete`].
//!
//! Each ticket carries a generation number. Only the most recently issued
//! ticket may change the displayed list, so a slow response to an earlier
//! action can never overwrite a newer one.

use std::collections::HashSet;
use tracing::{debug, warn};

use crate::error::NewsError;
use crate::models::{Article, Category, FeedQuery, NewsPage, SortOrder};
use crate::utils::truncate_label;

const HEADING_QUERY_MAX: usize = 20;

/// Something the user did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedAction {
    /// Initial load of the page.
    Load,
    Refresh,
    /// Re-issue the request that last failed.
    Retry,
    SelectCategory(Category),
    /// Typing into the search box; does not fetch.
    EditSearch(String),
    SubmitSearch,
    ToggleBookmark(String),
}

/// A request the caller must run and report back on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub query: FeedQuery,
}

#[derive(Debug, Clone)]
pub struct FeedState {
    country: String,
    category: Category,
    search_text: String,
    search_mode: bool,
    loading: bool,
    error: Option<String>,
    articles: Vec<Article>,
    total_results: u64,
    bookmarks: HashSet<String>,
    generation: u64,
}

impl FeedState {
    pub fn new(country: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            category: Category::General,
            search_text: String::new(),
            search_mode: false,
            loading: false,
            error: None,
            articles: Vec::new(),
            total_results: 0,
            bookmarks: HashSet::new(),
            generation: 0,
        }
    }

    /// Apply `action`, returning the fetch it requires, if any.
    pub fn dispatch(&mut self, action: FeedAction) -> Option<FetchTicket> {
        match action {
            FeedAction::Load | FeedAction::Refresh | FeedAction::Retry => Some(self.begin_fetch()),
            FeedAction::SelectCategory(category) => {
                self.category = category;
                self.search_mode = false;
                self.search_text.clear();
                Some(self.begin_fetch())
            }
            FeedAction::EditSearch(text) => {
                self.search_text = text;
                None
            }
            FeedAction::SubmitSearch => {
                self.search_mode = !self.search_text.trim().is_empty();
                Some(self.begin_fetch())
            }
            FeedAction::ToggleBookmark(url) => {
                if !self.bookmarks.remove(&url) {
                    self.bookmarks.insert(url);
                }
                None
            }
        }
    }

    /// Record the outcome of `ticket`. Returns `false` if it was stale and
    /// ignored.
    pub fn complete(&mut self, ticket: &FetchTicket, result: Result<NewsPage, NewsError>) -> bool {
        if ticket.generation != self.generation {
            warn!(
                stale = ticket.generation,
                current = self.generation,
                "Discarding stale response"
            );
            return false;
        }
        self.loading = false;
        match result {
            Ok(page) => {
                debug!(count = page.articles.len(), "Replacing article list");
                self.articles = page.articles;
                self.total_results = page.total_results;
                self.error = None;
            }
            Err(e) => {
                self.error = Some(e.to_string());
            }
        }
        true
    }

    /// The query the current state maps to.
    pub fn current_query(&self) -> FeedQuery {
        if self.in_search() {
            FeedQuery::Search {
                text: self.search_text.clone(),
                sort: SortOrder::PublishedAt,
            }
        } else {
            FeedQuery::Headlines {
                country: self.country.clone(),
                // "general" is the server's default mix, so it is not sent.
                category: match self.category {
                    Category::General => None,
                    other => Some(other),
                },
            }
        }
    }

    fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        self.loading = true;
        self.error = None;
        FetchTicket {
            generation: self.generation,
            query: self.current_query(),
        }
    }

    fn in_search(&self) -> bool {
        self.search_mode && !self.search_text.trim().is_empty()
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn total_results(&self) -> u64 {
        self.total_results
    }

    pub fn is_bookmarked(&self, url: &str) -> bool {
        self.bookmarks.contains(url)
    }

    /// Bookmarked articles that are in the current list, in list order.
    pub fn bookmarked_articles(&self) -> Vec<&Article> {
        self.articles
            .iter()
            .filter(|a| self.bookmarks.contains(&a.url))
            .collect()
    }

    pub fn bookmark_count(&self) -> usize {
        self.bookmarks.len()
    }

    /// `Results for "<query>"` in search mode, otherwise `"<Category> News"`.
    pub fn heading(&self) -> String {
        if self.in_search() {
            format!(
                "Results for \"{}\"",
                truncate_label(&self.search_text, HEADING_QUERY_MAX)
            )
        } else {
            format!("{} News", self.category.label())
        }
    }

    pub fn count_line(&self) -> String {
        format!("{} articles found", self.articles.len())
    }

    pub fn empty_hint(&self) -> &'static str {
        if self.in_search() {
            "Try adjusting your search terms"
        } else {
            "No articles available in this category"
        }
    }
}
