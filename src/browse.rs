//! Interactive reader.
//!
//! Reads one command per line, turns it into a [`FeedAction`], runs any
//! fetch the action requires and redraws the screen. Fetch failures are
//! shown inline and never end the session.
//!
//! | Command              | Effect                                   |
//! |----------------------|------------------------------------------|
//! | `c <category>`       | switch category, leave search            |
//! | `s <text>`           | search; empty text returns to headlines  |
//! | `r`                  | refresh the current view                 |
//! | `retry`              | re-run the request that failed           |
//! | `b <n>`              | toggle bookmark on card `n`              |
//! | `bookmarks`          | list bookmarked cards                    |
//! | `h`                  | help                                     |
//! | `q`                  | quit                                     |

use chrono::Local;
use itertools::Itertools;
use std::error::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, instrument};

use crate::api::{HttpGet, NewsClient};
use crate::feed::{FeedAction, FeedState, FetchTicket};
use crate::models::Category;
use crate::outputs::text::{render_card, render_feed};

const PROMPT: &str = "> ";

const HELP: &str = "\
Commands:
  c <category>   switch category (general, business, technology, entertainment, health, science, sports)
  s <text>       search articles; `s` alone returns to headlines
  r              refresh
  retry          retry the last failed request
  b <n>          toggle bookmark on article n
  bookmarks      list bookmarked articles
  h              show this help
  q              quit
";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Feed(FeedAction),
    Search(String),
    Bookmark(usize),
    ShowBookmarks,
    Help,
    Quit,
}

/// Parse an input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<BrowseCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "q" | "quit" | "exit" => BrowseCommand::Quit,
        "h" | "help" | "?" => BrowseCommand::Help,
        "r" | "refresh" => BrowseCommand::Feed(FeedAction::Refresh),
        "retry" => BrowseCommand::Feed(FeedAction::Retry),
        "bookmarks" => BrowseCommand::ShowBookmarks,
        "s" | "search" => BrowseCommand::Search(rest.to_string()),
        "c" | "category" => match Category::parse(rest) {
            Some(category) => BrowseCommand::Feed(FeedAction::SelectCategory(category)),
            None => {
                return Err(format!(
                    "unknown category {rest:?} (choose from: {})",
                    Category::ALL.iter().map(|c| c.as_str()).join(", ")
                ));
            }
        },
        "b" | "bookmark" => match rest.parse::<usize>() {
            Ok(n) if n >= 1 => BrowseCommand::Bookmark(n),
            _ => return Err(format!("expected an article number, got {rest:?}")),
        },
        other => return Err(format!("unknown command {other:?}; type `h` for help")),
    };
    Ok(Some(command))
}

/// Run the interactive reader until `q` or end of input.
#[instrument(level = "info", skip_all)]
pub async fn run<H, R, W>(client: &NewsClient<H>, input: R, mut out: W) -> Result<(), Box<dyn Error>>
where
    H: HttpGet,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut state = FeedState::new(client.config().country.clone());
    if let Some(ticket) = state.dispatch(FeedAction::Load) {
        run_ticket(client, &mut state, ticket).await;
    }
    redraw(&state, &mut out).await?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => {
                out.write_all(PROMPT.as_bytes()).await?;
                out.flush().await?;
                continue;
            }
            Err(message) => {
                say(&mut out, &message).await?;
                continue;
            }
        };
        debug!(?command, "Browse command");

        match command {
            BrowseCommand::Quit => break,
            BrowseCommand::Help => say(&mut out, HELP.trim_end()).await?,
            BrowseCommand::ShowBookmarks => {
                let now = Local::now();
                let listing = state
                    .bookmarked_articles()
                    .iter()
                    .enumerate()
                    .map(|(i, a)| render_card(i + 1, a, true, &now))
                    .join("\n");
                if listing.is_empty() {
                    say(&mut out, "No bookmarked articles in this view.").await?;
                } else {
                    say(&mut out, listing.trim_end()).await?;
                }
            }
            BrowseCommand::Bookmark(n) => {
                let Some(article) = state.articles().get(n - 1).cloned() else {
                    say(&mut out, &format!("No article #{n} in this view.")).await?;
                    continue;
                };
                state.dispatch(FeedAction::ToggleBookmark(article.url.clone()));
                let message = if state.is_bookmarked(&article.url) {
                    format!("Bookmarked: {}", article.title)
                } else {
                    format!("Removed bookmark: {}", article.title)
                };
                say(&mut out, &message).await?;
            }
            BrowseCommand::Search(text) => {
                state.dispatch(FeedAction::EditSearch(text));
                if let Some(ticket) = state.dispatch(FeedAction::SubmitSearch) {
                    run_ticket(client, &mut state, ticket).await;
                }
                redraw(&state, &mut out).await?;
            }
            BrowseCommand::Feed(action) => {
                if let Some(ticket) = state.dispatch(action) {
                    run_ticket(client, &mut state, ticket).await;
                }
                redraw(&state, &mut out).await?;
            }
        }
    }

    info!(bookmarks = state.bookmark_count(), "Browse session ended");
    Ok(())
}

async fn run_ticket<H: HttpGet>(client: &NewsClient<H>, state: &mut FeedState, ticket: FetchTicket) {
    let result = client.fetch(&ticket.query).await;
    state.complete(&ticket, result);
}

async fn redraw<W: AsyncWrite + Unpin>(state: &FeedState, out: &mut W) -> std::io::Result<()> {
    let screen = render_feed(state, &Local::now());
    out.write_all(screen.as_bytes()).await?;
    out.write_all(PROMPT.as_bytes()).await?;
    out.flush().await
}

async fn say<W: AsyncWrite + Unpin>(out: &mut W, message: &str) -> std::io::Result<()> {
    out.write_all(message.as_bytes()).await?;
    out.write_all(b"\n").await?;
    out.write_all(PROMPT.as_bytes()).await?;
    out.flush().await
}
