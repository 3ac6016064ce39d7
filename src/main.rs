//! # News Reader
//!
//! A terminal news reader backed by a NewsAPI-compatible service. It shows
//! top headlines by category, searches all articles, and offers an
//! interactive mode with refresh, retry and in-memory bookmarks.
//!
//! ## Usage
//!
//! ```sh
//! NEWS_API_KEY=... news_reader headlines --category science
//! NEWS_API_KEY=... news_reader --json search "open source"
//! NEWS_API_KEY=... news_reader browse
//! ```
//!
//! ## Architecture
//!
//! 1. **Configuration**: flags/env over an optional YAML file over defaults,
//!    resolved once into an immutable [`config::NewsConfig`]
//! 2. **Fetching**: [`api::NewsClient`] issues one GET, validates the
//!    envelope and drops placeholder articles
//! 3. **State**: [`feed::FeedState`] maps user actions to requests and
//!    ignores stale responses
//! 4. **Output**: text cards or JSON

use chrono::Local;
use clap::Parser;
use std::error::Error;
use std::process::ExitCode;
use tokio::io::BufReader;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod browse;
mod cli;
mod config;
mod error;
mod feed;
mod models;
mod outputs;
mod utils;

use api::NewsClient;
use cli::{Cli, Command};
use config::{ConfigFile, NewsConfig, load_config_file};
use models::{FeedQuery, NewsPage};
use outputs::{json, text};
use utils::truncate_label;

#[tokio::main]
async fn main() -> ExitCode {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("news_reader starting up");

    let args = Cli::parse();
    debug!(command = ?args.command, json = args.json, "Parsed CLI arguments");

    let result = run(&args).await;

    let elapsed = start_time.elapsed();
    info!(?elapsed, millis = elapsed.as_millis() as u64, "Execution complete");

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Resolve configuration and run the selected subcommand.
#[instrument(level = "info", skip_all, fields(command = ?args.command))]
async fn run(args: &Cli) -> Result<(), Box<dyn Error>> {
    // ---- Configuration ----
    let file = match &args.config {
        Some(path) => load_config_file(path).await.inspect_err(|e| {
            error!(path = %path.display(), error = %e, "Failed to load config file");
        })?,
        None => ConfigFile::default(),
    };
    let config = NewsConfig::resolve(file, args.overrides()).inspect_err(|e| {
        error!(error = %e, "Invalid configuration");
    })?;
    info!(?config, "Configuration resolved");

    let client = NewsClient::new(config);

    // ---- Run ----
    match &args.command {
        Command::Browse => {
            let stdin = BufReader::new(tokio::io::stdin());
            browse::run(&client, stdin, tokio::io::stdout()).await?;
        }
        Command::Headlines { category } => {
            let query = FeedQuery::Headlines {
                country: client.config().country.clone(),
                category: *category,
            };
            let heading = format!(
                "{} News",
                category.map(|c| c.label()).unwrap_or("Top")
            );
            let page = client.fetch(&query).await?;
            emit(args, &heading, &page).await?;
        }
        Command::Search { query, sort_by } => {
            let feed_query = FeedQuery::Search {
                text: query.clone(),
                sort: *sort_by,
            };
            let heading = format!("Results for \"{}\"", truncate_label(query, 20));
            let page = client.fetch(&feed_query).await?;
            emit(args, &heading, &page).await?;
        }
    }
    Ok(())
}

/// Print or write a one-shot result according to the output flags.
async fn emit(args: &Cli, heading: &str, page: &NewsPage) -> Result<(), Box<dyn Error>> {
    if args.json || args.output.is_some() {
        json::write_page(page, args.output.as_deref()).await
    } else {
        print!("{}", text::render_page(heading, page, &Local::now()));
        Ok(())
    }
}
