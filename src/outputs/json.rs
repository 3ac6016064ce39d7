//! JSON output of a result set.
//!
//! The page is written in the upstream camelCase shape:
//!
//! ```json
//! { "articles": [ { "title": "...", "publishedAt": "..." } ], "totalResults": 37 }
//! ```

use crate::models::NewsPage;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{error, info, instrument};

/// Write `page` as pretty JSON to `output`, or to stdout when `None`.
///
/// Parent directories of `output` are created as needed.
#[instrument(level = "info", skip_all, fields(output = ?output))]
pub async fn write_page(page: &NewsPage, output: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(page)?;

    let Some(path) = output else {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(json.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
        return Ok(());
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(e) = fs::create_dir_all(parent).await {
            error!(dir = %parent.display(), error = %e, "Failed to create output dir");
            return Err(e.into());
        }
    }

    fs::write(path, json).await?;
    info!(path = %path.display(), articles = page.articles.len(), "Wrote JSON file");
    Ok(())
}
