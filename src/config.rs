//! Client configuration.
//!
//! A [`NewsConfig`] is built once at start-up and never mutated. Values are
//! layered, highest precedence first:
//!
//! 1. command-line flags and their environment variables
//! 2. an optional YAML file (`--config`)
//! 3. built-in defaults
//!
//! ```yaml
//! api_key: "0123456789abcdef"
//! base_url: "https://newsapi.org/v2"
//! country: "us"
//! page_size: 20
//! ```

use serde::Deserialize;
use std::error::Error;
use std::fmt;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};
use url::Url;

use crate::error::NewsError;

pub const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2";
pub const DEFAULT_COUNTRY: &str = "us";
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Contents of the optional YAML config file. Every key is optional.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub country: Option<String>,
    pub page_size: Option<u32>,
}

/// Values supplied on the command line (or through their env vars).
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub country: Option<String>,
    pub page_size: Option<u32>,
}

/// Immutable settings for [`NewsClient`](crate::api::NewsClient).
#[derive(Clone)]
pub struct NewsConfig {
    api_key: Option<String>,
    base_url: Url,
    pub country: String,
    pub page_size: u32,
}

impl fmt::Debug for NewsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url.as_str())
            .field("country", &self.country)
            .field("page_size", &self.page_size)
            .finish()
    }
}

impl NewsConfig {
    /// Build a config from explicit values.
    ///
    /// An empty API key counts as absent. A missing key is not an error
    /// here; each fetch reports it instead.
    ///
    /// # Errors
    ///
    /// [`NewsError::Configuration`] if `base_url` is not an absolute
    /// `http`/`https` URL.
    pub fn new(
        api_key: Option<String>,
        base_url: &str,
        country: impl Into<String>,
        page_size: u32,
    ) -> Result<Self, NewsError> {
        let base_url = Url::parse(base_url.trim_end_matches('/')).map_err(|e| {
            NewsError::Configuration(format!("invalid base URL {base_url:?}: {e}"))
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(NewsError::Configuration(format!(
                "base URL must be http or https, got {:?}",
                base_url.scheme()
            )));
        }
        Ok(Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url,
            country: country.into(),
            page_size,
        })
    }

    /// Merge command-line overrides over the file, over the defaults.
    pub fn resolve(file: ConfigFile, overrides: Overrides) -> Result<Self, NewsError> {
        let base_url = overrides
            .base_url
            .or(file.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self::new(
            overrides.api_key.or(file.api_key),
            &base_url,
            overrides
                .country
                .or(file.country)
                .unwrap_or_else(|| DEFAULT_COUNTRY.to_string()),
            overrides
                .page_size
                .or(file.page_size)
                .unwrap_or(DEFAULT_PAGE_SIZE),
        )
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base_url}/{name}`.
    pub fn endpoint(&self, name: &str) -> String {
        format!("{}/{}", self.base_url().as_str().trim_end_matches('/'), name)
    }
}

/// Read and parse a YAML config file.
#[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
pub async fn load_config_file(path: impl AsRef<Path>) -> Result<ConfigFile, Box<dyn Error>> {
    let text = fs::read_to_string(path.as_ref()).await?;
    let file = parse_config(&text)?;
    info!("Loaded configuration file");
    Ok(file)
}

/// Parse YAML config text. An empty document yields all defaults.
pub fn parse_config(text: &str) -> Result<ConfigFile, serde_yaml::Error> {
    if text.trim().is_empty() {
        return Ok(ConfigFile::default());
    }
    serde_yaml::from_str(text)
}
