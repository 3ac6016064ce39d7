//! Output rendering for fetched articles.
//!
//! # Submodules
//!
//! - [`text`]: numbered article cards for the terminal
//! - [`json`]: the raw [`NewsPage`](crate::models::NewsPage) as JSON, to stdout
//!   or a file

pub mod json;
pub mod text;
