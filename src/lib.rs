//! Extracts title, main image, text and publishing date from a single news
//! article page.
//!
//! ```no_run
//! use schlagzeile::{Article, Config};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let article = Article::builder("https://example.com/news/1")?
//!     .config(Config::builder().use_readability(true).build())
//!     .get()
//!     .await?;
//! println!("{}", article.record.title);
//! # Ok(())
//! # }
//! ```

pub use article::{Article, ArticleBuilder, ArticleRecord};
pub use config::{Config, ConfigBuilder};
pub use error::ScrapeError;
pub use extract::{DefaultExtractor, Extractor, Preferred};
pub use readability::ReadabilityExtractor;
pub use storage::ArticleStore;

pub mod article;
pub mod clean;
pub mod config;
pub mod date;
mod error;
pub mod extract;
pub mod fetch;
pub mod image;
pub mod readability;
pub mod redirect;
pub mod stopwords;
pub mod storage;
pub mod text;

/// Rexported to implement custom extractors.
pub use select;
