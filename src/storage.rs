use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use log::debug;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::article::ArticleRecord;

/// Writes article records as json files into a directory.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ArticleStore {
    dir: PathBuf,
}

impl ArticleStore {
    pub fn new<T: AsRef<Path>>(dir: T) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// `article_<YYYYmmdd_HHMMSS>.json` for the current local time.
    pub fn default_file_name() -> String {
        format!("article_{}.json", Local::now().format("%Y%m%d_%H%M%S"))
    }

    /// Saves the record as 4-space indented json and returns the path of the
    /// written file.
    ///
    /// Without a `file_name` one is derived from the current time. Absolute
    /// file names are used as they are.
    pub async fn save(&self, article: &ArticleRecord, file_name: Option<&Path>) -> Result<PathBuf> {
        let path = match file_name {
            Some(name) => self.dir.join(name),
            None => self.dir.join(ArticleStore::default_file_name()),
        };

        let mut json = Vec::new();
        let mut ser =
            serde_json::Serializer::with_formatter(&mut json, PrettyFormatter::with_indent(b"    "));
        article.serialize(&mut ser)?;
        let len = json.len();

        tokio::fs::write(&path, json)
            .await
            .with_context(|| format!("Failed to write article to {}", path.display()))?;
        debug!("Wrote {} bytes to {}", len, path.display());
        Ok(path)
    }
}
