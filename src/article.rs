use anyhow::{Context, Result};
use log::{error, warn};
use reqwest::Url;
use select::document::Document;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::date::ArticleDate;
use crate::error::ScrapeError;
use crate::extract::{DefaultExtractor, Extractor};
use crate::fetch;
use crate::readability::ReadabilityExtractor;
use crate::redirect;

/// Placeholder for an article without any title.
pub const NO_TITLE: &str = "No title found";
/// Placeholder for an article without any image.
pub const NO_IMAGE: &str = "No image found";
/// Placeholder for an article without any text container.
pub const NO_CONTENT: &str = "No content found";
/// Placeholder for a missing publishing date, if it is not replaced with the
/// current time.
pub const NO_DATE: &str = "No date found";

/// The extracted article.
///
/// Every field is always present, anything that could not be found holds
/// one of the placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub title: String,
    pub image_url: String,
    pub content: String,
    /// ISO 8601 publishing date.
    pub published_at: String,
    /// The url the document was fetched from, after redirects.
    pub source_url: String,
    /// The requested url, if it differs from `source_url`.
    pub original_url: Option<String>,
}

impl ArticleRecord {
    /// Whether the record holds an extracted value for every field.
    pub fn is_complete(&self) -> bool {
        self.title != NO_TITLE
            && self.image_url != NO_IMAGE
            && self.content != NO_CONTENT
            && self.published_at != NO_DATE
    }
}

#[derive(Debug)]
pub struct Article {
    /// The url of the fetched document.
    pub url: Url,
    /// The url that was requested.
    pub original_url: Url,
    /// The parsed response html `Document`.
    pub doc: Document,
    /// The extracted fields.
    pub record: ArticleRecord,
}

impl Article {
    /// Convenience method for creating a new [`ArticleBuilder`]
    ///
    /// Same as calling [`ArticleBuilder::new`]
    pub fn builder<T: AsRef<str>>(url: T) -> Result<ArticleBuilder> {
        ArticleBuilder::new(url)
    }

    /// Runs the whole pipeline for the `url`.
    ///
    /// Returns `None` only if the document could not be fetched, the cause is
    /// logged.
    pub async fn scrape<T: AsRef<str>>(url: T, config: &Config) -> Option<ArticleRecord> {
        let article = async move {
            Article::builder(url)?
                .config(config.clone())
                .get()
                .await
        };
        match article.await {
            Ok(article) => Some(article.into_record()),
            Err(err) => {
                error!("Error fetching the article: {:#}", err);
                None
            }
        }
    }

    /// Drops the parsed document and returns the record.
    pub fn into_record(self) -> ArticleRecord {
        self.record
    }
}

pub struct ArticleBuilder {
    url: Url,
    config: Option<Config>,
}

impl ArticleBuilder {
    pub fn new<T: AsRef<str>>(url: T) -> Result<Self> {
        let url = Url::parse(url.as_ref().trim()).map_err(|error| ScrapeError::InvalidUrl {
            url: url.as_ref().to_string(),
            error,
        })?;

        Ok(ArticleBuilder { url, config: None })
    }

    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Resolves, fetches and extracts the article with the extractors the
    /// config asks for.
    pub async fn get(self) -> Result<Article> {
        let config = self.config.clone().unwrap_or_default();
        if config.use_readability() {
            let extractor = ReadabilityExtractor
                .or(DefaultExtractor::heading_first().lenient_dates(config.lenient_dates()));
            self.get_with_extractor(&extractor).await
        } else {
            let extractor = DefaultExtractor::default().lenient_dates(config.lenient_dates());
            self.get_with_extractor(&extractor).await
        }
    }

    pub async fn get_with_extractor<TExtract: Extractor>(
        self,
        extractor: &TExtract,
    ) -> Result<Article> {
        let config = self.config.unwrap_or_default();
        let client = fetch::client(&config)?;

        let original_url = self.url;
        let url = redirect::resolve(&client, original_url.clone(), config.redirect_patterns()).await;

        let page = fetch::fetch(&client, url, config.http_success_only())
            .await
            .context("Failed to fetch the article")?;

        let doc = Document::from(page.body.as_str());
        let record = assemble(extractor, &doc, &page.url, &original_url, &config);

        Ok(Article {
            url: page.url,
            original_url,
            doc,
            record,
        })
    }
}

/// Builds the record from whatever the `extractor` finds in the document.
///
/// Never fails, every missing field is filled with its placeholder.
pub fn assemble<TExtract: Extractor>(
    extractor: &TExtract,
    doc: &Document,
    url: &Url,
    original_url: &Url,
    config: &Config,
) -> ArticleRecord {
    let published_at = match extractor.publishing_date(doc) {
        Some(date) => date.to_iso(),
        None if config.default_date_to_now() => {
            warn!("No publishing date found for {}, using the current time", url);
            ArticleDate::now().to_iso()
        }
        None => NO_DATE.to_string(),
    };

    let (title, content) = extractor.title_and_text(doc);
    ArticleRecord {
        title: title.unwrap_or_else(|| NO_TITLE.to_string()),
        image_url: extractor
            .top_image(url, doc)
            .map(String::from)
            .unwrap_or_else(|| NO_IMAGE.to_string()),
        content: content.unwrap_or_else(|| NO_CONTENT.to_string()),
        published_at,
        source_url: url.to_string(),
        original_url: if url != original_url {
            Some(original_url.to_string())
        } else {
            None
        },
    }
}
