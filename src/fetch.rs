use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, USER_AGENT};
use reqwest::{Client, StatusCode, Url};

use crate::config::Config;
use crate::error::ScrapeError;

/// A fetched html page.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Status of the final response.
    pub status: StatusCode,
    /// The url after all redirects were followed.
    pub url: Url,
    /// The decoded response body.
    pub body: String,
}

/// Builds the [`reqwest::Client`] for a single extraction, with the
/// configured timeout and user agent.
pub fn client(config: &Config) -> Result<Client> {
    let mut headers = HeaderMap::with_capacity(1);
    headers.insert(
        USER_AGENT,
        config
            .browser_user_agent()
            .parse()
            .context("Failed to parse user agent header.")?,
    );

    Ok(Client::builder()
        .timeout(config.request_timeout())
        .default_headers(headers)
        .build()?)
}

/// `GET`s the `url`, following redirects.
///
/// Fails on network errors, timeouts and, if `http_success_only` is set, on
/// every non 2xx response.
pub async fn fetch(client: &Client, url: Url, http_success_only: bool) -> Result<FetchedPage> {
    let resp = client
        .get(url.clone())
        .send()
        .await
        .map_err(ScrapeError::from)
        .with_context(|| format!("Failed to fetch {}", url))?;

    let status = resp.status();
    if http_success_only && !status.is_success() {
        let msg = format!("Unsuccessful request to {}", resp.url());
        return Err(ScrapeError::NoHttpSuccessResponse {
            status,
            url: resp.url().to_owned(),
        })
        .context(msg);
    }

    let url = resp.url().to_owned();
    let body = resp
        .text()
        .await
        .map_err(ScrapeError::from)
        .with_context(|| format!("Failed to read body of {}", url))?;

    Ok(FetchedPage { status, url, body })
}
