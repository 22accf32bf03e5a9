use reqwest::StatusCode;
use thiserror::Error;
use url::Url;

/// All different error types this crate uses.
///
/// Only fetching a document can fail, everything after that degrades to
/// placeholder values instead.
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// Received a good non success Http response
    #[error("Expected a 2xx Success but got: {status} for {url}")]
    NoHttpSuccessResponse {
        /// Status of the response.
        status: StatusCode,
        /// The url the response came from.
        url: Url,
    },
    /// Failed to get a response.
    #[error("Request failed: {error}")]
    HttpRequestFailure {
        /// The reqwest error.
        #[from]
        error: reqwest::Error,
    },
    /// The input could not be parsed as an url.
    #[error("Invalid url {url:?}: {error}")]
    InvalidUrl {
        /// The rejected input.
        url: String,
        /// Why it was rejected.
        error: url::ParseError,
    },
}
