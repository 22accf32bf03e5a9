use log::{debug, warn};
use reqwest::{Client, Url};

/// Whether the `url` looks like an aggregator link that only redirects to the
/// article, like google news links.
pub fn is_redirect_wrapper<T: AsRef<str>>(url: &Url, patterns: &[T]) -> bool {
    let host = url.host_str().unwrap_or_default();
    let target = format!("{}{}", host, url.path());
    patterns.iter().any(|p| target.contains(p.as_ref()))
}

/// Resolves a redirect wrapper `url` to the address it points to.
///
/// Urls that match none of the `patterns` are returned unchanged without any
/// request. A failed resolution is logged and also yields the `url` unchanged.
pub async fn resolve<T: AsRef<str>>(client: &Client, url: Url, patterns: &[T]) -> Url {
    if !is_redirect_wrapper(&url, patterns) {
        return url;
    }

    match client.head(url.clone()).send().await {
        Ok(resp) if resp.status().is_success() => {
            debug!("Resolved {} to {}", url, resp.url());
            resp.url().to_owned()
        }
        Ok(resp) => {
            warn!(
                "Resolving redirect {} failed with status {}, using it as is",
                url,
                resp.status()
            );
            url
        }
        Err(err) => {
            warn!("Resolving redirect {} failed: {}, using it as is", url, err);
            url
        }
    }
}
