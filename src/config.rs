use std::time::Duration;

/// Url fragments of known aggregator links that only redirect to the actual
/// article.
pub const REDIRECT_PATTERNS: [&str; 3] = [
    "news.google.com/articles/",
    "news.google.com/rss/articles/",
    "feedproxy.google.com/~r/",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// The user-agent used for requests.
    browser_user_agent: String,
    /// Timeout for requests.
    request_timeout: Duration,
    /// Whether to capture only 2XX responses or failures as well.
    http_success_only: bool,
    /// Prefer the readability scoring over the selector tables for title and
    /// text.
    use_readability: bool,
    /// Url fragments that mark an url as redirect wrapper.
    redirect_patterns: Vec<String>,
    /// Retry dates that are not ISO 8601 with a fuzzy parser.
    lenient_dates: bool,
    /// Whether a missing publishing date is replaced with the current time.
    default_date_to_now: bool,
}

impl Config {
    /// Default timeout for requests made inside `schlagzeile`.
    pub const DEFAULT_REQ_TIMEOUT_SEC: u64 = 7;

    /// Desktop browser user agent, plain library user agents are blocked by a
    /// lot of news sites.
    pub const DEFAULT_USER_AGENT: &'static str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

    /// Convenience method to create a [`ConfigBuilder`]
    #[inline]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    pub fn browser_user_agent(&self) -> &str {
        &self.browser_user_agent
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    pub fn http_success_only(&self) -> bool {
        self.http_success_only
    }

    pub fn use_readability(&self) -> bool {
        self.use_readability
    }

    pub fn redirect_patterns(&self) -> &[String] {
        &self.redirect_patterns
    }

    pub fn lenient_dates(&self) -> bool {
        self.lenient_dates
    }

    pub fn default_date_to_now(&self) -> bool {
        self.default_date_to_now
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::builder().build()
    }
}

#[derive(Debug, Default)]
pub struct ConfigBuilder {
    /// The user-agent used for requests.
    browser_user_agent: Option<String>,
    /// Timeout for requests.
    request_timeout: Option<Duration>,
    /// Whether to capture only 2XX responses or failures as well.
    http_success_only: Option<bool>,
    /// Prefer the readability scoring.
    use_readability: Option<bool>,
    /// Url fragments that mark an url as redirect wrapper.
    redirect_patterns: Option<Vec<String>>,
    /// Retry dates with a fuzzy parser.
    lenient_dates: Option<bool>,
    /// Replace missing dates with the current time.
    default_date_to_now: Option<bool>,
}

impl ConfigBuilder {
    pub fn browser_user_agent<T: ToString>(mut self, browser_user_agent: T) -> Self {
        self.browser_user_agent = Some(browser_user_agent.to_string());
        self
    }

    pub fn request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = Some(request_timeout);
        self
    }

    pub fn http_success_only(mut self, http_success_only: bool) -> Self {
        self.http_success_only = Some(http_success_only);
        self
    }

    pub fn use_readability(mut self, use_readability: bool) -> Self {
        self.use_readability = Some(use_readability);
        self
    }

    /// Replaces the default [`REDIRECT_PATTERNS`].
    pub fn redirect_patterns<I, T>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: ToString,
    {
        self.redirect_patterns = Some(patterns.into_iter().map(|p| p.to_string()).collect());
        self
    }

    pub fn lenient_dates(mut self, lenient_dates: bool) -> Self {
        self.lenient_dates = Some(lenient_dates);
        self
    }

    pub fn default_date_to_now(mut self, default_date_to_now: bool) -> Self {
        self.default_date_to_now = Some(default_date_to_now);
        self
    }

    pub fn build(self) -> Config {
        Config {
            browser_user_agent: self
                .browser_user_agent
                .unwrap_or_else(|| Config::DEFAULT_USER_AGENT.to_string()),
            request_timeout: self
                .request_timeout
                .unwrap_or_else(|| Duration::from_secs(Config::DEFAULT_REQ_TIMEOUT_SEC)),
            http_success_only: self.http_success_only.unwrap_or(true),
            use_readability: self.use_readability.unwrap_or_default(),
            redirect_patterns: self.redirect_patterns.unwrap_or_else(|| {
                REDIRECT_PATTERNS.iter().map(|p| p.to_string()).collect()
            }),
            lenient_dates: self.lenient_dates.unwrap_or_default(),
            default_date_to_now: self.default_date_to_now.unwrap_or(true),
        }
    }
}
