//! HTTP client with rate limiting and optional retries
//!
//! Every page fetch of every list goes through one shared [`TpbClient`], so
//! the rate limiter applies across all lists created from the same facade.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

use reqwest::Url;

use crate::error::{Result, TpbError};

/// Default site the facade talks to
pub const DEFAULT_BASE_URL: &str = "https://thepiratebay.org";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Site root, e.g. `https://thepiratebay.org` or a mirror
    pub base_url: String,
    /// Maximum requests per second (default: 2.0)
    pub requests_per_second: f64,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
    /// Retry attempts for transient errors (default: 0, failures surface immediately)
    pub max_retries: u32,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            requests_per_second: 2.0,
            timeout_secs: 30,
            max_retries: 0,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Default configuration pointed at another site root
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

/// Rate limiter to control request frequency
///
/// Ensures requests are spaced at least `min_interval` apart. Clones share
/// the same schedule.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    min_interval: Duration,
    last_request: Arc<Mutex<Instant>>,
}

impl RateLimiter {
    /// Create a new rate limiter with the specified requests per second
    ///
    /// # Panics
    /// If `requests_per_second` does not yield a representable interval,
    /// see [`try_new`](Self::try_new).
    pub fn new(requests_per_second: f64) -> Self {
        match Self::try_new(requests_per_second) {
            Ok(limiter) => limiter,
            Err(e) => panic!("{}", e),
        }
    }

    /// Create a new rate limiter, rejecting rates without a valid interval
    ///
    /// # Errors
    /// Returns `Config` if `requests_per_second` is not positive or so small
    /// that the interval overflows [`Duration`]
    pub fn try_new(requests_per_second: f64) -> Result<Self> {
        if !(requests_per_second.is_finite() && requests_per_second > 0.0) {
            return Err(TpbError::Config(format!(
                "requests_per_second must be positive, got {}",
                requests_per_second
            )));
        }
        let min_interval = Duration::try_from_secs_f64(1.0 / requests_per_second).map_err(|e| {
            TpbError::Config(format!(
                "requests_per_second {} gives no usable interval: {}",
                requests_per_second, e
            ))
        })?;

        let now = Instant::now();
        Ok(Self {
            min_interval,
            last_request: Arc::new(Mutex::new(now.checked_sub(min_interval).unwrap_or(now))),
        })
    }

    /// Acquire permission to make a request
    ///
    /// If called before the minimum interval has passed since the last request,
    /// this method will sleep until the interval has elapsed.
    pub async fn acquire(&self) {
        let mut last = self.last_request.lock().await;
        let elapsed = last.elapsed();

        if elapsed < self.min_interval {
            let wait_time = self.min_interval - elapsed;
            tracing::trace!(?wait_time, "rate limiter waiting");
            sleep(wait_time).await;
        }

        *last = Instant::now();
    }

    /// Get the minimum interval between requests
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }
}

/// HTTP client wrapper with rate limiting and retry logic
///
/// Cheap to clone: the connection pool and the rate limiter are shared.
#[derive(Debug, Clone)]
pub struct TpbClient {
    client: reqwest::Client,
    base_url: Url,
    rate_limiter: RateLimiter,
    max_retries: u32,
}

impl TpbClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    ///
    /// # Errors
    /// - `InvalidUrl` if `base_url` is not an absolute http(s) URL
    /// - `Config` if `requests_per_second` is not a positive number
    /// - `HttpError` if the underlying client cannot be built
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| TpbError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(TpbError::InvalidUrl(config.base_url));
        }

        let rate_limiter = RateLimiter::try_new(config.requests_per_second)?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent)
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(TpbError::HttpError)?;

        Ok(Self {
            client,
            base_url,
            rate_limiter,
            max_retries: config.max_retries,
        })
    }

    /// Site root every listing and detail URL is built from
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch HTML content from an absolute URL
    ///
    /// # Errors
    /// - `HttpError` - Network errors or non-success status
    /// - `NotFound` - Server returned 404
    /// - `RateLimited` - Server returned 429 after all retries exhausted
    pub async fn fetch(&self, url: &str) -> Result<String> {
        let mut attempt = 0;

        loop {
            self.rate_limiter.acquire().await;

            match self.do_fetch(url).await {
                Ok(body) => return Ok(body),
                Err(e) if Self::is_retryable(&e) && attempt < self.max_retries => {
                    // Exponential backoff: 1s, 2s, 4s, ...
                    let backoff = Duration::from_secs(1 << attempt.min(6));
                    tracing::warn!(%url, attempt, error = %e, "retrying after {:?}", backoff);
                    sleep(backoff).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Perform a single fetch attempt
    async fn do_fetch(&self, url: &str) -> Result<String> {
        tracing::trace!(%url, "GET");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(TpbError::HttpError)?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TpbError::RateLimited);
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(TpbError::NotFound(url.to_string()));
        }

        let response = response.error_for_status().map_err(TpbError::HttpError)?;
        response.text().await.map_err(TpbError::HttpError)
    }

    /// Check if an error is retryable
    fn is_retryable(error: &TpbError) -> bool {
        match error {
            TpbError::RateLimited => true,
            TpbError::HttpError(e) => {
                // Retry on timeout, connection errors, or 5xx status codes
                e.is_timeout()
                    || e.is_connect()
                    || e.status().map(|s| s.is_server_error()).unwrap_or(false)
            }
            _ => false,
        }
    }

    /// Get a reference to the rate limiter (for testing)
    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }
}
