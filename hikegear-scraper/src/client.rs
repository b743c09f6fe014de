use std::time::Duration;

use crate::error::ScrapeError;

/// Settings for fetching remote pages.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Connection attempts before giving up. The remote site drops
    /// connections now and then, so a few retries are normal.
    pub max_attempts: u32,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Pause between attempts.
    pub retry_delay: Duration,
    pub user_agent: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            timeout: Duration::from_secs(30),
            retry_delay: Duration::from_millis(500),
            user_agent: concat!("hikegear/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Blocking HTTP client for remote gear-list pages.
pub struct PageClient {
    http: reqwest::blocking::Client,
    options: FetchOptions,
}

impl PageClient {
    pub fn new(options: FetchOptions) -> Result<Self, ScrapeError> {
        if options.max_attempts == 0 {
            return Err(ScrapeError::Config(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        let http = reqwest::blocking::Client::builder()
            .timeout(options.timeout)
            .user_agent(options.user_agent.clone())
            .build()?;
        Ok(Self { http, options })
    }

    /// Fetch a page body.
    ///
    /// Connection failures and timeouts are retried up to `max_attempts`
    /// times. HTTP 400 and 404 mean the list does not exist.
    pub fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        let parsed =
            reqwest::Url::parse(url).map_err(|_| ScrapeError::InvalidUrl(url.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ScrapeError::InvalidUrl(url.to_string()));
        }

        let mut attempt = 0;
        let resp = loop {
            attempt += 1;
            match self.http.get(parsed.clone()).send() {
                Ok(resp) => break resp,
                Err(e) if (e.is_connect() || e.is_timeout()) && attempt < self.options.max_attempts => {
                    log::warn!(
                        "Attempt {}/{} for {} failed: {}",
                        attempt,
                        self.options.max_attempts,
                        url,
                        e
                    );
                    std::thread::sleep(self.options.retry_delay);
                }
                Err(e) if e.is_connect() || e.is_timeout() => {
                    log::debug!("Giving up on {url}: {e}");
                    return Err(ScrapeError::Unreachable {
                        url: url.to_string(),
                        attempts: attempt,
                    });
                }
                Err(e) => return Err(e.into()),
            }
        };

        let status = resp.status();
        if status == reqwest::StatusCode::BAD_REQUEST || status == reqwest::StatusCode::NOT_FOUND {
            return Err(ScrapeError::NotFound {
                url: url.to_string(),
            });
        }
        if !status.is_success() {
            let text = resp.text().unwrap_or_default();
            return Err(ScrapeError::ServerError {
                status: status.as_u16(),
                message: text.chars().take(200).collect(),
            });
        }

        let body = resp.text()?;
        log::debug!("Fetched {} ({} bytes, attempt {})", url, body.len(), attempt);
        Ok(body)
    }
}
