/// Errors that can occur while fetching a remote gear list.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Gear list not found at {url}")]
    NotFound { url: String },

    #[error("Server error (HTTP {status}): {message}")]
    ServerError { status: u16, message: String },

    #[error("Could not connect to {url} after {attempts} attempt(s)")]
    Unreachable { url: String, attempts: u32 },

    #[error("Invalid URL '{0}'")]
    InvalidUrl(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
