//! Classification of failed release bucket requests.

use reqwest::StatusCode;

/// Maximum number of attempts for one request.
pub const MAX_RETRIES: usize = 3;

/// Default delay between attempts in milliseconds.
pub const RETRY_DELAY_MS: u64 = 1000;

/// Failures that will not go away by asking again.
#[derive(Debug)]
pub enum NonRetryableError {
    /// HTTP 404, e.g. a `stable-1.N.txt` marker that was never published
    NotFound(String),
    /// HTTP 403
    Forbidden(String),
    /// HTTP 429
    RateLimited(String),
    /// Any other 4xx
    ClientError(String),
}

impl std::fmt::Display for NonRetryableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NonRetryableError::NotFound(url) => write!(f, "Not found: {}", url),
            NonRetryableError::Forbidden(url) => write!(f, "Access forbidden: {}", url),
            NonRetryableError::RateLimited(url) => {
                write!(f, "Rate limited by the release bucket: {}. Try again later.", url)
            }
            NonRetryableError::ClientError(msg) => write!(f, "Request error: {}", msg),
        }
    }
}

impl std::error::Error for NonRetryableError {}

/// Returns `Ok(())` if the request is worth retrying (network failures, 5xx),
/// or the matching [`NonRetryableError`] for client errors.
pub fn classify_error(error: &reqwest::Error) -> Result<(), NonRetryableError> {
    let url = error
        .url()
        .map(|u| u.to_string())
        .unwrap_or_else(|| "<unknown url>".to_string());

    match error.status() {
        Some(StatusCode::NOT_FOUND) => Err(NonRetryableError::NotFound(url)),
        Some(StatusCode::FORBIDDEN) => Err(NonRetryableError::Forbidden(url)),
        Some(StatusCode::TOO_MANY_REQUESTS) => Err(NonRetryableError::RateLimited(url)),
        Some(s) if s.is_client_error() => Err(NonRetryableError::ClientError(format!(
            "HTTP {} from {}",
            s.as_u16(),
            url
        ))),
        _ => Ok(()),
    }
}

/// Wrap an `error_for_status()` failure, tagging client errors as non-retryable.
pub fn check_retryable(error: reqwest::Error) -> anyhow::Error {
    match classify_error(&error) {
        Ok(()) => anyhow::Error::from(error),
        Err(non_retryable) => anyhow::Error::from(non_retryable),
    }
}
