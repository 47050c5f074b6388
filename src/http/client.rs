//! HTTP client with built-in retry logic and error handling.

use anyhow::{Context, Result};
use log::{debug, warn};
use reqwest::Client;
use std::time::Duration;

use super::retry::{MAX_RETRIES, NonRetryableError, RETRY_DELAY_MS, check_retryable};

/// HTTP client with built-in retry logic for network operations.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    retry_delay: Duration,
}

impl HttpClient {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            retry_delay: Duration::from_millis(RETRY_DELAY_MS),
        }
    }

    /// Client with the crate's user agent.
    pub fn with_default_client() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("k8s-downloads/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self::new(client))
    }

    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Performs a GET request and returns the body as text.
    /// Automatically retries on transient errors.
    #[tracing::instrument(skip(self))]
    pub async fn get_text(&self, url: &str) -> Result<String> {
        debug!("GET {}...", url);

        self.with_retry("GET", || async {
            let response = self
                .client
                .get(url)
                .send()
                .await
                .with_context(|| format!("Failed to send request to {}", url))?;

            let response = response.error_for_status().map_err(check_retryable)?;

            response
                .text()
                .await
                .with_context(|| format!("Failed to read response body from {}", url))
        })
        .await
    }

    /// Executes an async operation with retry logic.
    async fn with_retry<F, Fut, T>(&self, operation_name: &str, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        let mut last_error = None;

        for attempt in 1..=MAX_RETRIES {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    if !is_retryable_error(&e) {
                        debug!("{}: non-retryable error: {}", operation_name, e);
                        return Err(e);
                    }

                    if attempt < MAX_RETRIES {
                        warn!(
                            "{}: attempt {}/{} failed ({}), retrying in {:?}...",
                            operation_name, attempt, MAX_RETRIES, e, self.retry_delay
                        );
                        tokio::time::sleep(self.retry_delay).await;
                    }
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            anyhow::anyhow!("{}: failed after {} attempts", operation_name, MAX_RETRIES)
        }))
    }
}

fn is_retryable_error(e: &anyhow::Error) -> bool {
    e.downcast_ref::<NonRetryableError>().is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn client() -> HttpClient {
        HttpClient::new(Client::new()).with_retry_delay(Duration::from_millis(1))
    }

    #[tokio::test]
    async fn test_get_text_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/release/stable.txt")
            .with_status(200)
            .with_body("v1.30.2")
            .create_async()
            .await;

        let body = client()
            .get_text(&format!("{}/release/stable.txt", server.url()))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(body, "v1.30.2");
    }

    #[tokio::test]
    async fn test_get_text_not_found_is_not_retried() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/release/stable-1.2.txt")
            .with_status(404)
            .expect(1)
            .create_async()
            .await;

        let result = client()
            .get_text(&format!("{}/release/stable-1.2.txt", server.url()))
            .await;

        mock.assert_async().await;
        let err = result.unwrap_err();
        assert!(err.downcast_ref::<NonRetryableError>().is_some());
    }

    #[tokio::test]
    async fn test_get_text_server_error_is_retried() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/release/stable.txt")
            .with_status(502)
            .expect(MAX_RETRIES)
            .create_async()
            .await;

        let result = client()
            .get_text(&format!("{}/release/stable.txt", server.url()))
            .await;

        mock.assert_async().await;
        assert!(result.is_err());
    }

    #[test]
    fn test_is_retryable_error() {
        let err = anyhow::Error::from(NonRetryableError::NotFound("x".to_string()));
        assert!(!is_retryable_error(&err));

        let err = anyhow::anyhow!("connection reset by peer");
        assert!(is_retryable_error(&err));
    }

    #[tokio::test]
    async fn test_with_retry_retries_until_success() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let result = client()
            .with_retry("test", || {
                let count = counter.clone();
                async move {
                    if count.fetch_add(1, Ordering::SeqCst) < 2 {
                        Err::<&str, _>(anyhow::anyhow!("connection reset"))
                    } else {
                        Ok("success after retries")
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), "success after retries");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_with_retry_stops_on_non_retryable() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let result = client()
            .with_retry("test", || {
                let count = counter.clone();
                async move {
                    count.fetch_add(1, Ordering::SeqCst);
                    Err::<(), _>(anyhow::Error::from(NonRetryableError::Forbidden(
                        "x".to_string(),
                    )))
                }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
