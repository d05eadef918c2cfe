//! Low-level request loop with retry.

use std::time::Duration;

use reqwest::Method;
use url::Url;

use crate::ArticClient;
use crate::error::ApiError;
use crate::error::Error;

impl ArticClient {
    /// Makes an HTTP request with retry logic.
    ///
    /// Retries 429, 5xx and network failures according to the client's
    /// [`RetryConfig`](crate::retry::RetryConfig). Any other non-success status
    /// is returned as [`ApiError::Http`].
    pub(crate) async fn request(&self, method: Method, url: &Url) -> Result<reqwest::Response, Error> {
        let retry_config = &self.inner.retry_config;
        let mut attempts = 0;
        let mut delay = retry_config.initial_delay;

        loop {
            let result = self.send_request_inner(method.clone(), url).await;

            match result {
                Ok(response) => {
                    let status = response.status();

                    if status.as_u16() == 429 {
                        if attempts >= retry_config.max_retries {
                            let retry_after = parse_retry_after(&response);
                            return Err(Error::RateLimit { retry_after });
                        }

                        let wait = retry_config.rate_limit_wait(parse_retry_after(&response), delay);
                        log::warn!("rate limited, retrying in {:?}", wait);
                        tokio::time::sleep(wait).await;
                        delay = retry_config.next_delay(delay);
                        attempts += 1;
                        continue;
                    }

                    if status.is_server_error() {
                        if attempts >= retry_config.max_retries {
                            let body = response.text().await.unwrap_or_default();
                            return Err(ApiError::http(status.as_u16(), body).into());
                        }

                        log::warn!("server error {}, retrying in {:?}", status, delay);
                        tokio::time::sleep(delay).await;
                        delay = retry_config.next_delay(delay);
                        attempts += 1;
                        continue;
                    }

                    if status.is_success() {
                        return Ok(response);
                    } else {
                        let body = response.text().await.unwrap_or_default();
                        return Err(ApiError::http(status.as_u16(), body).into());
                    }
                }
                Err(e) => {
                    let is_network = matches!(&e, ApiError::Network(_) | ApiError::Timeout(_));

                    if is_network && attempts < retry_config.max_retries {
                        log::warn!("{}, retrying in {:?}", e, delay);
                        tokio::time::sleep(delay).await;
                        delay = retry_config.next_delay(delay);
                        attempts += 1;
                        continue;
                    }

                    return Err(e.into());
                }
            }
        }
    }

    /// Inner request method without retry logic.
    async fn send_request_inner(&self, method: Method, url: &Url) -> Result<reqwest::Response, ApiError> {
        let mut request = self
            .inner
            .http_client
            .request(method, url.clone())
            .header("Accept", "application/json");

        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        request.send().await.map_err(|e| match self.inner.timeout {
            Some(timeout) if e.is_timeout() => ApiError::Timeout(timeout),
            _ => ApiError::Network(e),
        })
    }
}

/// Parses the Retry-After header value (seconds).
fn parse_retry_after(response: &reqwest::Response) -> Option<Duration> {
    response
        .headers()
        .get("Retry-After")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}
