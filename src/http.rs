//! Shared HTTP plumbing: client construction and bounded retries.

use reqwest::{RequestBuilder, Response, StatusCode};
use std::time::Duration;
use tracing::debug;

/// Browser user agent; the filler list site rejects obvious bots.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// How often and how patiently a request is retried.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Extra attempts after the first one.
    pub retries: u32,
    /// Pause between attempts.
    pub wait: Duration,
    /// Whether a request that may have reached the server is sent again.
    pub resend: bool,
}

impl RetryPolicy {
    pub fn new(retries: u32, wait_seconds: u64) -> Self {
        Self {
            retries,
            wait: Duration::from_secs(wait_seconds),
            resend: true,
        }
    }

    /// Same budget, but only failures to connect are retried. For requests
    /// that must not be applied twice.
    pub fn connect_only(self) -> Self {
        Self {
            resend: false,
            ..self
        }
    }

    /// Total number of attempts, first one included.
    pub fn attempts(&self) -> u32 {
        self.retries.saturating_add(1)
    }

    fn retry_reason(&self, result: &Result<Response, reqwest::Error>) -> Option<String> {
        match result {
            Err(e) if e.is_connect() => Some(e.to_string()),
            _ if !self.resend => None,
            Ok(response) if is_retryable_status(response.status()) => {
                Some(format!("HTTP {}", response.status()))
            }
            Ok(_) => None,
            Err(e) => Some(e.to_string()),
        }
    }
}

/// Builds an HTTP client with the given per-request timeout.
pub fn create_client(timeout_seconds: u64) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(timeout_seconds))
        .build()
}

fn is_retryable_status(status: StatusCode) -> bool {
    status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS
}

/// Sends a request, retrying transport errors, 5xx and 429 responses.
/// With [`RetryPolicy::connect_only`] only connection failures are retried.
///
/// `build` is called once per attempt. The last response is returned even if
/// its status is still an error, so callers decide how to report it.
pub async fn send_with_retry<F>(
    policy: RetryPolicy,
    what: &str,
    build: F,
) -> Result<Response, reqwest::Error>
where
    F: Fn() -> RequestBuilder,
{
    let attempts = policy.attempts();
    let mut attempt = 1;

    loop {
        debug!(request = what, attempt, "sending request");
        let result = build().send().await;

        match policy.retry_reason(&result) {
            Some(reason) if attempt < attempts => {
                debug!(
                    request = what,
                    attempt,
                    attempts,
                    wait_secs = policy.wait.as_secs_f64(),
                    "request failed ({}), retrying",
                    reason
                );
                if !policy.wait.is_zero() {
                    tokio::time::sleep(policy.wait).await;
                }
                attempt += 1;
            }
            _ => return result,
        }
    }
}
