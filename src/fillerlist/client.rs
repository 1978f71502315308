//! HTTP client for animefillerlist.com show pages.

use super::DocumentSource;
use crate::config::FillerListConfig;
use crate::error::ScraperError;
use crate::http::{RetryPolicy, create_client, send_with_retry};
use async_trait::async_trait;
use std::time::Duration;
use url::Url;

/// Fetches show pages from AnimeFillerList.
pub struct FillerListClient {
    client: reqwest::Client,
    base_url: Url,
    retry: RetryPolicy,
    delay_between_requests_sec: f64,
}

impl FillerListClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: &FillerListConfig) -> Result<Self, ScraperError> {
        let base_url = Url::parse(config.base_url.trim())
            .map_err(|e| ScraperError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;

        Ok(Self {
            client: create_client(config.timeout_seconds)?,
            base_url,
            retry: RetryPolicy::new(config.retry_count, config.retry_wait_seconds),
            delay_between_requests_sec: config.delay_between_requests_sec,
        })
    }

    /// Returns the page URL for a show slug: `<base>/shows/<slug>/`.
    pub fn show_url(&self, slug: &str) -> Result<Url, ScraperError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ScraperError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["shows", slug, ""]);
        Ok(url)
    }

    /// Applies rate limiting delay.
    async fn rate_limit(&self) {
        if let Ok(delay) = Duration::try_from_secs_f64(self.delay_between_requests_sec)
            && !delay.is_zero()
        {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl DocumentSource for FillerListClient {
    fn name(&self) -> &'static str {
        "AnimeFillerList"
    }

    async fn fetch(&self, slug: &str) -> Result<String, ScraperError> {
        let url = self.show_url(slug)?;
        self.rate_limit().await;

        let response = send_with_retry(self.retry, "fillerlist show page", || {
            self.client.get(url.clone())
        })
        .await?;

        if !response.status().is_success() {
            return Err(ScraperError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(base_url: &str) -> FillerListConfig {
        FillerListConfig {
            base_url: base_url.to_string(),
            timeout_seconds: 5,
            retry_count: 0,
            retry_wait_seconds: 0,
            delay_between_requests_sec: 0.0,
        }
    }

    #[test]
    fn test_show_url() {
        let client = FillerListClient::new(&config_for("https://www.animefillerlist.com")).unwrap();
        assert_eq!(
            client.show_url("one-piece").unwrap().as_str(),
            "https://www.animefillerlist.com/shows/one-piece/"
        );

        let client = FillerListClient::new(&config_for("http://mirror.local/afl/")).unwrap();
        assert_eq!(
            client.show_url("bleach").unwrap().as_str(),
            "http://mirror.local/afl/shows/bleach/"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            FillerListClient::new(&config_for("not a url")),
            Err(ScraperError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/shows/naruto/"))
            .and(header_exists("user-agent"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
            .expect(1)
            .mount(&server)
            .await;

        let client = FillerListClient::new(&config_for(&server.uri())).unwrap();
        let html = client.fetch("naruto").await.unwrap();
        assert_eq!(html, "<html>ok</html>");
    }

    #[tokio::test]
    async fn test_fetch_non_success_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = FillerListClient::new(&config_for(&server.uri())).unwrap();
        let err = client.fetch("unknown-show").await.unwrap_err();
        match err {
            ScraperError::Status { url, status } => {
                assert_eq!(status, 404);
                assert!(url.ends_with("/shows/unknown-show/"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
