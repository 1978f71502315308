//! Sonarr v3 REST client.

use super::{EpisodeId, RemoteEpisode, Series, SeriesId, SeriesService};
use crate::config::SonarrConfig;
use crate::error::SonarrError;
use crate::http::{RetryPolicy, create_client, send_with_retry};
use crate::utils::check_response_status;
use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;
use url::Url;

/// Header carrying the Sonarr API key.
const API_KEY_HEADER: &str = "X-Api-Key";

/// Body of `PUT /episode/monitor`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EpisodeMonitorRequest<'a> {
    episode_ids: &'a [EpisodeId],
    monitored: bool,
}

/// Body of `POST /command`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CommandRequest<'a> {
    name: &'static str,
    episode_ids: &'a [EpisodeId],
}

/// Client for a single Sonarr instance.
pub struct SonarrClient {
    client: reqwest::Client,
    api_base: Url,
    api_key: String,
    retry: RetryPolicy,
}

impl SonarrClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: &SonarrConfig) -> Result<Self, SonarrError> {
        let joined = format!(
            "{}/{}",
            config.base_url.trim().trim_end_matches('/'),
            config.api_path.trim().trim_matches('/')
        );
        let api_base = Url::parse(&joined)
            .map_err(|e| SonarrError::InvalidUrl(format!("{}: {}", joined, e)))?;

        Ok(Self {
            client: create_client(config.timeout_seconds)?,
            api_base,
            api_key: config.api_key.clone(),
            retry: RetryPolicy::new(config.retry_count, config.retry_wait_seconds),
        })
    }

    /// Builds `<base><api_path>/<path>` with optional query parameters.
    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, SonarrError> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| SonarrError::InvalidUrl(self.api_base.to_string()))?
            .pop_if_empty()
            .extend(path.split('/'));
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }
}

#[async_trait]
impl SeriesService for SonarrClient {
    async fn find_series_id(&self, title: &str) -> Result<SeriesId, SonarrError> {
        let url = self.endpoint("series", &[("term", title)])?;
        let response = send_with_retry(self.retry, "sonarr series lookup", || {
            self.client
                .get(url.clone())
                .header(API_KEY_HEADER, &self.api_key)
        })
        .await?;
        let candidates: Vec<Series> = check_response_status(response, &[]).await?.json().await?;

        let wanted = title.trim().to_lowercase();
        match candidates
            .iter()
            .find(|series| series.title.trim().to_lowercase() == wanted)
        {
            Some(series) => {
                debug!(title = %series.title, id = series.id, "found Sonarr series");
                Ok(series.id)
            }
            None => Err(SonarrError::SeriesNotFound {
                title: title.to_string(),
                candidates: candidates.len(),
            }),
        }
    }

    async fn list_episodes(&self, series_id: SeriesId) -> Result<Vec<RemoteEpisode>, SonarrError> {
        let id = series_id.to_string();
        let url = self.endpoint("episode", &[("seriesId", id.as_str())])?;
        let response = send_with_retry(self.retry, "sonarr episode list", || {
            self.client
                .get(url.clone())
                .header(API_KEY_HEADER, &self.api_key)
        })
        .await?;
        let episodes: Vec<RemoteEpisode> =
            check_response_status(response, &[]).await?.json().await?;

        debug!(series_id, count = episodes.len(), "listed Sonarr episodes");
        Ok(episodes)
    }

    async fn set_monitored(&self, episode_ids: &[EpisodeId]) -> Result<(), SonarrError> {
        if episode_ids.is_empty() {
            return Ok(());
        }

        let url = self.endpoint("episode/monitor", &[])?;
        let body = EpisodeMonitorRequest {
            episode_ids,
            monitored: true,
        };
        let response = send_with_retry(self.retry, "sonarr monitor episodes", || {
            self.client
                .put(url.clone())
                .header(API_KEY_HEADER, &self.api_key)
                .json(&body)
        })
        .await?;
        check_response_status(response, &[200, 202]).await?;

        debug!(count = episode_ids.len(), "episodes set to monitored");
        Ok(())
    }

    async fn trigger_search(&self, episode_ids: &[EpisodeId]) -> Result<(), SonarrError> {
        if episode_ids.is_empty() {
            return Ok(());
        }

        let url = self.endpoint("command", &[])?;
        let body = CommandRequest {
            name: "EpisodeSearch",
            episode_ids,
        };
        // A resent command would queue a second search.
        let policy = self.retry.connect_only();
        let response = send_with_retry(policy, "sonarr episode search", || {
            self.client
                .post(url.clone())
                .header(API_KEY_HEADER, &self.api_key)
                .json(&body)
        })
        .await?;
        check_response_status(response, &[201]).await?;

        debug!(count = episode_ids.len(), "episode search queued");
        Ok(())
    }
}
