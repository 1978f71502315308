//! Sonarr: the episode tracking service whose monitored flags are kept in
//! sync.

mod client;
pub mod diff;

pub use client::SonarrClient;
pub use diff::{MonitorDiff, diff};

use crate::error::SonarrError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Sonarr's identifier for a series.
pub type SeriesId = i64;

/// Sonarr's identifier for an episode.
pub type EpisodeId = i64;

/// A series as returned by the series lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Series {
    pub id: SeriesId,
    pub title: String,
}

/// An episode as currently recorded by Sonarr.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteEpisode {
    pub id: EpisodeId,
    /// Series-wide episode number; missing or non-positive for specials and
    /// episodes Sonarr has not numbered.
    #[serde(default)]
    pub absolute_episode_number: Option<i32>,
    pub monitored: bool,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub season_number: i32,
    #[serde(default)]
    pub episode_number: i32,
}

impl RemoteEpisode {
    /// The absolute number, if it can be matched against canon lists.
    pub fn addressable_number(&self) -> Option<u32> {
        self.absolute_episode_number
            .filter(|&n| n > 0)
            .map(|n| n as u32)
    }
}

/// Operations the reconciliation needs from Sonarr.
#[async_trait]
pub trait SeriesService: Send + Sync {
    /// Finds the series whose title matches exactly, ignoring case.
    ///
    /// Returns [`SonarrError::SeriesNotFound`] when no candidate matches.
    async fn find_series_id(&self, title: &str) -> Result<SeriesId, SonarrError>;

    /// Lists every episode of a series.
    async fn list_episodes(&self, series_id: SeriesId) -> Result<Vec<RemoteEpisode>, SonarrError>;

    /// Marks the episodes as monitored. The batch succeeds or fails as a
    /// whole.
    async fn set_monitored(&self, episode_ids: &[EpisodeId]) -> Result<(), SonarrError>;

    /// Queues a search for the episodes without waiting for it.
    async fn trigger_search(&self, episode_ids: &[EpisodeId]) -> Result<(), SonarrError>;
}
