//! Compares the episodes that should be monitored with Sonarr's current
//! state.

use super::{EpisodeId, RemoteEpisode};
use crate::episodes::EpisodeNumber;
use std::collections::HashMap;

/// Episodes to flip to monitored, plus how every target was classified.
///
/// `newly_to_monitor + already_monitored + not_found_in_remote` always
/// equals the number of targets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonitorDiff {
    /// Sonarr ids to monitor, in target order.
    pub action_ids: Vec<EpisodeId>,
    pub newly_to_monitor: usize,
    pub already_monitored: usize,
    pub not_found_in_remote: usize,
}

impl MonitorDiff {
    pub fn is_empty(&self) -> bool {
        self.action_ids.is_empty()
    }

    /// Number of targets that were classified.
    pub fn total(&self) -> usize {
        self.newly_to_monitor + self.already_monitored + self.not_found_in_remote
    }
}

/// Joins target episode numbers against Sonarr's episodes.
///
/// Only episodes with a positive absolute number take part. If two episodes
/// share an absolute number the later one wins. With no targets, `remote` is
/// never iterated.
pub fn diff<'a, I>(target: &[EpisodeNumber], remote: I) -> MonitorDiff
where
    I: IntoIterator<Item = &'a RemoteEpisode>,
{
    if target.is_empty() {
        return MonitorDiff::default();
    }

    let by_number: HashMap<EpisodeNumber, &RemoteEpisode> = remote
        .into_iter()
        .filter_map(|episode| episode.addressable_number().map(|n| (n, episode)))
        .collect();

    let mut result = MonitorDiff::default();
    for number in target {
        match by_number.get(number) {
            Some(episode) if !episode.monitored => {
                result.action_ids.push(episode.id);
                result.newly_to_monitor += 1;
            }
            Some(_) => result.already_monitored += 1,
            None => result.not_found_in_remote += 1,
        }
    }
    result
}
