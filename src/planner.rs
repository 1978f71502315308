//! Turns categorized canon episodes into the episodes to reconcile.

use crate::canon::{CategorizedEpisodes, InclusionFilter};
use crate::episodes::EpisodeNumber;
use std::collections::BTreeSet;

/// Merges the selected categories and applies the cutoff.
///
/// The result is ascending and free of duplicates. A cutoff of 0 keeps
/// everything.
pub fn plan(
    categorized: &CategorizedEpisodes,
    filter: &InclusionFilter,
    cutoff: EpisodeNumber,
) -> Vec<EpisodeNumber> {
    let merged: BTreeSet<EpisodeNumber> = filter
        .categories()
        .flat_map(|category| categorized.get(category).iter())
        .filter(|&episode| episode >= cutoff)
        .collect();

    merged.into_iter().collect()
}
