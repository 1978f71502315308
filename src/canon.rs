//! Canon categories and the per-series inclusion filter.

use crate::episodes::{EpisodeList, ParseWarning};
use std::collections::BTreeSet;
use std::fmt;

/// How the filler list classifies a canon episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CanonCategory {
    Manga,
    Mixed,
    Anime,
}

impl CanonCategory {
    /// Every category, in display order.
    pub const ALL: [CanonCategory; 3] = [
        CanonCategory::Manga,
        CanonCategory::Mixed,
        CanonCategory::Anime,
    ];

    /// Config name of the category.
    pub fn as_str(self) -> &'static str {
        match self {
            CanonCategory::Manga => "manga",
            CanonCategory::Mixed => "mixed",
            CanonCategory::Anime => "anime",
        }
    }

    /// Reads a config entry, ignoring case and surrounding whitespace.
    pub fn from_config(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "manga" => Some(CanonCategory::Manga),
            "mixed" => Some(CanonCategory::Mixed),
            "anime" => Some(CanonCategory::Anime),
            _ => None,
        }
    }

    /// Label used in count lines.
    pub fn label(self) -> &'static str {
        match self {
            CanonCategory::Manga => "Manga",
            CanonCategory::Mixed => "Mixed",
            CanonCategory::Anime => "Anime",
        }
    }
}

impl fmt::Display for CanonCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The canon categories a series asks for.
///
/// Always holds at least one category: a list that names nothing
/// recognizable selects all three.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InclusionFilter {
    categories: BTreeSet<CanonCategory>,
    fell_back: bool,
}

impl InclusionFilter {
    /// Selects every category.
    pub fn all() -> Self {
        Self {
            categories: CanonCategory::ALL.into_iter().collect(),
            fell_back: false,
        }
    }

    /// Normalizes configured category names.
    pub fn from_config<S: AsRef<str>>(entries: &[S]) -> Self {
        let categories: BTreeSet<CanonCategory> = entries
            .iter()
            .filter_map(|entry| CanonCategory::from_config(entry.as_ref()))
            .collect();

        if categories.is_empty() {
            return Self {
                fell_back: !entries.is_empty(),
                ..Self::all()
            };
        }

        Self {
            categories,
            fell_back: false,
        }
    }

    pub fn includes(&self, category: CanonCategory) -> bool {
        self.categories.contains(&category)
    }

    /// Selected categories in display order.
    pub fn categories(&self) -> impl Iterator<Item = CanonCategory> + '_ {
        self.categories.iter().copied()
    }

    /// True when entries were configured but none was recognized.
    pub fn fell_back(&self) -> bool {
        self.fell_back
    }
}

impl Default for InclusionFilter {
    fn default() -> Self {
        Self::all()
    }
}

/// Canon episodes scraped for one show, split by category.
///
/// Categories that were not requested hold empty lists.
#[derive(Debug, Clone, Default)]
pub struct CategorizedEpisodes {
    pub manga: EpisodeList,
    pub mixed: EpisodeList,
    pub anime: EpisodeList,
    /// Unreadable tokens per scraped section.
    pub warnings: Vec<(CanonCategory, Vec<ParseWarning>)>,
}

impl CategorizedEpisodes {
    pub fn get(&self, category: CanonCategory) -> &EpisodeList {
        match category {
            CanonCategory::Manga => &self.manga,
            CanonCategory::Mixed => &self.mixed,
            CanonCategory::Anime => &self.anime,
        }
    }

    pub fn get_mut(&mut self, category: CanonCategory) -> &mut EpisodeList {
        match category {
            CanonCategory::Manga => &mut self.manga,
            CanonCategory::Mixed => &mut self.mixed,
            CanonCategory::Anime => &mut self.anime,
        }
    }

    /// Total number of unreadable tokens across sections.
    pub fn warning_count(&self) -> usize {
        self.warnings.iter().map(|(_, w)| w.len()).sum()
    }
}
