//! Kotei - keeps Sonarr monitoring the canon episodes of long-running anime.
//!
//! This library provides functionality for:
//! - Scraping canon episode lists from AnimeFillerList
//! - Planning which absolute episodes should be monitored
//! - Diffing that plan against Sonarr and applying the changes
//! - Running the whole pass once or on a cron schedule

pub mod canon;
pub mod config;
pub mod console;
pub mod episodes;
pub mod error;
pub mod fillerlist;
mod http;
pub mod planner;
pub mod processor;
pub mod report;
pub mod scheduler;
pub mod sonarr;
pub mod utils;

// Re-export commonly used types
pub use canon::{CanonCategory, CategorizedEpisodes, InclusionFilter};
pub use config::Config;
pub use console::Console;
pub use episodes::{EpisodeList, EpisodeNumber, ParseWarning};
pub use error::{ConfigError, ProcessError, ScraperError, SonarrError};
pub use fillerlist::{DocumentSource, FillerListClient};
pub use processor::SeriesProcessor;
pub use report::{Reporter, RunReport, RunTrigger, SeriesOutcome, SeriesReport};
pub use scheduler::Checker;
pub use sonarr::{MonitorDiff, SeriesService, SonarrClient};
