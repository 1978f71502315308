//! One reconciliation pass for one configured series.

use crate::canon::InclusionFilter;
use crate::config::AnimeConfig;
use crate::error::{ProcessError, SonarrError};
use crate::fillerlist::{Categorizer, DocumentSource};
use crate::planner::plan;
use crate::report::{SeriesDetails, SeriesOutcome, SeriesReport, StepStatus};
use crate::sonarr::{MonitorDiff, SeriesService, diff};
use tracing::debug;

/// Runs series passes against a canon source and a Sonarr instance.
pub struct SeriesProcessor<'a> {
    categorizer: Categorizer<'a>,
    sonarr: &'a dyn SeriesService,
    dry_run: bool,
}

impl<'a> SeriesProcessor<'a> {
    pub fn new(source: &'a dyn DocumentSource, sonarr: &'a dyn SeriesService, dry_run: bool) -> Self {
        Self {
            categorizer: Categorizer::new(source),
            sonarr,
            dry_run,
        }
    }

    /// Processes one series. Never fails: errors end up in the outcome.
    pub async fn process(&self, anime: &AnimeConfig) -> SeriesReport {
        let title = anime.display_name().to_string();
        let mut details = SeriesDetails {
            cutoff: anime.cutoff_episode,
            ..Default::default()
        };

        let outcome = match self.reconcile(anime, &mut details).await {
            Ok(true) => SeriesOutcome::OkActionTaken,
            Ok(false) => SeriesOutcome::OkNoAction,
            Err(e) => {
                debug!(series = %title, "series ended early: {}", e);
                SeriesOutcome::from_error(&e)
            }
        };

        SeriesReport {
            title,
            outcome,
            details,
        }
    }

    /// Returns whether any episode needed monitoring.
    async fn reconcile(
        &self,
        anime: &AnimeConfig,
        details: &mut SeriesDetails,
    ) -> Result<bool, ProcessError> {
        anime.validate()?;

        let filter = InclusionFilter::from_config(&anime.include_canon_types);
        details.filter = Some(filter.clone());

        let categorized = self
            .categorizer
            .categorize(anime.title.trim(), &filter)
            .await?;
        details.category_counts = filter
            .categories()
            .map(|category| (category, categorized.get(category).len()))
            .collect();
        details.warnings = categorized.warnings.clone();

        let planned = plan(&categorized, &filter, anime.cutoff_episode);
        details.planned = Some(planned.clone());

        let series_id = self
            .sonarr
            .find_series_id(anime.sonarr_title.trim())
            .await?;
        details.series_id = Some(series_id);

        let changes = if planned.is_empty() {
            MonitorDiff::default()
        } else {
            let episodes = self.sonarr.list_episodes(series_id).await?;
            diff(&planned, &episodes)
        };
        let action_ids = changes.action_ids.clone();
        details.diff = Some(changes);

        let search_skipped = if anime.search_enabled {
            StepStatus::NotNeeded
        } else {
            StepStatus::Disabled
        };

        if action_ids.is_empty() {
            details.monitor = Some(StepStatus::NotNeeded);
            details.search = Some(search_skipped);
            return Ok(false);
        }

        if self.dry_run {
            debug!(series_id, count = action_ids.len(), "dry run, not monitoring");
            details.monitor = Some(StepStatus::DryRun);
            details.search = Some(if anime.search_enabled {
                StepStatus::DryRun
            } else {
                StepStatus::Disabled
            });
            return Ok(true);
        }

        let monitored = self.sonarr.set_monitored(&action_ids).await;
        details.monitor = Some(step_status(&monitored));

        // The search goes out even if monitoring failed.
        let searched = if anime.search_enabled {
            let result = self.sonarr.trigger_search(&action_ids).await;
            details.search = Some(step_status(&result));
            result
        } else {
            details.search = Some(StepStatus::Disabled);
            Ok(())
        };

        monitored?;
        searched?;
        Ok(true)
    }
}

fn step_status(result: &Result<(), SonarrError>) -> StepStatus {
    match result {
        Ok(()) => StepStatus::Done,
        Err(e) => StepStatus::Failed(e.to_string()),
    }
}
