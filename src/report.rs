//! Per-series outcomes, run statistics and their terminal rendering.
//!
//! The reconciliation returns plain values; nothing in here talks to the
//! network. [`Reporter`] turns those values into lines for the console,
//! deciding how much to show from the run trigger.

use crate::canon::{CanonCategory, InclusionFilter};
use crate::console::{Console, Style};
use crate::episodes::{EpisodeNumber, ParseWarning};
use crate::error::ProcessError;
use crate::sonarr::{MonitorDiff, SeriesId};
use crate::utils::ordinal_suffix;
use chrono::{DateTime, Datelike, Local};
use std::time::{Duration, Instant};

/// What kind of failure ended a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Incomplete series entry.
    Config,
    /// Canon list fetch failed.
    Source,
    /// Sonarr rejected or failed a request.
    Remote,
}

/// Final state of one series in one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeriesOutcome {
    OkNoAction,
    OkActionTaken,
    SkippedNotFound,
    HardError { kind: FailureKind, reason: String },
}

impl SeriesOutcome {
    /// Classifies an error that stopped a series.
    pub fn from_error(error: &ProcessError) -> Self {
        if error.is_not_found() {
            return SeriesOutcome::SkippedNotFound;
        }
        let kind = match error {
            ProcessError::Config(_) => FailureKind::Config,
            ProcessError::Source(_) => FailureKind::Source,
            ProcessError::Remote(_) => FailureKind::Remote,
        };
        SeriesOutcome::HardError {
            kind,
            reason: error.to_string(),
        }
    }

    pub fn is_hard_error(&self) -> bool {
        matches!(self, SeriesOutcome::HardError { .. })
    }
}

/// Result of a mutating Sonarr step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    /// Turned off for this series.
    Disabled,
    /// Nothing to do.
    NotNeeded,
    /// Would have run; suppressed by dry run.
    DryRun,
    Done,
    Failed(String),
}

/// What happened while a series was processed, for display.
///
/// Fields stay `None` for steps the pass never reached.
#[derive(Debug, Clone, Default)]
pub struct SeriesDetails {
    pub filter: Option<InclusionFilter>,
    pub category_counts: Vec<(CanonCategory, usize)>,
    pub warnings: Vec<(CanonCategory, Vec<ParseWarning>)>,
    pub cutoff: EpisodeNumber,
    pub planned: Option<Vec<EpisodeNumber>>,
    pub series_id: Option<SeriesId>,
    pub diff: Option<MonitorDiff>,
    pub monitor: Option<StepStatus>,
    pub search: Option<StepStatus>,
}

impl SeriesDetails {
    fn scraped_total(&self) -> usize {
        self.category_counts.iter().map(|(_, n)| n).sum()
    }

    fn action_count(&self) -> usize {
        self.diff.as_ref().map_or(0, |d| d.action_ids.len())
    }
}

/// One series' outcome plus the details behind it.
#[derive(Debug, Clone)]
pub struct SeriesReport {
    pub title: String,
    pub outcome: SeriesOutcome,
    pub details: SeriesDetails,
}

/// Why a run is happening.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunTrigger {
    /// Single-run mode.
    Manual,
    /// First pass when the scheduler starts.
    Initial,
    /// A cron tick.
    Scheduled,
}

impl RunTrigger {
    /// Manual and initial runs always report everything.
    pub fn is_verbose(self) -> bool {
        !matches!(self, RunTrigger::Scheduled)
    }
}

/// Statistics for one run, folded one series at a time.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub trigger: RunTrigger,
    pub dry_run: bool,
    pub started_at: DateTime<Local>,
    pub duration: Duration,
    pub processed: usize,
    pub ok: usize,
    pub skipped: usize,
    /// Hard errors from the filler list or Sonarr.
    pub failed: usize,
    /// Hard errors from incomplete series entries.
    pub other: usize,
    pub actions: usize,
    pub series: Vec<SeriesReport>,
    started: Instant,
}

impl RunReport {
    pub fn new(trigger: RunTrigger, dry_run: bool) -> Self {
        Self {
            trigger,
            dry_run,
            started_at: Local::now(),
            duration: Duration::ZERO,
            processed: 0,
            ok: 0,
            skipped: 0,
            failed: 0,
            other: 0,
            actions: 0,
            series: Vec::new(),
            started: Instant::now(),
        }
    }

    /// Folds one series into the totals.
    pub fn record(&mut self, report: SeriesReport) {
        self.processed += 1;
        match &report.outcome {
            SeriesOutcome::OkNoAction => self.ok += 1,
            SeriesOutcome::OkActionTaken => {
                self.ok += 1;
                self.actions += 1;
            }
            SeriesOutcome::SkippedNotFound => self.skipped += 1,
            SeriesOutcome::HardError {
                kind: FailureKind::Config,
                ..
            } => self.other += 1,
            SeriesOutcome::HardError { .. } => self.failed += 1,
        }
        self.series.push(report);
    }

    /// Stops the clock.
    pub fn finish(&mut self) {
        self.duration = self.started.elapsed();
    }

    pub fn hard_errors(&self) -> usize {
        self.failed + self.other
    }

    pub fn has_hard_errors(&self) -> bool {
        self.hard_errors() > 0
    }

    /// A scheduled run that changed nothing and hit no errors.
    ///
    /// Series missing from Sonarr do not count against this.
    pub fn is_quiet(&self) -> bool {
        self.trigger == RunTrigger::Scheduled && self.actions == 0 && !self.has_hard_errors()
    }
}

/// Renders reports as console lines.
#[derive(Debug, Clone, Copy)]
pub struct Reporter {
    console: Console,
}

impl Reporter {
    pub fn new(console: Console) -> Self {
        Self { console }
    }

    fn tag(&self, tag: &str, styles: &[Style]) -> String {
        self.console.tag(tag, styles)
    }

    /// Lines printed before the first series.
    pub fn opening_lines(&self, trigger: RunTrigger, series_count: usize) -> Vec<String> {
        if !trigger.is_verbose() {
            return Vec::new();
        }
        vec![format!(
            "{} Processing {} anime series...",
            self.tag("INFO", &[Style::Green]),
            series_count
        )]
    }

    /// Banner for a scheduled run with something to show.
    pub fn banner_lines(&self, started_at: &DateTime<Local>) -> Vec<String> {
        vec![
            String::new(),
            format!(
                "{} ----- Scheduled Run Starting ({}) -----",
                self.schedule_tag(),
                started_at.format("%Y-%m-%d %H:%M:%S")
            ),
        ]
    }

    fn schedule_tag(&self) -> String {
        self.tag("SCHEDULE", &[Style::Yellow, Style::Bold])
    }

    /// Whether a series is shown at all for this trigger.
    pub fn is_visible(trigger: RunTrigger, series: &SeriesReport) -> bool {
        trigger.is_verbose()
            || matches!(
                series.outcome,
                SeriesOutcome::OkActionTaken | SeriesOutcome::HardError { .. }
            )
    }

    /// Lines for one series. Scheduled runs only show series that acted or
    /// failed, and only their action and error lines.
    pub fn series_lines(&self, trigger: RunTrigger, series: &SeriesReport) -> Vec<String> {
        if !Self::is_visible(trigger, series) {
            return Vec::new();
        }
        let verbose = trigger.is_verbose();
        let details = &series.details;
        let filler = self.tag("FILLER", &[Style::Magenta]);
        let sonarr = self.tag("SONARR", &[Style::Cyan]);
        let mut lines = vec![
            String::new(),
            format!(
                "  {}{}",
                self.console.style("Processing: ", &[Style::Blue, Style::Bold]),
                series.title
            ),
        ];
        let mut detail = |line: String| {
            if verbose {
                lines.push(line);
            }
        };

        if let Some(filter) = &details.filter
            && filter.fell_back()
        {
            detail(format!(
                "  {} No valid types specified for '{}'. Defaulting to all.",
                self.tag("FILLER", &[Style::Yellow]),
                series.title
            ));
        }

        if !details.category_counts.is_empty() {
            let counts: Vec<String> = details
                .category_counts
                .iter()
                .map(|(category, n)| format!("{}: {}", category.label(), n))
                .collect();
            detail(format!("  {} Counts - {}.", filler, counts.join(", ")));
        }

        for (category, warnings) in &details.warnings {
            let listed: Vec<String> = warnings.iter().map(|w| w.to_string()).collect();
            detail(format!(
                "  {} Parse warnings ({}): [{}]",
                self.tag("FILLER", &[Style::Yellow]),
                category,
                listed.join(", ")
            ));
        }

        if let Some(planned) = &details.planned {
            if planned.is_empty() {
                let types: Vec<&str> = details
                    .filter
                    .as_ref()
                    .map(|f| f.categories().map(CanonCategory::as_str).collect())
                    .unwrap_or_default();
                detail(format!(
                    "  {} No relevant episodes from [{}] types (cutoff >= {}).",
                    self.tag("Processor", &[Style::Green]),
                    types.join(" "),
                    details.cutoff
                ));
            } else {
                detail(format!(
                    "  {} Canon episodes ({} >= {}): {} found.",
                    filler,
                    self.console.style("cutoff", &[Style::Cyan]),
                    self.console.style(&details.cutoff.to_string(), &[Style::Cyan]),
                    self.console.count(planned.len())
                ));
            }
        }

        if let Some(id) = details.series_id {
            detail(format!(
                "  {} Series {} (ID: {})",
                sonarr,
                self.console.style(&format!("'{}'", series.title), &[Style::Blue]),
                self.console.style(&id.to_string(), &[Style::Yellow])
            ));
        }

        if let Some(diff) = &details.diff
            && diff.total() > 0
        {
            let not_found = if diff.not_found_in_remote > 0 {
                format!(", {} not found in Sonarr", diff.not_found_in_remote)
            } else {
                String::new()
            };
            detail(format!(
                "  {} Episodes: {} to newly monitor, {} already monitored{}.",
                sonarr,
                self.console.count(diff.newly_to_monitor),
                self.console.style(&diff.already_monitored.to_string(), &[Style::Green]),
                not_found
            ));
        }

        let actions = details.action_count();
        match &details.monitor {
            Some(StepStatus::NotNeeded) => {
                let planned = details.planned.as_ref().map_or(0, Vec::len);
                if verbose && planned > 0 {
                    lines.push(format!(
                        "  {} Monitoring: No update needed (all relevant canon episodes already monitored).",
                        sonarr
                    ));
                } else if verbose && details.scraped_total() > 0 {
                    lines.push(format!(
                        "  {} Monitoring: No update needed (no episodes to process from canon list).",
                        sonarr
                    ));
                }
            }
            Some(status) => {
                lines.push(format!(
                    "  {} Identified {} new episode(s) to monitor.",
                    sonarr, actions
                ));
                lines.push(format!(
                    "  {} Monitoring {} episodes... {}",
                    sonarr,
                    self.console.count(actions),
                    self.step_result(status, "OK")
                ));
            }
            None => {}
        }

        match &details.search {
            Some(StepStatus::Disabled) if verbose => {
                lines.push(format!("  {} Search: Disabled.", sonarr));
            }
            Some(StepStatus::NotNeeded) if verbose => lines.push(format!(
                "  {} Search: Skipped (no new episodes were monitored to trigger search).",
                sonarr
            )),
            Some(StepStatus::Disabled | StepStatus::NotNeeded) | None => {}
            Some(status) => {
                lines.push(format!(
                    "  {} Queuing search for {} newly monitored episode(s)... {}",
                    self.tag("SONARR", &[Style::Cyan, Style::Bold]),
                    actions,
                    self.step_result(status, "Queued")
                ));
            }
        }

        let status = match &series.outcome {
            SeriesOutcome::OkActionTaken => self
                .console
                .style("[STATUS] OK (New actions taken)", &[Style::Green, Style::Bold]),
            SeriesOutcome::OkNoAction => self
                .console
                .style("[STATUS] OK (No new actions)", &[Style::Green, Style::Bold]),
            SeriesOutcome::SkippedNotFound => {
                lines.push(format!(
                    "  {} Series '{}' {} in Sonarr.",
                    sonarr,
                    series.title,
                    self.console.style("not found", &[Style::Red, Style::Bold])
                ));
                self.console
                    .style("[STATUS] SKIPPED (Not Found)", &[Style::Yellow])
            }
            SeriesOutcome::HardError { reason, .. } => {
                lines.push(format!(
                    "  {} {}",
                    self.console.style("!!! ERROR", &[Style::Red, Style::Bold]),
                    reason
                ));
                self.console
                    .style("[STATUS] ERROR", &[Style::Red, Style::Bold])
            }
        };
        lines.push(format!("  {}", status));
        lines
    }

    fn step_result(&self, status: &StepStatus, success: &str) -> String {
        match status {
            StepStatus::DryRun => self.console.style("(DRY RUN)", &[Style::Yellow, Style::Bold]),
            StepStatus::Failed(_) => self.console.style("FAILED", &[Style::Red, Style::Bold]),
            _ => self.console.style(success, &[Style::Green]),
        }
    }

    /// Lines printed once the run is over.
    pub fn closing_lines(&self, report: &RunReport) -> Vec<String> {
        if report.is_quiet() {
            return vec![self.quiet_line(report)];
        }

        let mut stats = vec![
            format!(
                "Processed: {}",
                self.console
                    .style(&report.processed.to_string(), &[Style::Blue, Style::Bold])
            ),
            format!("OK: {}", self.console.count(report.ok)),
        ];
        if report.skipped > 0 {
            stats.push(format!(
                "Skipped: {}",
                self.console
                    .style(&report.skipped.to_string(), &[Style::Yellow, Style::Bold])
            ));
        }
        if report.failed > 0 {
            stats.push(format!(
                "Failed: {}",
                self.console
                    .style(&report.failed.to_string(), &[Style::Red, Style::Bold])
            ));
        }
        if report.other > 0 {
            stats.push(
                self.console
                    .style(&format!("Other Issues: {}", report.other), &[Style::Magenta]),
            );
        }

        let mut lines = vec![
            String::new(),
            format!(
                "{} {}",
                self.tag("Run Stats", &[Style::Cyan]),
                stats.join(" | ")
            ),
        ];

        if report.dry_run {
            lines.push(format!(
                "  {}",
                self.console
                    .style("(Dry Run - No changes made)", &[Style::Yellow, Style::Bold])
            ));
        }

        if report.has_hard_errors() {
            lines.push(
                self.console
                    .style("  Run completed with errors.", &[Style::Red]),
            );
        } else if report.skipped > 0 {
            lines.push(self.console.style(
                "  Run completed with some non-critical issues or skips.",
                &[Style::Yellow],
            ));
        } else {
            lines.push(
                self.console
                    .style("  Run completed successfully.", &[Style::Green]),
            );
        }

        if report.trigger == RunTrigger::Scheduled {
            lines.push(format!(
                "{} ----- Scheduled Run Finished ({}, Duration: {}) -----",
                self.schedule_tag(),
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                format_duration(report.duration)
            ));
            if report.has_hard_errors() || report.skipped > 0 {
                lines.push(format!(
                    "{}   Note: Scheduled run completed with {}.",
                    self.schedule_tag(),
                    self.console.style("issues", &[Style::Yellow])
                ));
            }
        }

        lines
    }

    fn quiet_line(&self, report: &RunReport) -> String {
        let message = match report.processed {
            0 => "No anime configured.".to_string(),
            1 => "1 series checked, all quiet.".to_string(),
            n => format!("{} series checked, all quiet.", n),
        };
        let skipped = if report.skipped > 0 {
            format!(" ({} skipped, not in Sonarr)", report.skipped)
        } else {
            String::new()
        };
        let day = report.started_at.day();
        let details = format!(
            "({}{} {} at {}, took {})",
            day,
            ordinal_suffix(day),
            report.started_at.format("%B %Y"),
            report.started_at.format("%H:%M"),
            format_duration(report.duration)
        );
        format!(
            "{} {}{} {}",
            self.schedule_tag(),
            message,
            skipped,
            self.console.muted(&details)
        )
    }
}

/// Rounds to milliseconds for display, e.g. `1.234s`.
fn format_duration(duration: Duration) -> String {
    format!("{:?}", Duration::from_millis(duration.as_millis() as u64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, ScraperError, SonarrError};
    use chrono::TimeZone;

    fn series(title: &str, outcome: SeriesOutcome) -> SeriesReport {
        SeriesReport {
            title: title.to_string(),
            outcome,
            details: SeriesDetails::default(),
        }
    }

    fn hard_error(kind: FailureKind) -> SeriesOutcome {
        SeriesOutcome::HardError {
            kind,
            reason: "boom".to_string(),
        }
    }

    fn run(trigger: RunTrigger, outcomes: Vec<SeriesOutcome>) -> RunReport {
        let mut report = RunReport::new(trigger, false);
        for (i, outcome) in outcomes.into_iter().enumerate() {
            report.record(series(&format!("Show {}", i), outcome));
        }
        report.finish();
        report
    }

    fn reporter() -> Reporter {
        Reporter::new(Console::with_colors(false))
    }

    #[test]
    fn test_outcome_from_error() {
        let not_found = ProcessError::Remote(SonarrError::SeriesNotFound {
            title: "X".to_string(),
            candidates: 0,
        });
        assert_eq!(
            SeriesOutcome::from_error(&not_found),
            SeriesOutcome::SkippedNotFound
        );

        let api = ProcessError::Remote(SonarrError::Api {
            status: 500,
            body: String::new(),
        });
        assert!(matches!(
            SeriesOutcome::from_error(&api),
            SeriesOutcome::HardError {
                kind: FailureKind::Remote,
                ..
            }
        ));

        let source = ProcessError::Source(ScraperError::Status {
            url: "u".to_string(),
            status: 503,
        });
        assert!(matches!(
            SeriesOutcome::from_error(&source),
            SeriesOutcome::HardError {
                kind: FailureKind::Source,
                ..
            }
        ));

        let config = ProcessError::Config(ConfigError::MissingValue("title".to_string()));
        assert!(matches!(
            SeriesOutcome::from_error(&config),
            SeriesOutcome::HardError {
                kind: FailureKind::Config,
                ..
            }
        ));
    }

    #[test]
    fn test_tallies() {
        let report = run(
            RunTrigger::Manual,
            vec![
                SeriesOutcome::OkNoAction,
                SeriesOutcome::OkActionTaken,
                SeriesOutcome::SkippedNotFound,
                hard_error(FailureKind::Remote),
                hard_error(FailureKind::Config),
            ],
        );
        assert_eq!(report.processed, 5);
        assert_eq!(report.ok, 2);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.failed, 1);
        assert_eq!(report.other, 1);
        assert_eq!(report.actions, 1);
        assert_eq!(report.hard_errors(), 2);
        assert_eq!(report.series.len(), 5);
    }

    #[test]
    fn test_quiet_only_for_uneventful_scheduled_runs() {
        let uneventful = vec![SeriesOutcome::OkNoAction, SeriesOutcome::SkippedNotFound];

        assert!(run(RunTrigger::Scheduled, uneventful.clone()).is_quiet());
        assert!(!run(RunTrigger::Manual, uneventful.clone()).is_quiet());
        assert!(!run(RunTrigger::Initial, uneventful).is_quiet());

        assert!(!run(RunTrigger::Scheduled, vec![SeriesOutcome::OkActionTaken]).is_quiet());
        assert!(!run(RunTrigger::Scheduled, vec![hard_error(FailureKind::Source)]).is_quiet());
        assert!(run(RunTrigger::Scheduled, vec![]).is_quiet());
    }

    #[test]
    fn test_quiet_line() {
        let mut report = run(
            RunTrigger::Scheduled,
            vec![SeriesOutcome::OkNoAction, SeriesOutcome::SkippedNotFound],
        );
        report.started_at = Local.with_ymd_and_hms(2026, 10, 2, 9, 5, 0).unwrap();
        report.duration = Duration::from_millis(1234);

        let lines = reporter().closing_lines(&report);
        assert_eq!(
            lines,
            vec![
                "[SCHEDULE] 2 series checked, all quiet. (1 skipped, not in Sonarr) \
                 (2nd October 2026 at 09:05, took 1.234s)"
                    .to_string()
            ]
        );
    }

    #[test]
    fn test_closing_lines_with_errors() {
        let report = run(
            RunTrigger::Manual,
            vec![
                SeriesOutcome::OkActionTaken,
                SeriesOutcome::SkippedNotFound,
                hard_error(FailureKind::Remote),
            ],
        );
        let lines = reporter().closing_lines(&report);
        assert_eq!(lines[1], "[Run Stats] Processed: 3 | OK: 1 | Skipped: 1 | Failed: 1");
        assert_eq!(lines.last().unwrap(), "  Run completed with errors.");
    }

    #[test]
    fn test_closing_lines_dry_run_success() {
        let mut report = RunReport::new(RunTrigger::Manual, true);
        report.record(series("A", SeriesOutcome::OkActionTaken));
        let lines = reporter().closing_lines(&report);
        assert!(lines.contains(&"  (Dry Run - No changes made)".to_string()));
        assert_eq!(lines.last().unwrap(), "  Run completed successfully.");
    }

    #[test]
    fn test_scheduled_closing_lines_have_footer() {
        let report = run(RunTrigger::Scheduled, vec![SeriesOutcome::OkActionTaken]);
        let lines = reporter().closing_lines(&report);
        assert!(lines.last().unwrap().contains("----- Scheduled Run Finished"));
    }

    #[test]
    fn test_scheduled_runs_hide_uneventful_series() {
        let reporter = reporter();
        let ok = series("Quiet Show", SeriesOutcome::OkNoAction);
        let skipped = series("Missing Show", SeriesOutcome::SkippedNotFound);
        let failed = series("Broken Show", hard_error(FailureKind::Source));

        assert!(reporter.series_lines(RunTrigger::Scheduled, &ok).is_empty());
        assert!(reporter.series_lines(RunTrigger::Scheduled, &skipped).is_empty());

        let lines = reporter.series_lines(RunTrigger::Scheduled, &failed);
        assert_eq!(lines[1], "  Processing: Broken Show");
        assert!(lines.contains(&"  !!! ERROR boom".to_string()));
        assert_eq!(lines.last().unwrap(), "  [STATUS] ERROR");

        let lines = reporter.series_lines(RunTrigger::Manual, &skipped);
        assert!(lines.contains(&"  [SONARR] Series 'Missing Show' not found in Sonarr.".to_string()));
        assert_eq!(lines.last().unwrap(), "  [STATUS] SKIPPED (Not Found)");
    }

    #[test]
    fn test_series_lines_for_action() {
        let details = SeriesDetails {
            filter: Some(InclusionFilter::from_config(&["manga"])),
            category_counts: vec![(CanonCategory::Manga, 4)],
            warnings: vec![(
                CanonCategory::Manga,
                vec![ParseWarning::MalformedSingle("abc".to_string())],
            )],
            cutoff: 2,
            planned: Some(vec![2, 3, 5]),
            series_id: Some(7),
            diff: Some(MonitorDiff {
                action_ids: vec![11, 12],
                newly_to_monitor: 2,
                already_monitored: 1,
                not_found_in_remote: 0,
            }),
            monitor: Some(StepStatus::Done),
            search: Some(StepStatus::DryRun),
        };
        let report = SeriesReport {
            title: "One Piece".to_string(),
            outcome: SeriesOutcome::OkActionTaken,
            details,
        };

        let verbose = reporter().series_lines(RunTrigger::Manual, &report);
        assert_eq!(
            verbose,
            vec![
                "",
                "  Processing: One Piece",
                "  [FILLER] Counts - Manga: 4.",
                "  [FILLER] Parse warnings (manga): [single 'abc']",
                "  [FILLER] Canon episodes (cutoff >= 2): 3 found.",
                "  [SONARR] Series 'One Piece' (ID: 7)",
                "  [SONARR] Episodes: 2 to newly monitor, 1 already monitored.",
                "  [SONARR] Identified 2 new episode(s) to monitor.",
                "  [SONARR] Monitoring 2 episodes... OK",
                "  [SONARR] Queuing search for 2 newly monitored episode(s)... (DRY RUN)",
                "  [STATUS] OK (New actions taken)",
            ]
        );

        let scheduled = reporter().series_lines(RunTrigger::Scheduled, &report);
        assert_eq!(
            scheduled,
            vec![
                "",
                "  Processing: One Piece",
                "  [SONARR] Identified 2 new episode(s) to monitor.",
                "  [SONARR] Monitoring 2 episodes... OK",
                "  [SONARR] Queuing search for 2 newly monitored episode(s)... (DRY RUN)",
                "  [STATUS] OK (New actions taken)",
            ]
        );
    }

    #[test]
    fn test_series_lines_without_action() {
        let details = SeriesDetails {
            filter: Some(InclusionFilter::from_config(&["bogus"])),
            category_counts: vec![
                (CanonCategory::Manga, 2),
                (CanonCategory::Mixed, 0),
                (CanonCategory::Anime, 0),
            ],
            cutoff: 50,
            planned: Some(Vec::new()),
            series_id: Some(3),
            diff: Some(MonitorDiff::default()),
            monitor: Some(StepStatus::NotNeeded),
            search: Some(StepStatus::Disabled),
            ..Default::default()
        };
        let report = SeriesReport {
            title: "Bleach".to_string(),
            outcome: SeriesOutcome::OkNoAction,
            details,
        };

        let lines = reporter().series_lines(RunTrigger::Initial, &report);
        assert!(lines.contains(
            &"  [FILLER] No valid types specified for 'Bleach'. Defaulting to all.".to_string()
        ));
        assert!(lines.contains(
            &"  [Processor] No relevant episodes from [manga mixed anime] types (cutoff >= 50)."
                .to_string()
        ));
        assert!(lines.contains(
            &"  [SONARR] Monitoring: No update needed (no episodes to process from canon list)."
                .to_string()
        ));
        assert!(lines.contains(&"  [SONARR] Search: Disabled.".to_string()));
        assert_eq!(lines.last().unwrap(), "  [STATUS] OK (No new actions)");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_micros(1_234_567)), "1.234s");
        assert_eq!(format_duration(Duration::from_millis(15)), "15ms");
    }
}
