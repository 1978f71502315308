//! Runs over every configured series, once or on a cron schedule.

use crate::config::{AnimeConfig, Config};
use crate::console::Console;
use crate::fillerlist::DocumentSource;
use crate::processor::SeriesProcessor;
use crate::report::{Reporter, RunReport, RunTrigger};
use crate::sonarr::SeriesService;
use anyhow::{Context, Result};
use chrono::Local;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{debug, warn};

/// Ensures only one run is in progress at a time.
#[derive(Debug, Default)]
pub struct RunGuard {
    lock: Mutex<()>,
}

impl RunGuard {
    /// Returns `None` if a run is already in progress.
    pub fn try_start(&self) -> Option<MutexGuard<'_, ()>> {
        self.lock.try_lock().ok()
    }
}

/// Everything a run needs, shared between the initial run and cron ticks.
pub struct Checker {
    animes: Vec<AnimeConfig>,
    dry_run: bool,
    source: Arc<dyn DocumentSource>,
    sonarr: Arc<dyn SeriesService>,
    reporter: Reporter,
    guard: RunGuard,
}

impl Checker {
    pub fn new(
        config: &Config,
        source: Arc<dyn DocumentSource>,
        sonarr: Arc<dyn SeriesService>,
        reporter: Reporter,
    ) -> Self {
        Self {
            animes: config.animes.clone(),
            dry_run: config.dry_run,
            source,
            sonarr,
            reporter,
            guard: RunGuard::default(),
        }
    }

    /// Processes every series in configured order.
    ///
    /// Output is handed to `emit` as soon as each series is done. Scheduled
    /// runs only announce themselves once something is worth showing.
    pub async fn run_checks<F>(&self, trigger: RunTrigger, mut emit: F) -> RunReport
    where
        F: FnMut(&[String]) + Send,
    {
        let mut report = RunReport::new(trigger, self.dry_run);
        let processor =
            SeriesProcessor::new(self.source.as_ref(), self.sonarr.as_ref(), self.dry_run);

        emit(&self.reporter.opening_lines(trigger, self.animes.len()));
        let mut announced = trigger.is_verbose();

        for anime in &self.animes {
            let series = processor.process(anime).await;
            let lines = self.reporter.series_lines(trigger, &series);
            if !lines.is_empty() {
                if !announced {
                    emit(&self.reporter.banner_lines(&report.started_at));
                    announced = true;
                }
                emit(&lines);
            }
            report.record(series);
        }

        report.finish();
        debug!(
            processed = report.processed,
            actions = report.actions,
            errors = report.hard_errors(),
            "run finished"
        );
        emit(&self.reporter.closing_lines(&report));
        report
    }

    /// Like [`Checker::run_checks`], but returns `None` without doing
    /// anything while another run holds the guard.
    pub async fn run_guarded<F>(&self, trigger: RunTrigger, emit: F) -> Option<RunReport>
    where
        F: FnMut(&[String]) + Send,
    {
        let _running = self.guard.try_start()?;
        Some(self.run_checks(trigger, emit).await)
    }
}

/// Accepts classic five-field cron expressions by prepending a seconds
/// field; six- and seven-field expressions pass through.
pub fn normalize_cron_spec(spec: &str) -> String {
    let fields: Vec<&str> = spec.split_whitespace().collect();
    if fields.len() == 5 {
        format!("0 {}", fields.join(" "))
    } else {
        fields.join(" ")
    }
}

/// Runs once, or on `cron` until Ctrl-C.
///
/// Returns whether the finished run had hard errors. Scheduler mode only
/// returns after a clean shutdown, so it always reports `false`.
pub async fn run(checker: Arc<Checker>, cron: Option<&str>, console: Console) -> Result<bool> {
    let print = move |lines: &[String]| console.print_lines(lines);

    let Some(cron) = cron else {
        let report = checker.run_checks(RunTrigger::Manual, print).await;
        return Ok(report.has_hard_errors());
    };

    let spec = normalize_cron_spec(cron);
    let job_checker = Arc::clone(&checker);
    let job = Job::new_async_tz(spec.as_str(), Local, move |_id, _scheduler| {
        let checker = Arc::clone(&job_checker);
        Box::pin(async move {
            if checker
                .run_guarded(RunTrigger::Scheduled, print)
                .await
                .is_none()
            {
                warn!("previous run still in progress, skipping this tick");
            }
        })
    })
    .with_context(|| format!("Invalid cron expression '{}'", cron))?;

    console.section("Running initial check...");
    checker.run_guarded(RunTrigger::Initial, print).await;

    let mut scheduler = JobScheduler::new()
        .await
        .context("Failed to create scheduler")?;
    scheduler.add(job).await.context("Failed to add scheduled job")?;
    scheduler.start().await.context("Failed to start scheduler")?;

    console.info(&format!(
        "Scheduler started with spec '{}'. Press Ctrl+C to exit.",
        spec
    ));

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl+C")?;

    console.info("Shutting down scheduler...");
    scheduler
        .shutdown()
        .await
        .context("Failed to stop scheduler")?;
    console.info("Scheduler stopped.");

    Ok(false)
}
