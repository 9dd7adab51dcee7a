//! Fetch → aggregate → render → write, once per run
//!
//! Each command performs exactly one request, builds the whole document in
//! memory and writes it with a single call. The clock is injected so the
//! request window and the footer come from the same instant.

use crate::cli::{
    ACTIVITY_MIN_WIDTH, ACTIVITY_OUTPUT, ActivityArgs, COMMITS_OUTPUT, CommitsArgs,
    validate_divisor,
};
use crate::report;
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};
use wakadash_core::aggregation::Aggregator;
use wakadash_core::error::Result;
use wakadash_core::records::DateWindow;
use wakadash_core::source::ActivitySource;
use wakadash_core::timezone::TimezoneConfig;
use wakadash_provider_github::GitHubClient;
use wakadash_provider_wakatime::{WakaTimeClient, resolve_credential};

/// Settings shared by every command
#[derive(Debug, Clone)]
pub struct RunContext {
    pub tz_config: TimezoneConfig,
    pub timeout: Duration,
    /// Explicit output path; each command has its own default
    pub output: Option<PathBuf>,
}

impl RunContext {
    fn output_or(&self, default: &str) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(default))
    }

    /// Trailing window of `days` ending on the display-zone date of `now`
    pub fn window(&self, now: DateTime<Utc>, days: u32) -> Result<DateWindow> {
        DateWindow::trailing(self.tz_config.to_local(&now).date(), days)
    }
}

/// What a run produced
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    pub output: PathBuf,
    /// Records or events that contributed to the buckets
    pub used: usize,
    /// Records skipped as malformed
    pub skipped: usize,
    /// Sum of all bucket values (minutes or commits)
    pub total: u64,
}

async fn fetch_from<S: ActivitySource>(
    source: &S,
    window: &DateWindow,
) -> Result<Vec<S::Record>> {
    debug!("Fetching from {} for {} days", source.name(), window.days());
    source.fetch(window).await
}

/// Write the finished document in one call
pub fn write_output(path: &Path, svg: &str) -> Result<()> {
    fs::write(path, svg)?;
    debug!("Wrote {} bytes to {}", svg.len(), path.display());
    Ok(())
}

/// Render the WakaTime activity dashboard
///
/// `credential` is the raw value of `WAKATIME_API_KEY`; it is validated
/// before any network access.
pub async fn run_activity(
    ctx: &RunContext,
    args: &ActivityArgs,
    credential: Option<String>,
    now: DateTime<Utc>,
) -> Result<RunOutcome> {
    let credential = resolve_credential(credential)?;
    let divisor = validate_divisor(args.divisor)?;
    let policy = report::scale_policy(args.scale, divisor, ACTIVITY_MIN_WIDTH);

    let client = WakaTimeClient::new(credential, args.auth, args.base_url.clone(), ctx.timeout)?;
    let window = ctx.window(now, args.days)?;
    let records = fetch_from(&client, &window).await?;

    let aggregator = Aggregator::new(ctx.tz_config.clone());
    let buckets = aggregator.aggregate(&records);
    if buckets.records_skipped > 0 {
        warn!(
            "Skipped {} of {} records with missing or malformed fields",
            buckets.records_skipped,
            records.len()
        );
    }
    info!(
        "Aggregated {} minutes from {} records",
        buckets.total_minutes(),
        buckets.records_used
    );

    let sections = report::activity_sections(&buckets, policy, args.label);
    let svg = report::render(&sections, &ctx.tz_config, now);
    let output = ctx.output_or(ACTIVITY_OUTPUT);
    write_output(&output, &svg)?;

    Ok(RunOutcome {
        output,
        used: buckets.records_used,
        skipped: buckets.records_skipped,
        total: buckets.total_minutes(),
    })
}

/// Render the GitHub commits-by-weekday dashboard
pub async fn run_commits(
    ctx: &RunContext,
    args: &CommitsArgs,
    now: DateTime<Utc>,
) -> Result<RunOutcome> {
    let divisor = validate_divisor(args.divisor)?;
    let policy = report::scale_policy(args.scale, divisor, 0.0);

    let client = GitHubClient::new(
        args.user.clone(),
        args.token.clone(),
        args.base_url.clone(),
        ctx.timeout,
    )?;
    let window = ctx.window(now, 1)?;
    let events = fetch_from(&client, &window).await?;

    let aggregator = Aggregator::new(ctx.tz_config.clone());
    let weekdays = aggregator.aggregate_commits(&events);
    let pushes = events.iter().filter(|e| e.is_push()).count();
    info!("Counted {} commits from {} push events", weekdays.total(), pushes);

    let sections = report::commit_sections(&weekdays, policy, args.label);
    let svg = report::render(&sections, &ctx.tz_config, now);
    let output = ctx.output_or(COMMITS_OUTPUT);
    write_output(&output, &svg)?;

    Ok(RunOutcome {
        output,
        used: pushes,
        skipped: 0,
        total: weekdays.total(),
    })
}
