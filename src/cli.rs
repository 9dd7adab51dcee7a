//! CLI interface for wakadash
//!
//! Every flag has a default, so running `wakadash` with no arguments
//! renders the WakaTime activity dashboard to `stats.svg`. The `commits`
//! subcommand renders GitHub push activity to `commits.svg` instead.
//!
//! # Example
//!
//! ```bash
//! # Activity dashboard with the defaults
//! WAKATIME_API_KEY=waka_... wakadash
//!
//! # Relative bars with duration labels, Berlin time, 14 days
//! wakadash activity --scale relative --label duration --days 14 -z Europe/Berlin
//!
//! # Commits per weekday for a GitHub user
//! wakadash commits --user octocat -o assets/commits.svg
//! ```

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use wakadash_core::error::{DashError, Result};
use wakadash_core::source::DEFAULT_TIMEOUT_SECS;
use wakadash_provider_github::{GITHUB_API_URL, TOKEN_ENV};
use wakadash_provider_wakatime::{AuthScheme, WAKATIME_SUMMARIES_URL};
use wakadash_svg::dashboard::TRACK_WIDTH;
use wakadash_svg::{LabelFormat, ScaleKind};

/// Default output file of the activity dashboard
pub const ACTIVITY_OUTPUT: &str = "stats.svg";
/// Default output file of the commits dashboard
pub const COMMITS_OUTPUT: &str = "commits.svg";

/// Longest window `--days` accepts
pub const MAX_DAYS: i64 = 3660;

/// Minutes per pixel for fixed-scale activity bars
pub const ACTIVITY_DIVISOR: f64 = 4.0;
/// Narrowest fixed-scale activity bar, so empty buckets stay visible
pub const ACTIVITY_MIN_WIDTH: f64 = 2.0;
/// Commits that fill a whole track
pub const COMMITS_PER_FULL_BAR: f64 = 20.0;
/// Commits per pixel for fixed-scale commit bars
pub const COMMITS_DIVISOR: f64 = COMMITS_PER_FULL_BAR / TRACK_WIDTH;

/// Render coding activity as an SVG profile dashboard
#[derive(Parser, Debug, Clone)]
#[command(name = "wakadash")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output file (default: stats.svg, or commits.svg for `commits`)
    #[arg(long, short = 'o', global = true)]
    pub output: Option<PathBuf>,

    /// Display timezone: IANA name, "local", or a fixed offset like "+05:30"
    /// If not specified, uses UTC+05:30
    #[arg(long, short = 'z', global = true)]
    pub timezone: Option<String>,

    /// Use UTC as the display timezone (overrides --timezone)
    #[arg(long, global = true)]
    pub utc: bool,

    /// Show debug output
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only show warnings and errors
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, global = true)]
    pub timeout: u64,

    /// Subcommand to execute (default: activity)
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// The selected command, falling back to `activity` with its defaults
    pub fn command_or_default(&self) -> Command {
        self.command
            .clone()
            .unwrap_or_else(|| Command::Activity(ActivityArgs::default()))
    }

    /// Log filter derived from `--verbose` and `--quiet`
    pub fn log_filter(&self) -> &'static str {
        if self.quiet {
            "warn"
        } else if self.verbose {
            "wakadash=debug"
        } else {
            "wakadash=info"
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Bucket WakaTime minutes by weekday and phase of day
    Activity(ActivityArgs),
    /// Count GitHub push-event commits by weekday
    Commits(CommitsArgs),
}

/// Arguments for the activity dashboard
#[derive(Args, Debug, Clone, PartialEq)]
pub struct ActivityArgs {
    /// Number of trailing days to request, ending today (1-3660)
    #[arg(
        long,
        default_value_t = 7,
        value_parser = clap::value_parser!(u32).range(1..=MAX_DAYS)
    )]
    pub days: u32,

    /// Bar normalization: fixed, relative, or share
    #[arg(long, default_value_t = ScaleKind::Share)]
    pub scale: ScaleKind,

    /// Value label: raw, percent, or duration
    #[arg(long, default_value_t = LabelFormat::Percent)]
    pub label: LabelFormat,

    /// Minutes per pixel under the fixed scale
    #[arg(long, default_value_t = ACTIVITY_DIVISOR)]
    pub divisor: f64,

    /// Authorization encoding: raw or base64
    #[arg(long, default_value_t = AuthScheme::Base64)]
    pub auth: AuthScheme,

    /// Summaries endpoint
    #[arg(long, default_value = WAKATIME_SUMMARIES_URL)]
    pub base_url: String,
}

impl Default for ActivityArgs {
    fn default() -> Self {
        Self {
            days: 7,
            scale: ScaleKind::Share,
            label: LabelFormat::Percent,
            divisor: ACTIVITY_DIVISOR,
            auth: AuthScheme::Base64,
            base_url: WAKATIME_SUMMARIES_URL.to_string(),
        }
    }
}

/// Arguments for the commits dashboard
#[derive(Args, Debug, Clone, PartialEq)]
pub struct CommitsArgs {
    /// GitHub username whose public events are read
    #[arg(long, short = 'u')]
    pub user: String,

    /// Token for higher rate limits
    #[arg(long, env = TOKEN_ENV, hide_env_values = true)]
    pub token: Option<String>,

    /// Bar normalization: fixed, relative, or share
    #[arg(long, default_value_t = ScaleKind::Fixed)]
    pub scale: ScaleKind,

    /// Value label: raw, percent, or duration
    #[arg(long, default_value_t = LabelFormat::Raw)]
    pub label: LabelFormat,

    /// Commits per pixel under the fixed scale (default: 20 commits fill the bar)
    #[arg(long, default_value_t = COMMITS_DIVISOR)]
    pub divisor: f64,

    /// GitHub REST API root
    #[arg(long, default_value = GITHUB_API_URL)]
    pub base_url: String,
}

/// Reject divisors that cannot scale a bar
pub fn validate_divisor(divisor: f64) -> Result<f64> {
    if divisor.is_finite() && divisor > 0.0 {
        Ok(divisor)
    } else {
        Err(DashError::InvalidArgument(format!(
            "--divisor must be a positive number, got {divisor}"
        )))
    }
}
