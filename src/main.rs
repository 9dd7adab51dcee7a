//! wakadash - Render coding activity as an SVG profile dashboard

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wakadash::{
    cli::{Cli, Command},
    pipeline::{self, RunContext},
};
use wakadash_core::timezone::TimezoneConfig;
use wakadash_provider_wakatime::API_KEY_ENV;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // --verbose and --quiet override RUST_LOG
    let filter = if cli.quiet || cli.verbose {
        tracing_subscriber::EnvFilter::new(cli.log_filter())
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(cli.log_filter()))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let tz_config = TimezoneConfig::from_cli(cli.timezone.as_deref(), cli.utc)?;
    info!("Using timezone: {}", tz_config.display_name());

    let ctx = RunContext {
        tz_config,
        timeout: Duration::from_secs(cli.timeout),
        output: cli.output.clone(),
    };
    let now = Utc::now();

    match cli.command_or_default() {
        Command::Activity(args) => {
            info!("Rendering activity dashboard");
            let credential = std::env::var(API_KEY_ENV).ok();
            let outcome = pipeline::run_activity(&ctx, &args, credential, now)
                .await
                .context("failed to generate the activity dashboard")?;
            println!("{} generated successfully", outcome.output.display());
        }
        Command::Commits(args) => {
            info!("Rendering commits dashboard for {}", args.user);
            let outcome = pipeline::run_commits(&ctx, &args, now)
                .await
                .with_context(|| {
                    format!("failed to generate the commits dashboard for {}", args.user)
                })?;
            println!(
                "{} generated successfully ({} commits)",
                outcome.output.display(),
                outcome.total
            );
        }
    }

    Ok(())
}
