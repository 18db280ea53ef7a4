//! Chronos CLI
//!
//! Year-in-review generator and web server runner.

use anyhow::{bail, Context, Result};
use chrono::{Datelike, Utc};
use chronos_analyzer::{ContributionYear, StatsSummary, Summarizer};
use chronos_api::{create_router, AppState};
use chronos_cache::{Cache, CacheBackend};
use chronos_collector::{github::GithubCollector, CollectorConfig, UnwrappedReport};
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "chronos")]
#[command(about = "Chronos - your GitHub year in review")]
#[command(version)]
struct Cli {
    /// Cache database file path
    #[arg(short, long, default_value = "chronos-cache.db")]
    cache: PathBuf,

    /// Keep cached reports in memory only
    #[arg(long)]
    no_cache: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server
    Serve {
        /// Address to bind to
        #[arg(short, long, default_value = "127.0.0.1:3000")]
        bind: SocketAddr,

        /// Static files directory
        #[arg(short, long)]
        static_dir: Option<PathBuf>,
    },

    /// Fetch and summarize a year for the GITHUB_TOKEN owner
    Unwrap {
        /// Calendar year (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Summarize a contribution year stored as JSON
    Summarize {
        /// File holding days, counters and repositories
        file: PathBuf,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage cached reports
    Cache {
        #[command(subcommand)]
        action: CacheCommand,
    },
}

#[derive(Subcommand)]
enum CacheCommand {
    /// Remove cached reports, optionally only keys containing a pattern
    Clear { pattern: Option<String> },

    /// Remove expired entries
    Purge,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG overrides --verbose
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    let cache_path = (!cli.no_cache).then_some(cli.cache);

    match cli.command {
        Commands::Serve { bind, static_dir } => {
            let cache = open_cache(cache_path.as_deref()).await;
            serve(cache, bind, static_dir).await?;
        }
        Commands::Unwrap { year, json } => {
            let cache = open_cache(cache_path.as_deref()).await;
            unwrap(&cache, year, json).await?;
        }
        Commands::Summarize { file, json } => {
            summarize(&file, json)?;
        }
        Commands::Cache { action } => {
            let cache = open_cache(cache_path.as_deref()).await;
            cache_command(&cache, action).await?;
        }
    }

    Ok(())
}

/// DEV_MODE keeps everything in memory
async fn open_cache(path: Option<&Path>) -> CacheBackend {
    let dev_mode = std::env::var("DEV_MODE").is_ok_and(|v| !v.is_empty());
    CacheBackend::open(path, dev_mode).await
}

async fn serve(cache: CacheBackend, bind: SocketAddr, static_dir: Option<PathBuf>) -> Result<()> {
    let collector = GithubCollector::new(CollectorConfig::default())?;
    let state = Arc::new(AppState::new(cache, collector));
    let router = create_router(state, static_dir.clone());

    info!("Starting Chronos server on {}", bind);
    if let Some(ref dir) = static_dir {
        info!("Serving static files from {}", dir.display());
    }
    info!("API available at http://{}/api/v1", bind);

    let listener = tokio::net::TcpListener::bind(bind).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

async fn unwrap(cache: &CacheBackend, year: Option<i32>, json: bool) -> Result<()> {
    let config = CollectorConfig::default();
    let Some(token) = config.github_token.clone() else {
        bail!("GITHUB_TOKEN is not set. Create a token with read:user scope and export it.");
    };

    let year = year.unwrap_or_else(|| Utc::now().year());
    let collector = GithubCollector::new(config)?;
    let report = collector.generate_unwrapped(cache, &token, year).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

fn summarize(file: &Path, json: bool) -> Result<()> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let year: ContributionYear = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse {}", file.display()))?;

    let summary = Summarizer::new().summarize(&year)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }

    Ok(())
}

async fn cache_command(cache: &CacheBackend, action: CacheCommand) -> Result<()> {
    match action {
        CacheCommand::Clear { pattern } => {
            let removed = cache.clear(pattern.as_deref()).await?;
            println!("Removed {} cached entries from {} cache", removed, cache.name());
        }
        CacheCommand::Purge => {
            let removed = cache.purge_expired().await?;
            println!("Purged {} expired entries from {} cache", removed, cache.name());
        }
    }

    Ok(())
}

fn print_report(report: &UnwrappedReport) {
    println!(
        "GitHub Unwrapped {} for {} (@{})",
        report.year, report.user.name, report.user.login
    );
    println!("{}", "-".repeat(50));
    print_summary(&report.stats);
}

fn format_hour(hour: u8) -> String {
    match hour {
        0 => "12 AM".to_string(),
        1..=11 => format!("{} AM", hour),
        12 => "12 PM".to_string(),
        _ => format!("{} PM", hour - 12),
    }
}

fn print_summary(stats: &StatsSummary) {
    println!("{:<22} {}", "Total contributions:", stats.total_contributions);
    println!(
        "{:<22} {} ({}%)",
        "Top language:", stats.top_language.name, stats.top_language.percentage
    );

    if stats.longest_streak.days > 0 {
        println!(
            "{:<22} {} days ({} to {})",
            "Longest streak:",
            stats.longest_streak.days,
            stats.longest_streak.start_date,
            stats.longest_streak.end_date
        );
    } else {
        println!("{:<22} none", "Longest streak:");
    }

    println!(
        "{:<22} {} ({} contributions, estimated)",
        "Most active time:",
        format_hour(stats.most_active_time.hour),
        stats.most_active_time.count
    );
    println!(
        "{:<22} {} on {}",
        "Busiest day:", stats.busiest_day.count, stats.busiest_day.date
    );
    println!(
        "{:<22} {} (~{:.1}h sessions)",
        "Coding pattern:", stats.pattern.label, stats.pattern.average_hours
    );

    let breakdown = &stats.commit_type_breakdown;
    println!("\nContribution types:");
    println!("  Commits:        {}", breakdown.commits);
    println!("  Pull requests:  {}", breakdown.pull_requests);
    println!("  Issues:         {}", breakdown.issues);
    println!("  Reviews:        {}", breakdown.reviews);

    if !stats.language_stats.is_empty() {
        println!("\nLanguages:");
        for (idx, lang) in stats.language_stats.iter().enumerate() {
            println!("  {}. {:<15} {:>3}%", idx + 1, lang.name, lang.percentage);
        }
    }

    if !stats.monthly_activity.is_empty() {
        println!("\nMonthly activity:");
        for month in &stats.monthly_activity {
            println!("  {:<4} {:>5}", month.month, month.contributions);
        }
    }
}
