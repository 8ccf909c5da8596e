//! Sentiment dashboard console
//!
//! Command-line front end over the analytics core: fetches daily rows for
//! a date range and renders leaderboards, time series, distributions and
//! controversy rankings.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use sentiment_dash::{
    analytics::{self, controversy},
    client::SentimentApiClient,
    config::Config,
    keywords,
    state::feed::SentimentFeed,
    types::{AggregatedSentiment, DailySentimentRecord},
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "sentiment-dash")]
#[command(about = "Console for browsing aggregated keyword sentiment")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Leaderboards and controversy ranking for a date range
    Report {
        #[arg(long)]
        start: NaiveDate,
        #[arg(long)]
        end: NaiveDate,
    },
    /// Daily sentiment time series
    Timeseries {
        #[arg(long)]
        start: NaiveDate,
        #[arg(long)]
        end: NaiveDate,
        /// Restrict to one keyword (one point per raw record)
        #[arg(short, long)]
        keyword: Option<String>,
    },
    /// Sentiment class distribution for one keyword
    Distribution {
        #[arg(long)]
        start: NaiveDate,
        #[arg(long)]
        end: NaiveDate,
        #[arg(short, long)]
        keyword: String,
    },
    /// Controversy ranking for a date range
    Controversy {
        #[arg(long)]
        start: NaiveDate,
        #[arg(long)]
        end: NaiveDate,
    },
    /// Inspect the crawler keyword config
    Keywords {
        #[command(subcommand)]
        action: KeywordsAction,
    },
}

#[derive(Subcommand)]
enum KeywordsAction {
    /// Validate the configured keyword file
    Validate,
    /// Diff an edited keyword file against a baseline snapshot
    Diff {
        baseline: String,
        edited: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;

    match cli.command {
        Commands::Report { start, end } => report(config, start, end).await,
        Commands::Timeseries { start, end, keyword } => {
            timeseries(config, start, end, keyword.as_deref()).await
        }
        Commands::Distribution { start, end, keyword } => {
            distribution(config, start, end, &keyword).await
        }
        Commands::Controversy { start, end } => controversy_report(config, start, end).await,
        Commands::Keywords { action } => keywords_command(config, action),
    }
}

async fn fetch_records(
    config: &Config,
    start: NaiveDate,
    end: NaiveDate,
) -> anyhow::Result<Vec<DailySentimentRecord>> {
    let client = SentimentApiClient::new(&config.api.base_url, config.api.timeout_secs)?;
    let feed = SentimentFeed::new(Arc::new(client));

    let state = feed.refresh(start, end).await;
    if let Some(error) = state.error {
        anyhow::bail!("fetch failed: {error}");
    }

    tracing::info!(rows = state.data.len(), %start, %end, "fetched daily sentiment rows");
    Ok(state.data)
}

async fn report(config: Config, start: NaiveDate, end: NaiveDate) -> anyhow::Result<()> {
    let records = fetch_records(&config, start, end).await?;

    println!("Sentiment report {start} .. {end}");
    println!("Keywords with data: {}", analytics::keywords(&records).len());

    println!("\nMost positive (more than {} posts):", analytics::MIN_VOLUME);
    print_board(&analytics::most_positive(&records), |item| item.avg_pos);

    println!("\nMost negative (more than {} posts):", analytics::MIN_VOLUME);
    print_board(&analytics::most_negative(&records), |item| item.avg_neg);

    println!("\nControversy ranking:");
    print_controversy(&controversy::controversy_ranking(&records));

    Ok(())
}

async fn timeseries(
    config: Config,
    start: NaiveDate,
    end: NaiveDate,
    keyword: Option<&str>,
) -> anyhow::Result<()> {
    let records = fetch_records(&config, start, end).await?;
    let series = analytics::time_series(&records, keyword);

    match keyword {
        Some(keyword) => println!("Time series for '{keyword}' {start} .. {end}"),
        None => println!("Time series across all keywords {start} .. {end}"),
    }

    if series.is_empty() {
        println!("  (no data)");
        return Ok(());
    }

    println!(
        "{:<12} {:>7} {:>7} {:>7} {:>7} {:>8}",
        "date", "pos", "neg", "mix", "neutral", "posts"
    );
    for point in series {
        println!(
            "{:<12} {:>7.3} {:>7.3} {:>7.3} {:>7.3} {:>8}",
            point.date.to_string(),
            point.avg_pos,
            point.avg_neg,
            point.avg_mix,
            point.avg_neutral,
            point.count
        );
    }

    Ok(())
}

async fn distribution(
    config: Config,
    start: NaiveDate,
    end: NaiveDate,
    keyword: &str,
) -> anyhow::Result<()> {
    let records = fetch_records(&config, start, end).await?;
    let slices = analytics::distribution(&records, Some(keyword));

    println!("Distribution for '{keyword}' {start} .. {end}");
    if slices.is_empty() {
        println!("  (no data for keyword)");
        return Ok(());
    }

    for slice in slices {
        println!(
            "  {:<8} avg {:>6.3}  {:>6} posts",
            slice.sentiment.to_string(),
            slice.avg_value,
            slice.count
        );
    }

    Ok(())
}

async fn controversy_report(
    config: Config,
    start: NaiveDate,
    end: NaiveDate,
) -> anyhow::Result<()> {
    let records = fetch_records(&config, start, end).await?;
    println!("Controversy ranking {start} .. {end}");
    print_controversy(&controversy::controversy_ranking(&records));
    Ok(())
}

fn keywords_command(config: Config, action: KeywordsAction) -> anyhow::Result<()> {
    match action {
        KeywordsAction::Validate => {
            let entries = keywords::load_config(&config.keywords.path)?;
            println!("{}: {} entries, all valid", config.keywords.path, entries.len());

            for entry in &entries {
                let flag = if entry.enabled() { "" } else { "  (disabled)" };
                println!("  {:<8} {}{}", entry.source(), entry.keyword(), flag);
                if keywords::clean_for_save(entry) != *entry {
                    println!("           needs normalization on next save");
                }
            }
            Ok(())
        }
        KeywordsAction::Diff { baseline, edited } => {
            let baseline = keywords::load_config(&baseline)?;
            let edited = keywords::load_config(&edited)?;
            let diff = keywords::diff(&baseline, &edited);

            if diff.is_empty() {
                println!("No changes");
                return Ok(());
            }

            for entry in &diff.added {
                println!("added    {:<8} {}", entry.source(), entry.keyword());
            }
            for entry in &diff.removed {
                println!("removed  {:<8} {}", entry.source(), entry.keyword());
            }
            for entry in &diff.changed {
                println!("changed  {:<8} {}", entry.source(), entry.keyword());
            }
            Ok(())
        }
    }
}

fn print_board(board: &[AggregatedSentiment], metric: fn(&AggregatedSentiment) -> f64) {
    if board.is_empty() {
        println!("  (no qualifying keywords)");
        return;
    }

    for (rank, item) in board.iter().enumerate() {
        println!(
            "{:>3}. {:<28} {:>6.3}  {:>6} posts over {} days",
            rank + 1,
            item.group_key,
            metric(item),
            item.total_count,
            item.active_days
        );
    }
}

fn print_controversy(ranking: &[sentiment_dash::types::ControversyEntry]) {
    if ranking.is_empty() {
        println!("  (no qualifying keywords)");
        return;
    }

    for (rank, entry) in ranking.iter().enumerate() {
        println!(
            "{:>3}. {:<28} score {:>6.2}  {:<18} {:>6} posts",
            rank + 1,
            entry.keyword,
            entry.score,
            entry.kind.to_string(),
            entry.total_count
        );
    }
}
