use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use std::path::PathBuf;
use tracing::{error, info};

use gamescout_fixtures::{
    config::AppConfig,
    filter::parse_fixture_date,
    logging,
    metrics::MetricsCollector,
    pipeline::IngestPipeline,
    web::{self, AppState},
};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Rebuild the fixtures table from the league feeds
    Ingest {
        /// Directory holding the league JSON feeds
        #[arg(short, long)]
        feeds_dir: Option<PathBuf>,

        /// Where to write the fixtures table
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// First day of the season window (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date_arg)]
        season_start: Option<NaiveDate>,

        /// Last day of the season window (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date_arg)]
        season_end: Option<NaiveDate>,

        /// Add a Score column to the table
        #[arg(long)]
        with_score: bool,
    },
    /// Print the fixtures for a date as JSON
    Fixtures {
        #[arg(short, long, value_parser = parse_date_arg)]
        date: NaiveDate,

        /// Group fixtures by league
        #[arg(short, long)]
        grouped: bool,
    },
    /// Serve the fixtures and stats API
    Serve {
        /// Run an ingestion before accepting requests
        #[arg(long)]
        ingest: bool,
    },
}

fn parse_date_arg(value: &str) -> Result<NaiveDate, String> {
    parse_fixture_date(value).ok_or_else(|| format!("invalid date '{}', expected YYYY-MM-DD", value))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    logging::init();

    let cli = Cli::parse();
    let mut config = AppConfig::from_env();
    let metrics = MetricsCollector::new();

    match cli.command {
        Commands::Ingest {
            feeds_dir,
            output,
            season_start,
            season_end,
            with_score,
        } => {
            if let Some(dir) = feeds_dir {
                config.feeds.feeds_dir = dir;
            }
            if let Some(path) = output {
                config.export.path = path;
            }
            if let Some(start) = season_start {
                config.season.start = start;
            }
            if let Some(end) = season_end {
                config.season.end = end;
            }
            config.export.include_score |= with_score;

            let report = IngestPipeline::from_config(&config).run()?;
            info!("Ingestion complete: {:?}", report);
        }
        Commands::Fixtures { date, grouped } => {
            let state = AppState::from_config(&config, metrics);
            let output = if grouped {
                serde_json::to_string_pretty(&state.store.grouped_fixtures_for_date(date))?
            } else {
                serde_json::to_string_pretty(&state.store.fixtures_for_date(date))?
            };
            println!("{}", output);
        }
        Commands::Serve { ingest } => {
            if ingest {
                match IngestPipeline::from_config(&config).run() {
                    Ok(report) => metrics.record_ingest(report),
                    Err(e) => error!("Startup ingestion failed, serving the existing table: {}", e),
                }
            }
            let state = AppState::from_config(&config, metrics);
            web::serve(state, &config.web).await?;
        }
    }

    Ok(())
}
