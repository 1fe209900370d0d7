//! CLI entry point for the quake_stats tool.
//!
//! Provides subcommands for fetching a UK earthquake catalog from the USGS
//! event service, summarizing a catalog, tabulating per-year aggregates,
//! and rendering charts.

mod infra;
mod services;

use crate::infra::usgs::client::UsgsClient;
use crate::services::event_api::{EventQuery, OrderBy};
use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use quake_stats::{
    analyzers::aggregate::yearly_summary,
    fetch::{BasicClient, fetch_bytes},
    output::{append_record, print_json, write_year_summaries},
    parser::{Catalog, parse_catalog},
    plot::{plot_counts_per_year, plot_mean_magnitude_per_year},
    stats::CatalogStats,
};
use std::ffi::OsStr;
use std::path::Path;
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "quake_stats")]
#[command(about = "A tool to analyze UK earthquake catalogs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Query the USGS event service and cache the raw GeoJSON to a file
    Fetch {
        /// File to write the raw response body to
        #[arg(short, long, default_value = "earthquakes.json")]
        output: String,

        #[command(flatten)]
        query: QueryArgs,
    },
    /// Summarize a catalog: event count, field coverage, strongest event
    Summary {
        /// Path to a cached catalog file or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// CSV file to append the stats row to
        #[arg(short, long, default_value = "data.csv")]
        output: String,

        /// Region label recorded with the stats row
        #[arg(long, default_value = "uk")]
        region: String,
    },
    /// Write the per-year count and mean-magnitude table to CSV
    Yearly {
        /// Path to a cached catalog file or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// CSV file to write the table to
        #[arg(short, long, default_value = "years.csv")]
        output: String,
    },
    /// Render per-year charts (counts bar chart, mean magnitude line chart)
    Plot {
        /// Path to a cached catalog file or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// Directory to write PNG charts into
        #[arg(short = 'd', long, default_value = "charts")]
        output_dir: String,
    },
}

/// Event query parameters. Defaults are the fixed UK query: a bounding box
/// covering Great Britain and Ireland, magnitude 1+, 2000-01-01 through
/// 2018-10-11, oldest first.
#[derive(Args)]
struct QueryArgs {
    /// Start of the date range (YYYY-MM-DD)
    #[arg(long, default_value = "2000-01-01")]
    start_time: NaiveDate,

    /// End of the date range (YYYY-MM-DD)
    #[arg(long, default_value = "2018-10-11")]
    end_time: NaiveDate,

    #[arg(long, default_value_t = 50.008)]
    min_latitude: f64,

    #[arg(long, default_value_t = 58.723)]
    max_latitude: f64,

    #[arg(long, default_value_t = -9.756)]
    min_longitude: f64,

    #[arg(long, default_value_t = 1.67)]
    max_longitude: f64,

    /// Minimum magnitude to include
    #[arg(long, default_value_t = 1.0)]
    min_magnitude: f64,

    /// Sort order of the returned events
    #[arg(long, value_enum, default_value = "time-asc")]
    order_by: OrderBy,
}

impl From<QueryArgs> for EventQuery {
    fn from(args: QueryArgs) -> Self {
        EventQuery {
            start_time: args.start_time,
            end_time: args.end_time,
            min_latitude: args.min_latitude,
            max_latitude: args.max_latitude,
            min_longitude: args.min_longitude,
            max_longitude: args.max_longitude,
            min_magnitude: args.min_magnitude,
            order_by: args.order_by,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/quake_stats.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("quake_stats.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Fetch { output, query } => {
            fetch_and_cache(&output, query.into()).await?;
        }
        Commands::Summary {
            source,
            output,
            region,
        } => {
            summarize(&source, &output, &region).await?;
        }
        Commands::Yearly { source, output } => {
            let catalog = load_catalog(&source).await?;
            let summaries = yearly_summary(&catalog);

            for row in &summaries {
                info!(
                    year = row.year,
                    count = row.count,
                    mean_magnitude = ?row.mean_magnitude,
                    "Year summary"
                );
            }

            write_year_summaries(&output, &summaries)?;
            info!(output, rows = summaries.len(), "Yearly table written");
        }
        Commands::Plot { source, output_dir } => {
            let catalog = load_catalog(&source).await?;
            let summaries = yearly_summary(&catalog);

            std::fs::create_dir_all(&output_dir)?;

            let counts_path = format!("{}/counts_per_year.png", output_dir);
            let magnitude_path = format!("{}/mean_magnitude_per_year.png", output_dir);

            plot_counts_per_year(&counts_path, &summaries)?;
            info!(path = counts_path, "Counts chart written");

            plot_mean_magnitude_per_year(&magnitude_path, &summaries)?;
            info!(path = magnitude_path, "Mean magnitude chart written");
        }
    }

    Ok(())
}

/// Runs the USGS query and writes the raw GeoJSON body to `output`.
#[tracing::instrument(skip(query), fields(output))]
async fn fetch_and_cache(output: &str, query: EventQuery) -> Result<()> {
    let client = UsgsClient::new();

    let bytes = client.fetch_raw(&query).await?;
    info!(bytes = bytes.len(), "Catalog fetched");

    // Parse before caching so a bad body never becomes the cache file.
    let catalog = parse_catalog(&bytes)?;
    info!(events = catalog.features.len(), "Catalog parsed");

    std::fs::write(output, &bytes)?;
    info!(output, "Catalog cached");

    Ok(())
}

/// Summarizes a catalog and appends the stats row (or an error row) to CSV.
#[tracing::instrument(fields(source, output, region))]
async fn summarize(source: &str, output: &str, region: &str) -> Result<()> {
    let bytes = match fetcher(source).await {
        Ok(bytes) => bytes,
        Err(e) => {
            error!(error = %e, "Catalog fetch failed");
            let error_stats =
                CatalogStats::from_error("fetch_error", &e.to_string()).with_region(region);
            append_record(output, &error_stats)?;
            return Err(e);
        }
    };

    let catalog = match parse_catalog(&bytes) {
        Ok(catalog) => catalog,
        Err(e) => {
            error!(error = %e, "Catalog parse failed");
            let error_stats =
                CatalogStats::from_error("parse_error", &e.to_string()).with_region(region);
            append_record(output, &error_stats)?;
            return Err(e);
        }
    };

    let stats = CatalogStats::from_catalog(&catalog).with_region(region);

    info!(total = stats.total_events, "Catalog summarized");

    if let (Some(mag), Some(place)) = (stats.strongest_magnitude, stats.strongest_place.as_deref())
    {
        info!(
            magnitude = mag,
            place,
            latitude = ?stats.strongest_latitude,
            longitude = ?stats.strongest_longitude,
            depth_km = ?stats.strongest_depth_km,
            time = ?stats.strongest_time,
            "Strongest earthquake"
        );
    } else {
        info!("No earthquakes with a measured magnitude");
    }

    print_json(&stats)?;
    append_record(output, &stats)?;

    Ok(())
}

/// Loads and parses a catalog from a local file path or URL.
async fn load_catalog(source: &str) -> Result<Catalog> {
    let bytes = fetcher(source).await?;
    parse_catalog(&bytes)
}

/// Loads catalog bytes from a local file path or fetches them over HTTP.
#[tracing::instrument(fields(source = %url))]
async fn fetcher(url: &str) -> Result<Vec<u8>> {
    let bytes = if url.starts_with("http") {
        let client = BasicClient::new();
        fetch_bytes(&client, url).await?
    } else {
        std::fs::read(url)?
    };
    Ok(bytes)
}
