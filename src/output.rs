//! Output formatting and persistence for catalog statistics.
//!
//! Supports pretty-printing, JSON serialization, and CSV output.

use anyhow::Result;
use tracing::{debug, info};

use crate::analyzers::types::YearSummary;
use crate::stats::CatalogStats;
use csv::WriterBuilder;
use std::fs::OpenOptions;
use std::path::Path;

/// Logs catalog statistics using Rust's debug pretty-print format.
pub fn print_pretty(stats: &CatalogStats) {
    debug!("{:#?}", stats);
}

/// Logs catalog statistics as pretty-printed JSON.
pub fn print_json(stats: &CatalogStats) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(stats)?);
    Ok(())
}

/// Appends a [`CatalogStats`] record as a row to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_record(path: &str, stats: &CatalogStats) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, "Appending CSV record");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    writer.serialize(stats)?;
    writer.flush()?;

    Ok(())
}

/// Writes the per-year summary table to a CSV file, replacing any previous
/// contents.
pub fn write_year_summaries(path: &str, summaries: &[YearSummary]) -> Result<()> {
    debug!(path, rows = summaries.len(), "Writing yearly summary CSV");

    let mut writer = csv::Writer::from_path(path)?;
    for summary in summaries {
        writer.serialize(summary)?;
    }
    writer.flush()?;

    Ok(())
}
