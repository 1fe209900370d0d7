//! PNG chart rendering for the per-year summary table.

use anyhow::{Result, anyhow, bail};
use plotters::prelude::*;

use crate::analyzers::types::YearSummary;

const CHART_WIDTH: u32 = 1024;
const CHART_HEIGHT: u32 = 768;

/// Renders a bar chart of event counts per year.
pub fn plot_counts_per_year(path: &str, summaries: &[YearSummary]) -> Result<()> {
    if summaries.is_empty() {
        bail!("cannot plot an empty yearly summary");
    }

    let first = summaries[0].year;
    let last = summaries[summaries.len() - 1].year;
    let max_count = summaries.iter().map(|s| s.count).max().unwrap_or(0) as i64;

    let root = BitMapBackend::new(path, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| anyhow!("fill background: {e}"))?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Earthquakes per year", ("sans-serif", 32))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(first..last + 1, 0i64..max_count + 1)
        .map_err(|e| anyhow!("build chart: {e}"))?;

    chart
        .configure_mesh()
        .x_desc("Year")
        .y_desc("Number of earthquakes")
        .x_label_formatter(&|year| format!("{year}"))
        .light_line_style(BLACK.mix(0.15))
        .draw()
        .map_err(|e| anyhow!("draw mesh: {e}"))?;

    chart
        .draw_series(summaries.iter().map(|s| {
            Rectangle::new(
                [(s.year, 0), (s.year + 1, s.count as i64)],
                BLUE.mix(0.5).filled(),
            )
        }))
        .map_err(|e| anyhow!("draw bars: {e}"))?;

    root.present().map_err(|e| anyhow!("write {path}: {e}"))?;
    Ok(())
}

/// Renders a line-with-points chart of mean magnitude per year.
///
/// Years without a mean (no measured magnitudes) break the line rather than
/// being interpolated over.
pub fn plot_mean_magnitude_per_year(path: &str, summaries: &[YearSummary]) -> Result<()> {
    let segments = magnitude_segments(summaries);
    if segments.is_empty() {
        bail!("no yearly mean magnitudes to plot");
    }

    let first = summaries[0].year;
    let last = summaries[summaries.len() - 1].year;

    let (min_mag, max_mag) = segments
        .iter()
        .flatten()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), &(_, m)| {
            (min.min(m), max.max(m))
        });
    let padding = if (max_mag - min_mag).abs() > 1e-6 {
        (max_mag - min_mag) * 0.1
    } else {
        0.5
    };

    let root = BitMapBackend::new(path, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| anyhow!("fill background: {e}"))?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Average magnitude per year", ("sans-serif", 32))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(first..last + 1, (min_mag - padding)..(max_mag + padding))
        .map_err(|e| anyhow!("build chart: {e}"))?;

    chart
        .configure_mesh()
        .x_desc("Year")
        .y_desc("Magnitude (Richter scale)")
        .x_label_formatter(&|year| format!("{year}"))
        .light_line_style(BLACK.mix(0.15))
        .draw()
        .map_err(|e| anyhow!("draw mesh: {e}"))?;

    for segment in &segments {
        chart
            .draw_series(LineSeries::new(segment.iter().copied(), &RED))
            .map_err(|e| anyhow!("draw line: {e}"))?;
    }

    chart
        .draw_series(
            segments
                .iter()
                .flatten()
                .map(|&(year, mag)| Circle::new((year, mag), 4, RED.filled())),
        )
        .map_err(|e| anyhow!("draw points: {e}"))?;

    root.present().map_err(|e| anyhow!("write {path}: {e}"))?;
    Ok(())
}

/// Splits the summary rows into runs of consecutive years that have a mean
/// magnitude. Each run becomes one line segment.
fn magnitude_segments(summaries: &[YearSummary]) -> Vec<Vec<(i32, f64)>> {
    let mut segments = Vec::new();
    let mut current = Vec::new();

    for summary in summaries {
        match summary.mean_magnitude {
            Some(mag) => current.push((summary.year, mag)),
            None => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(year: i32, count: usize, mean: Option<f64>) -> YearSummary {
        YearSummary {
            year,
            count,
            mean_magnitude: mean,
            max_magnitude: mean,
            stddev_magnitude: mean.map(|_| 0.0),
        }
    }

    #[test]
    fn test_empty_summary_is_an_error() {
        assert!(plot_counts_per_year("/tmp/quake_stats_unused.png", &[]).is_err());
        assert!(plot_mean_magnitude_per_year("/tmp/quake_stats_unused.png", &[]).is_err());
    }

    #[test]
    fn test_all_gap_years_is_an_error() {
        let rows = vec![summary(2000, 0, None), summary(2001, 0, None)];
        assert!(plot_mean_magnitude_per_year("/tmp/quake_stats_unused.png", &rows).is_err());
    }

    #[test]
    fn test_segments_split_on_gap_years() {
        let rows = vec![
            summary(2000, 2, Some(2.5)),
            summary(2001, 1, Some(3.0)),
            summary(2002, 0, None),
            summary(2003, 1, Some(4.2)),
        ];

        let segments = magnitude_segments(&rows);

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0], vec![(2000, 2.5), (2001, 3.0)]);
        assert_eq!(segments[1], vec![(2003, 4.2)]);
    }

    #[test]
    fn test_single_run_is_one_segment() {
        let rows = vec![summary(2010, 1, Some(1.5)), summary(2011, 2, Some(2.5))];
        let segments = magnitude_segments(&rows);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].len(), 2);
    }
}
