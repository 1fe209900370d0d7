use std::collections::BTreeMap;

use crate::analyzers::types::{YearBucket, YearSummary};
use crate::analyzers::utility::{mean, stddev};
use crate::parser::Catalog;

/// Groups catalog events into per-year buckets keyed by UTC calendar year.
///
/// Events without a usable timestamp cannot be assigned to a year and are
/// dropped here; they still appear in the catalog-level counts.
pub fn bucket_by_year(catalog: &Catalog) -> BTreeMap<i32, YearBucket> {
    let mut buckets: BTreeMap<i32, YearBucket> = BTreeMap::new();

    for event in &catalog.features {
        if let Some(year) = event.year() {
            buckets.entry(year).or_default().push(event.magnitude());
        }
    }

    buckets
}

/// Flattens year buckets into one [`YearSummary`] row per year, from the
/// earliest to the latest observed year inclusive. Years with no events get
/// a zero count and no magnitude aggregates, so the span is contiguous.
pub fn summarize_years(buckets: &BTreeMap<i32, YearBucket>) -> Vec<YearSummary> {
    let (Some(&first), Some(&last)) = (
        buckets.keys().next(),
        buckets.keys().next_back(),
    ) else {
        return Vec::new();
    };

    (first..=last)
        .map(|year| match buckets.get(&year) {
            Some(bucket) => {
                let mags = &bucket.magnitudes;
                let avg = mean(mags);
                YearSummary {
                    year,
                    count: bucket.count,
                    mean_magnitude: (!mags.is_empty()).then_some(avg),
                    max_magnitude: mags.iter().copied().reduce(f64::max),
                    stddev_magnitude: (!mags.is_empty()).then(|| stddev(mags, avg)),
                }
            }
            None => YearSummary {
                year,
                count: 0,
                mean_magnitude: None,
                max_magnitude: None,
                stddev_magnitude: None,
            },
        })
        .collect()
}

/// Convenience wrapper: bucket a catalog and summarize it in one call.
pub fn yearly_summary(catalog: &Catalog) -> Vec<YearSummary> {
    summarize_years(&bucket_by_year(catalog))
}
