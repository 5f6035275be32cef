//! Summary statistics over a report collection.
//!
//! Category rankings break ties by first-seen order: among categories with
//! equal counts, the one whose first report appears earliest in the
//! collection ranks first.

use std::collections::BTreeMap;

use chrono::{DateTime, TimeDelta, Utc};
use incident_map_analytics_models::{
    CategoryCount, SelectedCategories, StatsSummary, TimeSeriesPoint,
};
use incident_map_crime_models::resolve;
use incident_map_source_models::{IncidentReport, ReportStatus};

use crate::filter;

/// Number of reports in the collection.
#[must_use]
pub fn total_count(reports: &[IncidentReport]) -> u64 {
    reports.len() as u64
}

/// Number of reports with [`ReportStatus::Verified`].
#[must_use]
pub fn verified_count(reports: &[IncidentReport]) -> u64 {
    reports
        .iter()
        .filter(|r| r.status == ReportStatus::Verified)
        .count() as u64
}

/// Count per category key, in first-seen order.
#[must_use]
pub fn category_breakdown(reports: &[IncidentReport]) -> Vec<CategoryCount> {
    let mut index: BTreeMap<&str, usize> = BTreeMap::new();
    let mut counts: Vec<CategoryCount> = Vec::new();

    for report in reports {
        let key = report.category.as_str();
        if let Some(&i) = index.get(key) {
            counts[i].count += 1;
        } else {
            index.insert(key, counts.len());
            counts.push(CategoryCount {
                key: key.to_string(),
                label: resolve(key).label.to_string(),
                count: 1,
            });
        }
    }

    counts
}

/// The `n` most frequent categories, most common first.
///
/// Ties keep first-seen order (the sort is stable over
/// [`category_breakdown`]).
#[must_use]
pub fn top_categories(reports: &[IncidentReport], n: usize) -> Vec<CategoryCount> {
    let mut counts = category_breakdown(reports);
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(n);
    counts
}

/// Number of reports timestamped at or after `now - days`.
///
/// The boundary instant itself counts as recent. A window reaching past the
/// earliest representable date counts every report.
#[must_use]
pub fn recent_count(reports: &[IncidentReport], days: u32, now: DateTime<Utc>) -> u64 {
    let Some(cutoff) =
        TimeDelta::try_days(i64::from(days)).and_then(|window| now.checked_sub_signed(window))
    else {
        return total_count(reports);
    };
    reports.iter().filter(|r| r.timestamp >= cutoff).count() as u64
}

/// [`recent_count`] against the current clock.
#[must_use]
pub fn recent_count_now(reports: &[IncidentReport], days: u32) -> u64 {
    recent_count(reports, days, Utc::now())
}

/// Number of reports visible under `selected`.
#[must_use]
pub fn filtered_count(reports: &[IncidentReport], selected: &SelectedCategories) -> u64 {
    filter::apply(reports, selected).len() as u64
}

/// Number of spatial clusters.
///
/// Always zero: clustering is not implemented.
#[must_use]
pub const fn cluster_count(_reports: &[IncidentReport]) -> u64 {
    0
}

/// Report counts per calendar month (`YYYY-MM`), oldest month first.
#[must_use]
pub fn monthly_counts(reports: &[IncidentReport]) -> Vec<TimeSeriesPoint> {
    let mut months: BTreeMap<String, u64> = BTreeMap::new();
    for report in reports {
        *months
            .entry(report.timestamp.format("%Y-%m").to_string())
            .or_default() += 1;
    }
    months
        .into_iter()
        .map(|(period, count)| TimeSeriesPoint { period, count })
        .collect()
}

/// Evaluates every summary accessor at once.
#[must_use]
pub fn summarize(
    reports: &[IncidentReport],
    selected: &SelectedCategories,
    recent_days: u32,
    top_n: usize,
    now: DateTime<Utc>,
) -> StatsSummary {
    StatsSummary {
        total: total_count(reports),
        verified: verified_count(reports),
        top_categories: top_categories(reports, top_n),
        recent_days,
        recent: recent_count(reports, recent_days, now),
        filtered: filtered_count(reports, selected),
        clusters: cluster_count(reports),
    }
}
