//! Category filter over a report collection.

use incident_map_analytics_models::SelectedCategories;
use incident_map_source_models::IncidentReport;

/// Returns the reports visible under `selected`, in their original order.
///
/// An empty selection is the "no filter" sentinel and yields every report.
#[must_use]
pub fn apply<'a>(
    reports: &'a [IncidentReport],
    selected: &SelectedCategories,
) -> Vec<&'a IncidentReport> {
    if selected.is_empty() {
        return reports.iter().collect();
    }
    reports
        .iter()
        .filter(|report| selected.contains(&report.category))
        .collect()
}

/// Returns `selected` with `category` removed if present or added if absent.
///
/// Applying it twice with the same category gives back the original set.
/// Keys need not exist in the category table.
#[must_use]
pub fn toggle(selected: &SelectedCategories, category: &str) -> SelectedCategories {
    let mut next = selected.clone();
    next.toggle(category);
    next
}
