#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Filter selection and summary statistic types.
//!
//! These are the read-only shapes handed to summary panels and chart
//! collaborators. They serialize to camelCase JSON.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Default number of entries returned by top-category queries.
pub const DEFAULT_TOP_N: usize = 5;

/// The set of category keys the user has chosen to filter by.
///
/// An empty selection means "no filter": every report is visible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectedCategories(BTreeSet<String>);

impl SelectedCategories {
    /// Creates an empty (unfiltered) selection.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Returns `true` when no category is selected, i.e. nothing is filtered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` if `key` is selected.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains(key)
    }

    /// Number of selected keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Adds `key` if absent, removes it if present.
    pub fn toggle(&mut self, key: &str) {
        if !self.0.remove(key) {
            self.0.insert(key.to_string());
        }
    }

    /// Iterates the selected keys in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for SelectedCategories {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Number of reports in one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    /// Category key as it appears on the reports.
    pub key: String,
    /// Display label, `"Other"` for keys not in the category table.
    pub label: String,
    /// Number of reports.
    pub count: u64,
}

/// A time-series data point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesPoint {
    /// Period label (`"2024-01"`).
    pub period: String,
    /// Number of reports in the period.
    pub count: u64,
}

/// Every summary accessor evaluated at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    /// Size of the whole collection.
    pub total: u64,
    /// Reports with verified status.
    pub verified: u64,
    /// Most frequent categories, most common first.
    pub top_categories: Vec<CategoryCount>,
    /// Window used for [`Self::recent`], in days.
    pub recent_days: u32,
    /// Reports within the last [`Self::recent_days`] days.
    pub recent: u64,
    /// Reports visible under the current selection.
    pub filtered: u64,
    /// Spatial clusters. Always zero for now.
    pub clusters: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_twice_restores_selection() {
        let mut selected: SelectedCategories = ["theft"].into_iter().collect();
        let before = selected.clone();
        selected.toggle("assault");
        assert!(selected.contains("assault"));
        selected.toggle("assault");
        assert_eq!(selected, before);
    }

    #[test]
    fn new_selection_is_unfiltered() {
        assert!(SelectedCategories::new().is_empty());
        assert_eq!(SelectedCategories::default().len(), 0);
    }

    #[test]
    fn selection_serializes_as_sorted_array() {
        let selected: SelectedCategories = ["vandalism", "theft"].into_iter().collect();
        assert_eq!(
            serde_json::to_string(&selected).unwrap(),
            r#"["theft","vandalism"]"#
        );
    }
}
