#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Report filtering and summary statistics.
//!
//! Everything here is a pure function of a report collection: nothing
//! mutates its input and nothing can fail. Category keys that do not
//! resolve against the category table degrade to the "Other" label.

pub mod filter;
pub mod stats;

pub use filter::{apply, toggle};
pub use incident_map_analytics_models::{
    CategoryCount, DEFAULT_TOP_N, SelectedCategories, StatsSummary, TimeSeriesPoint,
};
