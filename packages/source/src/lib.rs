#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Incident report sources and normalization logic.
//!
//! Each provider implements the [`ReportSource`] trait to deliver a whole
//! report collection at once, already mapped into the canonical
//! [`IncidentReport`] shape. The mapping itself lives in [`adapter`], one
//! function per raw record shape.

pub mod adapter;
pub mod http;
pub mod parsing;
pub mod sample;
pub mod type_mapping;

use async_trait::async_trait;
use incident_map_source_models::IncidentReport;

pub use http::HttpReportSource;
pub use sample::SampleReportSource;

/// Errors that can occur while fetching or normalizing reports.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("Reports endpoint returned status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A raw record could not be mapped to the canonical shape.
    #[error("Normalization error for report {id}: {message}")]
    Normalization {
        /// Id of the offending record.
        id: String,
        /// Description of what went wrong.
        message: String,
    },
}

/// Trait that all report providers must implement.
///
/// A fetch always yields the complete collection; callers replace whatever
/// they held before rather than merging.
#[async_trait]
pub trait ReportSource: Send + Sync {
    /// Returns a short identifier for this source (e.g., `"sample"`).
    fn id(&self) -> &str;

    /// Fetches the full report collection.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] if the transport or decoding fails.
    async fn fetch_reports(&self) -> Result<Vec<IncidentReport>, ReportError>;
}
