#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! The canonical incident report and the raw record shapes it comes from.
//!
//! Reports reach the map from two places that never agreed on a schema:
//! locally constructed objects (camelCase, `crimeType`/`timestamp`) and the
//! remote reports API (snake_case, `crime_type`/`date`). Both are described
//! here as raw record types; `incident_map_source` maps them into
//! [`IncidentReport`], which is the only shape the rest of the system sees.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Review status of a report.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ReportStatus {
    /// Filed, not yet reviewed
    #[default]
    Pending,
    /// Confirmed by barangay staff
    Verified,
    /// Being looked into
    UnderInvestigation,
}

impl ReportStatus {
    /// Human-readable label shown on the status badge.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Verified => "verified",
            Self::UnderInvestigation => "under investigation",
        }
    }

    /// Parses a loosely formatted status string.
    ///
    /// Accepts the snake_case key as well as the space-separated and
    /// capitalized forms seen in raw records (`"under investigation"`,
    /// `"Verified"`). Returns `None` for anything else.
    #[must_use]
    pub fn parse_loose(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_lowercase().replace([' ', '-'], "_");
        normalized.parse().ok()
    }
}

/// Stable identifier of a report.
///
/// Remote records send ids as either numbers or strings, so the canonical
/// form is the string rendering.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportId(pub String);

impl std::fmt::Display for ReportId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for ReportId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for ReportId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl LatLng {
    /// Creates a coordinate pair.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// An incident report in the canonical shape.
///
/// The category key is kept as a plain string: keys missing from the
/// category table are valid and render with the fallback style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentReport {
    /// Unique, immutable identifier.
    pub id: ReportId,
    /// Category key (e.g. `"theft"`).
    pub category: String,
    /// Free-text location label (e.g. "Parian Market").
    pub location: String,
    /// Where it happened. `None` when the source had no usable coordinates;
    /// such reports are counted but never drawn.
    pub coordinates: Option<LatLng>,
    /// Free-text description.
    pub description: String,
    /// Review status.
    pub status: ReportStatus,
    /// When the incident occurred or was filed.
    pub timestamp: DateTime<Utc>,
}

/// A number or string as found in loosely typed JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawScalar {
    /// Integral JSON number.
    Int(i64),
    /// Fractional JSON number.
    Float(f64),
    /// JSON string.
    Text(String),
}

impl RawScalar {
    /// Returns the value as a float, parsing strings.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            #[allow(clippy::cast_precision_loss)]
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }

    /// Returns the value rendered as an identifier string.
    #[must_use]
    pub fn as_id(&self) -> String {
        match self {
            Self::Int(v) => v.to_string(),
            Self::Float(v) => v.to_string(),
            Self::Text(s) => s.trim().to_string(),
        }
    }
}

/// A report as constructed locally by the map view (camelCase).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalReportRecord {
    /// Numeric id.
    pub id: i64,
    /// Category key.
    pub crime_type: String,
    /// Location label.
    pub location: String,
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
    /// Description.
    pub description: String,
    /// Status string (e.g. `"verified"`, `"under investigation"`).
    pub status: String,
    /// Naive local datetime, `YYYY-MM-DDTHH:MM:SS`.
    pub timestamp: String,
}

/// A report as returned by the remote reports API (snake_case).
///
/// Everything except the id is optional because the endpoint serves rows
/// filed through a form that never captured coordinates or status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteReportRecord {
    /// Row id, number or string.
    pub id: RawScalar,
    /// Crime type as typed or picked in the submission form.
    pub crime_type: Option<String>,
    /// Location label.
    pub location: Option<String>,
    /// Latitude, number or numeric string.
    #[serde(default, alias = "lat")]
    pub latitude: Option<RawScalar>,
    /// Longitude, number or numeric string.
    #[serde(default, alias = "lng")]
    pub longitude: Option<RawScalar>,
    /// Description.
    pub description: Option<String>,
    /// Status string.
    pub status: Option<String>,
    /// Date (`YYYY-MM-DD`) or datetime.
    pub date: Option<String>,
}
