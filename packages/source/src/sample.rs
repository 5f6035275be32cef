//! Built-in sample snapshot of Barangay Parian reports.
//!
//! Used as the static collection the map shows before (or instead of) a
//! remote fetch, and as fixture data throughout the test suites.

use async_trait::async_trait;
use incident_map_source_models::{IncidentReport, LocalReportRecord};

use crate::{ReportError, ReportSource, adapter};

/// `(id, crime type, location, lat, lng, description, status, timestamp)`
type SampleRow = (
    i64,
    &'static str,
    &'static str,
    f64,
    f64,
    &'static str,
    &'static str,
    &'static str,
);

const SAMPLE_ROWS: &[SampleRow] = &[
    (
        1,
        "theft",
        "Parian Market",
        14.2002,
        121.1533,
        "Stolen wallet from market vendor",
        "verified",
        "2024-01-15T10:30:00",
    ),
    (
        2,
        "assault",
        "Parian Elementary School",
        14.2015,
        121.1520,
        "Physical altercation near school gate",
        "verified",
        "2024-01-14T18:45:00",
    ),
    (
        3,
        "theft",
        "Parian Barangay Hall",
        14.1998,
        121.1545,
        "Snatched phone from pedestrian",
        "verified",
        "2024-01-13T14:20:00",
    ),
    (
        4,
        "vandalism",
        "Parian Basketball Court",
        14.2020,
        121.1510,
        "Graffiti on public walls",
        "verified",
        "2024-01-12T21:15:00",
    ),
    (
        5,
        "drug",
        "Parian Alley 5",
        14.2005,
        121.1550,
        "Suspected drug activity",
        "under investigation",
        "2024-01-11T23:30:00",
    ),
    (
        6,
        "theft",
        "Parian Road",
        14.2010,
        121.1540,
        "Car break-in",
        "verified",
        "2024-01-10T20:00:00",
    ),
];

/// Returns the sample rows as raw local records.
#[must_use]
pub fn sample_records() -> Vec<LocalReportRecord> {
    SAMPLE_ROWS
        .iter()
        .map(
            |&(id, crime_type, location, lat, lng, description, status, timestamp)| {
                LocalReportRecord {
                    id,
                    crime_type: crime_type.to_string(),
                    location: location.to_string(),
                    lat,
                    lng,
                    description: description.to_string(),
                    status: status.to_string(),
                    timestamp: timestamp.to_string(),
                }
            },
        )
        .collect()
}

/// Returns the six sample reports in canonical form.
#[must_use]
pub fn sample_reports() -> Vec<IncidentReport> {
    adapter::normalize_local(&sample_records())
}

/// A [`ReportSource`] that always yields the sample snapshot.
#[derive(Debug, Default, Clone, Copy)]
pub struct SampleReportSource;

#[async_trait]
impl ReportSource for SampleReportSource {
    fn id(&self) -> &str {
        "sample"
    }

    async fn fetch_reports(&self) -> Result<Vec<IncidentReport>, ReportError> {
        Ok(sample_reports())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use incident_map_source_models::ReportStatus;

    #[test]
    fn all_sample_rows_normalize() {
        let reports = sample_reports();
        assert_eq!(reports.len(), SAMPLE_ROWS.len());
        assert!(reports.iter().all(|r| r.coordinates.is_some()));
    }

    #[test]
    fn sample_has_expected_shape() {
        let reports = sample_reports();
        let thefts = reports.iter().filter(|r| r.category == "theft").count();
        let verified = reports
            .iter()
            .filter(|r| r.status == ReportStatus::Verified)
            .count();
        assert_eq!(thefts, 3);
        assert_eq!(verified, 5);
    }

    #[tokio::test]
    async fn source_yields_snapshot() {
        let source = SampleReportSource;
        assert_eq!(source.id(), "sample");
        assert_eq!(source.fetch_reports().await.unwrap(), sample_reports());
    }
}
