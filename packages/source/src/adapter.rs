//! Adapters from raw record shapes to the canonical [`IncidentReport`].
//!
//! There is exactly one adapter per external shape. Nothing downstream of
//! this module looks at raw records or branches on which fields a record
//! happened to carry.

use incident_map_source_models::{
    IncidentReport, LatLng, LocalReportRecord, RemoteReportRecord, ReportId, ReportStatus,
};

use crate::ReportError;
use crate::parsing::{parse_lat_lng, parse_report_timestamp};
use crate::type_mapping::map_crime_type;

/// Maps a locally constructed (camelCase) record.
///
/// The `crimeType` field is already a category key and is kept verbatim,
/// even when it does not resolve against the category table.
///
/// # Errors
///
/// Returns [`ReportError::Normalization`] if the timestamp cannot be parsed.
pub fn from_local(record: &LocalReportRecord) -> Result<IncidentReport, ReportError> {
    let id = ReportId::from(record.id);
    let timestamp =
        parse_report_timestamp(&record.timestamp).ok_or_else(|| ReportError::Normalization {
            id: id.to_string(),
            message: format!("unparseable timestamp {:?}", record.timestamp),
        })?;

    Ok(IncidentReport {
        coordinates: coordinates(Some(record.lat), Some(record.lng), &id),
        status: status(Some(&record.status), &id),
        category: record.crime_type.clone(),
        location: record.location.clone(),
        description: record.description.clone(),
        timestamp,
        id,
    })
}

/// Maps a record from the remote reports API (snake_case).
///
/// Free-form `crime_type` labels are mapped to category keys by
/// [`map_crime_type`]; a missing type becomes `"other"`. A missing status
/// becomes [`ReportStatus::Pending`].
///
/// # Errors
///
/// Returns [`ReportError::Normalization`] if `date` is missing or cannot be
/// parsed.
pub fn from_remote(record: &RemoteReportRecord) -> Result<IncidentReport, ReportError> {
    let id = ReportId(record.id.as_id());
    let raw_date = record
        .date
        .as_deref()
        .ok_or_else(|| ReportError::Normalization {
            id: id.to_string(),
            message: "missing date".to_string(),
        })?;
    let timestamp = parse_report_timestamp(raw_date).ok_or_else(|| ReportError::Normalization {
        id: id.to_string(),
        message: format!("unparseable date {raw_date:?}"),
    })?;

    let lat = record.latitude.as_ref().and_then(|v| v.as_f64());
    let lng = record.longitude.as_ref().and_then(|v| v.as_f64());

    Ok(IncidentReport {
        category: map_crime_type(record.crime_type.as_deref().unwrap_or_default())
            .key()
            .to_string(),
        location: record.location.clone().unwrap_or_default(),
        coordinates: coordinates(lat, lng, &id),
        description: record.description.clone().unwrap_or_default(),
        status: status(record.status.as_deref(), &id),
        timestamp,
        id,
    })
}

/// Maps a batch of local records, dropping (and logging) any that fail.
#[must_use]
pub fn normalize_local(records: &[LocalReportRecord]) -> Vec<IncidentReport> {
    collect_valid(records.iter().map(from_local))
}

/// Maps a batch of remote records, dropping (and logging) any that fail.
#[must_use]
pub fn normalize_remote(records: &[RemoteReportRecord]) -> Vec<IncidentReport> {
    collect_valid(records.iter().map(from_remote))
}

/// Decodes a remote API response body (a JSON array of records) and maps it.
///
/// # Errors
///
/// Returns [`ReportError::Json`] if the body is not an array of records.
/// Individual records that fail to map are dropped, not reported.
pub fn parse_remote_body(body: &str) -> Result<Vec<IncidentReport>, ReportError> {
    let records: Vec<RemoteReportRecord> = serde_json::from_str(body)?;
    Ok(normalize_remote(&records))
}

fn collect_valid(
    results: impl Iterator<Item = Result<IncidentReport, ReportError>>,
) -> Vec<IncidentReport> {
    results
        .filter_map(|result| match result {
            Ok(report) => Some(report),
            Err(e) => {
                log::warn!("Skipping report: {e}");
                None
            }
        })
        .collect()
}

fn coordinates(lat: Option<f64>, lng: Option<f64>, id: &ReportId) -> Option<LatLng> {
    let parsed = parse_lat_lng(lat, lng).map(|(lat, lng)| LatLng::new(lat, lng));
    if parsed.is_none() {
        log::debug!("Report {id} has no usable coordinates");
    }
    parsed
}

fn status(raw: Option<&str>, id: &ReportId) -> ReportStatus {
    let Some(raw) = raw else {
        return ReportStatus::default();
    };
    ReportStatus::parse_loose(raw).unwrap_or_else(|| {
        log::warn!("Report {id} has unknown status {raw:?}, treating as pending");
        ReportStatus::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use incident_map_source_models::RawScalar;

    fn local() -> LocalReportRecord {
        LocalReportRecord {
            id: 5,
            crime_type: "drug".to_string(),
            location: "Parian Alley 5".to_string(),
            lat: 14.2005,
            lng: 121.1550,
            description: "Suspected drug activity".to_string(),
            status: "under investigation".to_string(),
            timestamp: "2024-01-11T23:30:00".to_string(),
        }
    }

    fn remote() -> RemoteReportRecord {
        RemoteReportRecord {
            id: RawScalar::Text("42".to_string()),
            crime_type: Some("Drug-related".to_string()),
            location: Some("Parian Alley 5".to_string()),
            latitude: Some(RawScalar::Text("14.2005".to_string())),
            longitude: Some(RawScalar::Float(121.1550)),
            description: Some("Suspected drug activity".to_string()),
            status: None,
            date: Some("2024-01-11".to_string()),
        }
    }

    #[test]
    fn maps_local_record() {
        let report = from_local(&local()).unwrap();
        assert_eq!(report.id, ReportId::from("5"));
        assert_eq!(report.category, "drug");
        assert_eq!(report.status, ReportStatus::UnderInvestigation);
        assert_eq!(report.coordinates, Some(LatLng::new(14.2005, 121.1550)));
        assert_eq!(report.timestamp.to_string(), "2024-01-11 23:30:00 UTC");
    }

    #[test]
    fn local_keeps_unknown_category_key() {
        let mut record = local();
        record.crime_type = "arson".to_string();
        assert_eq!(from_local(&record).unwrap().category, "arson");
    }

    #[test]
    fn maps_remote_record() {
        let report = from_remote(&remote()).unwrap();
        assert_eq!(report.id, ReportId::from("42"));
        assert_eq!(report.category, "drug");
        assert_eq!(report.status, ReportStatus::Pending);
        assert_eq!(report.coordinates, Some(LatLng::new(14.2005, 121.1550)));
        assert_eq!(report.timestamp.to_string(), "2024-01-11 00:00:00 UTC");
    }

    #[test]
    fn both_shapes_agree_on_shared_fields() {
        let a = from_local(&local()).unwrap();
        let b = from_remote(&remote()).unwrap();
        assert_eq!(a.category, b.category);
        assert_eq!(a.location, b.location);
        assert_eq!(a.coordinates, b.coordinates);
        assert_eq!(a.description, b.description);
    }

    #[test]
    fn remote_without_coordinates_is_kept() {
        let mut record = remote();
        record.latitude = None;
        let report = from_remote(&record).unwrap();
        assert!(report.coordinates.is_none());
    }

    #[test]
    fn remote_without_date_is_rejected() {
        let mut record = remote();
        record.date = None;
        assert!(matches!(
            from_remote(&record),
            Err(ReportError::Normalization { .. })
        ));
    }

    #[test]
    fn batch_drops_bad_records_and_keeps_order() {
        let mut bad = remote();
        bad.date = Some("soon".to_string());
        let mut second = remote();
        second.id = RawScalar::Int(43);
        let reports = normalize_remote(&[remote(), bad, second]);
        let ids: Vec<_> = reports.iter().map(|r| r.id.to_string()).collect();
        assert_eq!(ids, ["42", "43"]);
    }

    #[test]
    fn parses_remote_body() {
        let body = r#"[
            {"id": 1, "crime_type": "Robbery", "location": "Parian Road",
             "description": "Bag snatched", "date": "2024-02-02"},
            {"id": "2", "crime_type": null, "date": "2024-02-03 08:00:00",
             "status": "verified"}
        ]"#;
        let reports = parse_remote_body(body).unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].category, "theft");
        assert_eq!(reports[1].category, "other");
        assert_eq!(reports[1].status, ReportStatus::Verified);
        assert_eq!(reports[1].location, "");
    }

    #[test]
    fn rejects_non_array_body() {
        assert!(matches!(
            parse_remote_body(r#"{"error": "db down"}"#),
            Err(ReportError::Json(_))
        ));
    }
}
