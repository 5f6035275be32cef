//! Remote reports API source.
//!
//! Fetches the whole collection from a JSON endpoint in one request and
//! maps it through [`adapter::normalize_remote`]. There is no retry here:
//! a failed fetch is surfaced to the caller, which keeps its previous
//! collection.

use async_trait::async_trait;
use incident_map_source_models::{IncidentReport, RemoteReportRecord};

use crate::{ReportError, ReportSource, adapter};

/// Reports endpoint served by the barangay backend.
pub const DEFAULT_REPORTS_URL: &str = "http://localhost/e-sumbong/php/get_reports.php";

/// A [`ReportSource`] backed by an HTTP GET returning a JSON array.
#[derive(Debug, Clone)]
pub struct HttpReportSource {
    client: reqwest::Client,
    url: String,
}

impl HttpReportSource {
    /// Creates a source for the given endpoint URL.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    /// Creates a source that shares an existing HTTP client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// Returns the endpoint URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for HttpReportSource {
    fn default() -> Self {
        Self::new(DEFAULT_REPORTS_URL)
    }
}

#[async_trait]
impl ReportSource for HttpReportSource {
    fn id(&self) -> &str {
        "http"
    }

    async fn fetch_reports(&self) -> Result<Vec<IncidentReport>, ReportError> {
        log::debug!("Fetching reports from {}", self.url);

        let resp = self.client.get(&self.url).send().await?;
        if !resp.status().is_success() {
            return Err(ReportError::Status {
                status: resp.status().as_u16(),
            });
        }
        let records: Vec<RemoteReportRecord> = resp.json().await?;
        let reports = adapter::normalize_remote(&records);

        log::info!("Fetched {} reports from {}", reports.len(), self.url);
        Ok(reports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use incident_map_source_models::ReportStatus;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves one HTTP response on a local port and returns its URL.
    async fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = [0_u8; 4096];
            let _ = stream.read(&mut buf).await.unwrap();
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.unwrap();
        });
        format!("http://{addr}/get_reports.php")
    }

    #[tokio::test]
    async fn decodes_json_array_of_remote_records() {
        let url = serve_once(
            "200 OK",
            r#"[{"id": 7, "crime_type": "Robbery", "location": "Parian Road",
                 "latitude": "14.2010", "longitude": 121.154,
                 "description": "Bag snatched", "status": "verified",
                 "date": "2024-02-02"},
                {"id": "8", "crime_type": "Drug-related"}]"#,
        )
        .await;

        let reports = HttpReportSource::new(url).fetch_reports().await.unwrap();

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].id.to_string(), "7");
        assert_eq!(reports[0].category, "theft");
        assert_eq!(reports[0].status, ReportStatus::Verified);
        assert!(reports[0].coordinates.is_some());
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let url = serve_once("500 Internal Server Error", "[]").await;
        assert!(matches!(
            HttpReportSource::new(url).fetch_reports().await,
            Err(ReportError::Status { status: 500 })
        ));
    }

    #[tokio::test]
    async fn non_array_body_is_an_error() {
        let url = serve_once("200 OK", r#"{"error": "db down"}"#).await;
        assert!(matches!(
            HttpReportSource::new(url).fetch_reports().await,
            Err(ReportError::Http(_))
        ));
    }

    #[test]
    fn default_points_at_reports_endpoint() {
        let source = HttpReportSource::default();
        assert_eq!(source.url(), DEFAULT_REPORTS_URL);
        assert_eq!(source.id(), "http");
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_an_error() {
        let source = HttpReportSource::new("http://127.0.0.1:9/reports");
        assert!(matches!(
            source.fetch_reports().await,
            Err(ReportError::Http(_))
        ));
    }
}
