//! Popup content for a single report.

use incident_map_crime_models::resolve;
use incident_map_map_models::{Badge, PopupContent};
use incident_map_source_models::IncidentReport;

/// Date format of the popup (`1/15/2024`).
pub const POPUP_DATE_FORMAT: &str = "%-m/%-d/%Y";

const STATUS_BACKGROUND: &str = "#f3f4f6";

/// Builds the popup content for `report`.
///
/// Unknown category keys get the "Other" label on the default color.
#[must_use]
pub fn content_for(report: &IncidentReport) -> PopupContent {
    let style = resolve(&report.category);
    PopupContent {
        category: Badge {
            text: style.label.to_string(),
            background: style.color.to_string(),
        },
        title: report.location.clone(),
        date: report.timestamp.format(POPUP_DATE_FORMAT).to_string(),
        description: report.description.clone(),
        status: Badge {
            text: report.status.label().to_string(),
            background: STATUS_BACKGROUND.to_string(),
        },
    }
}

/// Renders popup content as an HTML fragment.
///
/// All report-supplied text is escaped.
#[must_use]
pub fn to_html(content: &PopupContent) -> String {
    format!(
        concat!(
            r#"<div style="min-width: 200px; padding: 8px;">"#,
            r#"<div style="background: {cat_bg}; color: white; padding: 4px 8px; border-radius: 4px; font-size: 12px; font-weight: bold; margin-bottom: 8px;">{cat}</div>"#,
            r#"<h3 style="margin: 0 0 8px 0; font-size: 14px;">{title}</h3>"#,
            r#"<p style="margin: 0 0 6px 0; font-size: 12px; color: #666;"><strong>Date:</strong> {date}</p>"#,
            r#"<p style="margin: 0; font-size: 12px; color: #666;"><strong>Description:</strong> {description}</p>"#,
            r#"<div style="margin-top: 8px; padding: 4px; background: {status_bg}; border-radius: 4px; font-size: 11px;">Status: <strong>{status}</strong></div>"#,
            "</div>",
        ),
        cat_bg = escape(&content.category.background),
        cat = escape(&content.category.text),
        title = escape(&content.title),
        date = escape(&content.date),
        description = escape(&content.description),
        status_bg = escape(&content.status.background),
        status = escape(&content.status.text),
    )
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
