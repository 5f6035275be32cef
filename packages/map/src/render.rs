//! Renderer strategies.
//!
//! A [`Renderer`] paints an already-filtered report collection into a
//! [`LayerSink`]. It never touches the mapping backend directly and never
//! clears anything; the [`crate::layers::LayerManager`] does both.

use incident_map_map_models::{HeatLayer, HeatLayerOptions, HeatPoint, Marker, ViewMode};
use incident_map_source_models::{IncidentReport, LatLng};

use crate::{icon, popup};

/// Receives the layers a renderer produces.
pub trait LayerSink {
    /// Adds one marker.
    fn add_marker(&mut self, marker: Marker);

    /// Adds the density layer.
    fn add_heat_layer(&mut self, layer: HeatLayer);
}

/// Paints a report collection onto the map.
pub trait Renderer {
    /// The view mode this renderer implements.
    fn mode(&self) -> ViewMode;

    /// Paints `reports` into `sink`. Reports without coordinates are skipped.
    fn paint(&self, reports: &[&IncidentReport], sink: &mut dyn LayerSink);
}

/// One marker per report.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkerRenderer;

impl Renderer for MarkerRenderer {
    fn mode(&self) -> ViewMode {
        ViewMode::Markers
    }

    fn paint(&self, reports: &[&IncidentReport], sink: &mut dyn LayerSink) {
        for report in reports {
            if let Some(marker) = marker_for(report) {
                sink.add_marker(marker);
            }
        }
    }
}

/// One density layer over all reports.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeatmapRenderer;

impl Renderer for HeatmapRenderer {
    fn mode(&self) -> ViewMode {
        ViewMode::Heatmap
    }

    fn paint(&self, reports: &[&IncidentReport], sink: &mut dyn LayerSink) {
        sink.add_heat_layer(HeatLayer {
            points: heat_points(reports),
            options: HeatLayerOptions::default(),
        });
    }
}

/// Returns the renderer for `mode`.
#[must_use]
pub fn renderer_for(mode: ViewMode) -> &'static dyn Renderer {
    match mode {
        ViewMode::Markers => &MarkerRenderer,
        ViewMode::Heatmap => &HeatmapRenderer,
    }
}

/// Builds the marker for one report, or `None` if it has no coordinates.
#[must_use]
pub fn marker_for(report: &IncidentReport) -> Option<Marker> {
    let Some(position) = report.coordinates else {
        log::debug!("Report {} has no coordinates, not drawing a marker", report.id);
        return None;
    };
    Some(Marker {
        report_id: report.id.clone(),
        category: report.category.clone(),
        position,
        icon: icon::icon_for(&report.category),
        popup: popup::content_for(report),
    })
}

/// Projects reports to heat points of weight 1.
///
/// Every report is its own point: reports sharing a coordinate are not
/// merged or summed, and nothing (status, age) changes the weight.
#[must_use]
pub fn heat_points(reports: &[&IncidentReport]) -> Vec<HeatPoint> {
    reports
        .iter()
        .filter_map(|report| report.coordinates)
        .map(|LatLng { lat, lng }| HeatPoint {
            lat,
            lng,
            weight: 1.0,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use incident_map_source::sample::sample_reports;

    #[derive(Default)]
    struct Collect {
        markers: Vec<Marker>,
        heat: Vec<HeatLayer>,
    }

    impl LayerSink for Collect {
        fn add_marker(&mut self, marker: Marker) {
            self.markers.push(marker);
        }

        fn add_heat_layer(&mut self, layer: HeatLayer) {
            self.heat.push(layer);
        }
    }

    #[test]
    fn marker_renderer_places_one_marker_per_report() {
        let reports = sample_reports();
        let visible: Vec<_> = reports.iter().collect();
        let mut sink = Collect::default();
        MarkerRenderer.paint(&visible, &mut sink);

        assert!(sink.heat.is_empty());
        assert_eq!(sink.markers.len(), 6);
        let first = &sink.markers[0];
        assert_eq!(first.report_id, reports[0].id);
        assert_eq!(Some(first.position), reports[0].coordinates);
        assert_eq!(first.icon.color, "#ef4444");
        assert_eq!(first.popup.title, "Parian Market");
    }

    #[test]
    fn heatmap_renderer_adds_exactly_one_layer() {
        let reports = sample_reports();
        let visible: Vec<_> = reports.iter().collect();
        let mut sink = Collect::default();
        HeatmapRenderer.paint(&visible, &mut sink);

        assert!(sink.markers.is_empty());
        assert_eq!(sink.heat.len(), 1);
        let layer = &sink.heat[0];
        assert_eq!(layer.points.len(), 6);
        assert_eq!(layer.options.radius, 25);
        assert_eq!(layer.options.blur, 15);
        assert_eq!(layer.options.max_zoom, 17);
    }

    #[test]
    fn heat_weight_is_one_even_for_shared_coordinates() {
        let reports = sample_reports();
        let mut stacked = vec![reports[0].clone(); 3];
        stacked.push(reports[1].clone());
        let refs: Vec<_> = stacked.iter().collect();
        let points = heat_points(&refs);

        assert_eq!(points.len(), 4);
        assert!(points.iter().all(|p| (p.weight - 1.0).abs() < f64::EPSILON));
        let at_first = points
            .iter()
            .filter(|p| Some(LatLng::new(p.lat, p.lng)) == reports[0].coordinates)
            .count();
        assert_eq!(at_first, 3);
    }

    #[test]
    fn reports_without_coordinates_are_skipped() {
        let mut report = sample_reports()[0].clone();
        report.coordinates = None;
        let refs = [&report];
        let mut sink = Collect::default();
        MarkerRenderer.paint(&refs, &mut sink);
        assert!(sink.markers.is_empty());
        assert!(heat_points(&refs).is_empty());
    }

    #[test]
    fn empty_heatmap_still_produces_a_layer() {
        let mut sink = Collect::default();
        HeatmapRenderer.paint(&[], &mut sink);
        assert_eq!(sink.heat.len(), 1);
        assert!(sink.heat[0].points.is_empty());
    }

    #[test]
    fn renderer_for_matches_mode() {
        for mode in [ViewMode::Markers, ViewMode::Heatmap] {
            assert_eq!(renderer_for(mode).mode(), mode);
        }
    }
}
