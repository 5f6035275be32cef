//! Ownership of the drawn layer set.
//!
//! Every redraw is clear-then-draw: all layers from the previous render are
//! removed from the backend before the renderer for the current mode adds
//! new ones. There is no incremental diffing.

use incident_map_analytics::filter;
use incident_map_analytics_models::SelectedCategories;
use incident_map_map_models::{HeatLayer, LayerId, Marker, ViewMode};
use incident_map_source_models::IncidentReport;

use crate::MapBackend;
use crate::render::{LayerSink, renderer_for};

/// Layers currently attached to the map.
///
/// Holds either markers or at most one heat layer, never both after a
/// completed render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayerSet {
    markers: Vec<LayerId>,
    heatmap: Option<LayerId>,
}

impl LayerSet {
    /// Marker layer ids, in the order they were added.
    #[must_use]
    pub fn markers(&self) -> &[LayerId] {
        &self.markers
    }

    /// The heat layer id, if one is drawn.
    #[must_use]
    pub const fn heatmap(&self) -> Option<LayerId> {
        self.heatmap
    }

    /// Total number of drawn layers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.markers.len() + usize::from(self.heatmap.is_some())
    }

    /// Returns `true` if nothing is drawn.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Owns the [`LayerSet`] and the active [`ViewMode`].
#[derive(Debug, Default)]
pub struct LayerManager {
    mode: ViewMode,
    layers: LayerSet,
}

impl LayerManager {
    /// Creates a manager in [`ViewMode::Markers`] with nothing drawn.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The active view mode.
    #[must_use]
    pub const fn mode(&self) -> ViewMode {
        self.mode
    }

    /// The layers drawn by the last render.
    #[must_use]
    pub const fn layers(&self) -> &LayerSet {
        &self.layers
    }

    /// Switches the view mode and redraws.
    pub fn set_mode<B: MapBackend + ?Sized>(
        &mut self,
        map: &mut B,
        mode: ViewMode,
        reports: &[IncidentReport],
        selected: &SelectedCategories,
    ) {
        if mode != self.mode {
            log::debug!("View mode {} -> {mode}", self.mode);
        }
        self.rebuild(map, reports, selected, mode);
    }

    /// Removes every marker and the heat layer. Safe to call when empty.
    pub fn clear_layers<B: MapBackend + ?Sized>(&mut self, map: &mut B) {
        for id in self.layers.markers.drain(..) {
            map.remove_layer(id);
        }
        if let Some(id) = self.layers.heatmap.take() {
            map.remove_layer(id);
        }
    }

    /// Clears the map, then draws the reports visible under `selected`
    /// using the renderer for `mode`.
    pub fn rebuild<B: MapBackend + ?Sized>(
        &mut self,
        map: &mut B,
        reports: &[IncidentReport],
        selected: &SelectedCategories,
        mode: ViewMode,
    ) {
        self.clear_layers(map);
        self.mode = mode;

        let visible = filter::apply(reports, selected);
        let mut registrar = Registrar {
            map,
            layers: &mut self.layers,
        };
        renderer_for(mode).paint(&visible, &mut registrar);

        log::debug!(
            "Rendered {} of {} reports as {mode} ({} layers)",
            visible.len(),
            reports.len(),
            self.layers.len()
        );
    }

    /// Sets the view mode without drawing, for when no map is bound yet.
    pub(crate) fn record_mode(&mut self, mode: ViewMode) {
        if mode != self.mode {
            log::debug!("View mode {} -> {mode} (not drawn)", self.mode);
        }
        self.mode = mode;
    }

    /// Drops all layer references without touching a backend, for when the
    /// map itself has been released.
    pub(crate) fn forget_layers(&mut self) {
        self.layers = LayerSet::default();
    }
}

/// Forwards renderer output to the backend and records the resulting ids.
struct Registrar<'a, B: MapBackend + ?Sized> {
    map: &'a mut B,
    layers: &'a mut LayerSet,
}

impl<B: MapBackend + ?Sized> LayerSink for Registrar<'_, B> {
    fn add_marker(&mut self, marker: Marker) {
        match self.map.add_marker(&marker) {
            Ok(id) => self.layers.markers.push(id),
            Err(e) => log::warn!("Failed to add marker for report {}: {e}", marker.report_id),
        }
    }

    fn add_heat_layer(&mut self, layer: HeatLayer) {
        if let Some(previous) = self.layers.heatmap.take() {
            self.map.remove_layer(previous);
        }
        match self.map.add_heat_layer(&layer) {
            Ok(id) => self.layers.heatmap = Some(id),
            Err(e) => log::warn!("Failed to add heat layer: {e}"),
        }
    }
}
