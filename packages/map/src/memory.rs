//! In-memory mapping backend.
//!
//! Records everything it is asked to draw instead of drawing it. Used by
//! the CLI to produce layer dumps and by the tests to observe rendering.

use std::collections::BTreeMap;

use incident_map_map_models::{HeatLayer, LayerId, Marker, ScaleControl, TileSource};
use incident_map_source_models::LatLng;

use crate::{MapBackend, MapError};

/// A layer held by [`InMemoryMap`].
#[derive(Debug, Clone, PartialEq)]
pub enum MapLayer {
    /// Base tiles.
    Tiles(TileSource),
    /// A report marker.
    Marker(Marker),
    /// A density layer.
    Heat(HeatLayer),
}

/// A [`MapBackend`] that keeps its layers in a map keyed by [`LayerId`].
#[derive(Debug, Default)]
pub struct InMemoryMap {
    next_id: u64,
    layers: BTreeMap<LayerId, MapLayer>,
    view: Option<(LatLng, u8)>,
    scale: Option<ScaleControl>,
    remove_calls: u32,
    fail_layer_adds: bool,
}

impl InMemoryMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent marker and heat layer adds fail, to exercise error
    /// paths.
    pub const fn fail_layer_adds(&mut self, fail: bool) {
        self.fail_layer_adds = fail;
    }

    /// All attached layers in insertion order.
    pub fn layers(&self) -> impl Iterator<Item = (&LayerId, &MapLayer)> {
        self.layers.iter()
    }

    /// Attached markers in insertion order.
    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.layers.values().filter_map(|layer| match layer {
            MapLayer::Marker(m) => Some(m),
            _ => None,
        })
    }

    /// Number of attached markers.
    #[must_use]
    pub fn marker_count(&self) -> usize {
        self.markers().count()
    }

    /// Number of attached heat layers.
    #[must_use]
    pub fn heat_layer_count(&self) -> usize {
        self.layers
            .values()
            .filter(|layer| matches!(layer, MapLayer::Heat(_)))
            .count()
    }

    /// Total points across attached heat layers.
    #[must_use]
    pub fn heat_points(&self) -> usize {
        self.layers
            .values()
            .map(|layer| match layer {
                MapLayer::Heat(h) => h.points.len(),
                _ => 0,
            })
            .sum()
    }

    /// The attached tile source, if any.
    #[must_use]
    pub fn tiles(&self) -> Option<&TileSource> {
        self.layers.values().find_map(|layer| match layer {
            MapLayer::Tiles(t) => Some(t),
            _ => None,
        })
    }

    /// The last view set on the map.
    #[must_use]
    pub const fn view(&self) -> Option<(LatLng, u8)> {
        self.view
    }

    /// The scale control, if one was added.
    #[must_use]
    pub const fn scale(&self) -> Option<ScaleControl> {
        self.scale
    }

    /// How many times [`MapBackend::remove`] was called.
    #[must_use]
    pub const fn remove_calls(&self) -> u32 {
        self.remove_calls
    }

    fn insert(&mut self, layer: MapLayer) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id += 1;
        self.layers.insert(id, layer);
        id
    }

    fn check_adds(&self) -> Result<(), MapError> {
        if self.fail_layer_adds {
            return Err(MapError::Backend {
                message: "layer adds disabled".to_string(),
            });
        }
        Ok(())
    }
}

impl MapBackend for InMemoryMap {
    fn set_view(&mut self, center: LatLng, zoom: u8) -> Result<(), MapError> {
        self.view = Some((center, zoom));
        Ok(())
    }

    fn add_tile_layer(&mut self, tiles: &TileSource) -> Result<LayerId, MapError> {
        Ok(self.insert(MapLayer::Tiles(tiles.clone())))
    }

    fn add_scale_control(&mut self, scale: ScaleControl) -> Result<(), MapError> {
        self.scale = Some(scale);
        Ok(())
    }

    fn add_marker(&mut self, marker: &Marker) -> Result<LayerId, MapError> {
        self.check_adds()?;
        Ok(self.insert(MapLayer::Marker(marker.clone())))
    }

    fn add_heat_layer(&mut self, layer: &HeatLayer) -> Result<LayerId, MapError> {
        self.check_adds()?;
        Ok(self.insert(MapLayer::Heat(layer.clone())))
    }

    fn remove_layer(&mut self, id: LayerId) {
        self.layers.remove(&id);
    }

    fn remove(&mut self) {
        self.remove_calls += 1;
        self.layers.clear();
        self.view = None;
        self.scale = None;
    }
}
