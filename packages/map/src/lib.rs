#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Marker and heatmap rendering for incident reports.
//!
//! The pieces, leaves first:
//!
//! - [`icon`] and [`popup`] turn a report into a pin glyph and popup content.
//! - [`render`] holds the two interchangeable [`render::Renderer`]
//!   strategies, one per [`ViewMode`].
//! - [`layers::LayerManager`] owns the set of drawn layers and always
//!   clears it completely before drawing again.
//! - [`canvas::MapCanvas`] owns the mapping backend, waits for the view
//!   surface to become ready, attaches tiles, and tears the map down once.
//! - [`session::MapSession`] is the owning view: report collection, filter
//!   selection, queued UI events, and ticketed fetches.
//!
//! Drawing goes through the [`MapBackend`] trait so the mapping library is
//! swappable. [`memory::InMemoryMap`] is a backend that just records what
//! it was asked to draw, and [`export`] turns its contents into JSON or
//! `GeoJSON`.

pub mod canvas;
pub mod config;
pub mod export;
pub mod icon;
pub mod layers;
pub mod memory;
pub mod popup;
pub mod render;
pub mod session;

use incident_map_map_models::{HeatLayer, LayerId, Marker, ScaleControl, TileSource};
use incident_map_source_models::LatLng;
use thiserror::Error;

pub use incident_map_map_models::ViewMode;

/// Errors from the mapping backend and map configuration.
#[derive(Debug, Error)]
pub enum MapError {
    /// The view surface went away before signalling readiness.
    #[error("View surface was dropped before it became ready")]
    SurfaceDropped,

    /// The mapping backend rejected an operation.
    #[error("Map backend error: {message}")]
    Backend {
        /// Description of what went wrong.
        message: String,
    },

    /// A map settings TOML document could not be parsed.
    #[error("Invalid map settings: {0}")]
    Config(#[from] toml::de::Error),
}

/// A mapping library bound to one view surface.
///
/// Implementations wrap whatever actually draws tiles and layers. Every
/// layer added returns a [`LayerId`] that is later passed back to
/// [`Self::remove_layer`].
pub trait MapBackend {
    /// Centers the map.
    ///
    /// # Errors
    ///
    /// Returns [`MapError`] if the backend cannot set the view.
    fn set_view(&mut self, center: LatLng, zoom: u8) -> Result<(), MapError>;

    /// Attaches the base tile layer.
    ///
    /// # Errors
    ///
    /// Returns [`MapError`] if the tile layer cannot be attached.
    fn add_tile_layer(&mut self, tiles: &TileSource) -> Result<LayerId, MapError>;

    /// Adds a scale indicator.
    ///
    /// # Errors
    ///
    /// Returns [`MapError`] if the control cannot be added.
    fn add_scale_control(&mut self, scale: ScaleControl) -> Result<(), MapError>;

    /// Places a marker.
    ///
    /// # Errors
    ///
    /// Returns [`MapError`] if the marker cannot be added.
    fn add_marker(&mut self, marker: &Marker) -> Result<LayerId, MapError>;

    /// Adds a density layer.
    ///
    /// # Errors
    ///
    /// Returns [`MapError`] if the layer cannot be added.
    fn add_heat_layer(&mut self, layer: &HeatLayer) -> Result<LayerId, MapError>;

    /// Removes a previously added layer. Unknown ids are ignored.
    fn remove_layer(&mut self, id: LayerId);

    /// Releases the map and everything attached to it.
    fn remove(&mut self);
}
