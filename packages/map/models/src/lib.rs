#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Map-facing types: view modes, layers, icons, popups, and tile sources.
//!
//! These describe *what* gets drawn. How it gets drawn is up to whichever
//! mapping backend implements `incident_map_map::MapBackend`.

use incident_map_source_models::{LatLng, ReportId};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// How the visible reports are drawn. Exactly one mode is active.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ViewMode {
    /// One pin per report
    #[default]
    Markers,
    /// A single density layer
    Heatmap,
}

/// Handle to a layer attached to a map backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerId(pub u64);

impl std::fmt::Display for LayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "layer-{}", self.0)
    }
}

/// A pin glyph for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerIcon {
    /// Fill color of the pin body.
    pub color: String,
    /// SVG markup.
    pub svg: String,
    /// `data:image/svg+xml` URL of [`Self::svg`].
    pub url: String,
    /// Width and height in logical units.
    pub size: [u32; 2],
    /// Point of the icon placed on the coordinate, from its top-left.
    pub anchor: [i32; 2],
    /// Where popups open relative to the anchor.
    pub popup_anchor: [i32; 2],
}

/// A colored label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    /// Text shown on the badge.
    pub text: String,
    /// Background color.
    pub background: String,
}

/// Display content for one report's popup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopupContent {
    /// Category label on the category color.
    pub category: Badge,
    /// Location label.
    pub title: String,
    /// Locale-formatted date.
    pub date: String,
    /// Description text.
    pub description: String,
    /// Status label.
    pub status: Badge,
}

/// One marker to place on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
    /// Report this marker represents.
    pub report_id: ReportId,
    /// Category key of that report.
    pub category: String,
    /// Where to place it.
    pub position: LatLng,
    /// Pin glyph.
    pub icon: MarkerIcon,
    /// Popup shown on click.
    pub popup: PopupContent,
}

/// A weighted point in a heat layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatPoint {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
    /// Intensity contributed by this point.
    pub weight: f64,
}

/// One stop of a heat layer color ramp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Normalized intensity in `0.0..=1.0`.
    pub threshold: f64,
    /// Color at this intensity.
    pub color: String,
}

/// Rendering parameters of a heat layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatLayerOptions {
    /// Point radius in pixels.
    pub radius: u32,
    /// Blur in pixels.
    pub blur: u32,
    /// Zoom level at which points reach full intensity.
    pub max_zoom: u8,
    /// Color ramp, ascending by threshold.
    pub gradient: Vec<GradientStop>,
}

impl Default for HeatLayerOptions {
    fn default() -> Self {
        let stop = |threshold, color: &str| GradientStop {
            threshold,
            color: color.to_string(),
        };
        Self {
            radius: 25,
            blur: 15,
            max_zoom: 17,
            gradient: vec![
                stop(0.4, "blue"),
                stop(0.6, "cyan"),
                stop(0.7, "lime"),
                stop(0.8, "yellow"),
                stop(1.0, "red"),
            ],
        }
    }
}

/// A density layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatLayer {
    /// Projected report points.
    pub points: Vec<HeatPoint>,
    /// Rendering parameters.
    pub options: HeatLayerOptions,
}

/// A slippy-map tile provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSource {
    /// URL template with `{s}`, `{z}`, `{x}`, `{y}` placeholders.
    pub url_template: String,
    /// Attribution text shown on the map.
    pub attribution: String,
    /// Highest zoom level the provider serves.
    pub max_zoom: u8,
}

/// Scale indicator options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleControl {
    /// Show metric units.
    pub metric: bool,
    /// Show imperial units.
    pub imperial: bool,
}

impl Default for ScaleControl {
    fn default() -> Self {
        Self {
            metric: true,
            imperial: false,
        }
    }
}

/// Initial view and base layers for a map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapSettings {
    /// Identifier (e.g. `"parian"`).
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Initial center.
    pub center: LatLng,
    /// Initial zoom level.
    pub zoom: u8,
    /// Base tile layer.
    pub tiles: TileSource,
    /// Scale indicator.
    #[serde(default)]
    pub scale: ScaleControl,
}
