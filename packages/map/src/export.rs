//! Serializes what an [`InMemoryMap`] holds, for the CLI.

use incident_map_map_models::{HeatLayer, Marker};
use serde_json::Value;

use crate::memory::{InMemoryMap, MapLayer};
use crate::popup;

/// Builds a `GeoJSON` point feature for one marker.
#[must_use]
pub fn marker_feature(marker: &Marker) -> Value {
    serde_json::json!({
        "type": "Feature",
        "geometry": {
            "type": "Point",
            "coordinates": [marker.position.lng, marker.position.lat]
        },
        "properties": {
            "id": marker.report_id,
            "category": marker.category,
            "label": marker.popup.category.text,
            "color": marker.icon.color,
            "title": marker.popup.title,
            "date": marker.popup.date,
            "desc": marker.popup.description,
            "status": marker.popup.status.text,
        }
    })
}

/// Builds a `GeoJSON` point feature for each heat point, weight included.
fn heat_features(layer: &HeatLayer) -> impl Iterator<Item = Value> + '_ {
    layer.points.iter().map(|p| {
        serde_json::json!({
            "type": "Feature",
            "geometry": {
                "type": "Point",
                "coordinates": [p.lng, p.lat]
            },
            "properties": { "weight": p.weight }
        })
    })
}

/// Everything drawn on `map` as a `GeoJSON` `FeatureCollection`.
///
/// Markers and heat points both become point features; tiles are left out.
#[must_use]
pub fn to_geojson(map: &InMemoryMap) -> Value {
    let features: Vec<Value> = map
        .layers()
        .flat_map(|(_, layer)| -> Vec<Value> {
            match layer {
                MapLayer::Marker(m) => vec![marker_feature(m)],
                MapLayer::Heat(h) => heat_features(h).collect(),
                MapLayer::Tiles(_) => vec![],
            }
        })
        .collect();

    serde_json::json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

/// A layer-by-layer dump of `map`, with popup HTML for each marker.
#[must_use]
pub fn layer_dump(map: &InMemoryMap) -> Value {
    let layers: Vec<Value> = map
        .layers()
        .map(|(id, layer)| match layer {
            MapLayer::Tiles(t) => serde_json::json!({
                "id": id.to_string(),
                "kind": "tiles",
                "tiles": t,
            }),
            MapLayer::Marker(m) => serde_json::json!({
                "id": id.to_string(),
                "kind": "marker",
                "marker": m,
                "popupHtml": popup::to_html(&m.popup),
            }),
            MapLayer::Heat(h) => serde_json::json!({
                "id": id.to_string(),
                "kind": "heatmap",
                "heatmap": h,
            }),
        })
        .collect();

    let view = map.view().map(|(center, zoom)| {
        serde_json::json!({
            "center": center,
            "zoom": zoom,
        })
    });

    serde_json::json!({
        "view": view,
        "scale": map.scale(),
        "layers": layers,
    })
}
