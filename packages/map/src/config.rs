//! Compile-time registry of map settings.
//!
//! Each map (initial center, zoom, tile provider, scale indicator) is
//! defined in a TOML file under `config/`. The registry embeds these at
//! compile time; [`parse_settings`] loads the same format at runtime.

use incident_map_map_models::MapSettings;

use crate::MapError;

/// Id of the map used when none is requested.
pub const DEFAULT_MAP_ID: &str = "parian";

const MAP_TOMLS: &[(&str, &str)] = &[("parian", include_str!("../config/parian.toml"))];

#[cfg(test)]
const EXPECTED_MAP_COUNT: usize = 1;

/// Parses a map settings TOML document.
///
/// # Errors
///
/// Returns [`MapError::Config`] if the document is malformed.
pub fn parse_settings(toml_str: &str) -> Result<MapSettings, MapError> {
    Ok(toml::de::from_str(toml_str)?)
}

/// Returns all embedded map settings.
///
/// # Panics
///
/// Panics if any embedded TOML file fails to parse. These are compile-time
/// constants, so a failure is a development error caught by the tests.
#[must_use]
pub fn all_maps() -> Vec<MapSettings> {
    MAP_TOMLS
        .iter()
        .map(|(name, toml_str)| {
            parse_settings(toml_str)
                .unwrap_or_else(|e| panic!("Failed to parse map settings '{name}': {e}"))
        })
        .collect()
}

/// Looks up embedded map settings by id.
#[must_use]
pub fn map_settings(id: &str) -> Option<MapSettings> {
    all_maps().into_iter().find(|m| m.id == id)
}

/// Returns the settings for [`DEFAULT_MAP_ID`].
///
/// # Panics
///
/// Panics if the default map is missing from the registry, which the tests
/// rule out.
#[must_use]
pub fn default_map() -> MapSettings {
    map_settings(DEFAULT_MAP_ID)
        .unwrap_or_else(|| panic!("Default map '{DEFAULT_MAP_ID}' is not registered"))
}
