//! Category pin glyphs.

use incident_map_crime_models::resolve;
use incident_map_map_models::MarkerIcon;

/// Pin width in logical units.
pub const ICON_WIDTH: u32 = 28;

/// Pin height in logical units.
pub const ICON_HEIGHT: u32 = 40;

/// Icon point placed on the report coordinate: the bottom tip of the pin.
pub const ICON_ANCHOR: [i32; 2] = [14, 40];

/// Popup offset from the anchor: just above the top of the pin.
pub const POPUP_ANCHOR: [i32; 2] = [0, -40];

const SVG_URL_PREFIX: &str = "data:image/svg+xml;utf8,";

/// Builds the pin glyph for a category key.
///
/// The pin is a teardrop with a white circular center, filled with the
/// category color (the default color for unknown keys) and anchored at its
/// bottom tip so it points at the report's coordinate.
#[must_use]
pub fn icon_for(category_key: &str) -> MarkerIcon {
    let color = resolve(category_key).color;
    let svg = pin_svg(color);
    let url = format!("{SVG_URL_PREFIX}{}", urlencoding::encode(&svg));

    MarkerIcon {
        color: color.to_string(),
        svg,
        url,
        size: [ICON_WIDTH, ICON_HEIGHT],
        anchor: ICON_ANCHOR,
        popup_anchor: POPUP_ANCHOR,
    }
}

fn pin_svg(color: &str) -> String {
    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{ICON_WIDTH}" height="{ICON_HEIGHT}" viewBox="0 0 24 24"><path fill="{color}" stroke="#000" stroke-width="1.6" stroke-linejoin="round" d="M12 2C8.13 2 5 5.13 5 9c0 5.25 7 13 7 13s7-7.75 7-13c0-3.87-3.13-7-7-7z"/><circle cx="12" cy="9.2" r="2.2" fill="#fff" stroke="#000" stroke-width="1"/></svg>"##
    )
}
