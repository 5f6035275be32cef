#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Crime category table.
//!
//! This crate defines the closed set of crime categories that incident
//! reports are classified into, along with the display label and map color
//! used for each one. Category keys arriving on reports are plain strings;
//! keys that do not resolve against this table fall back to the "Other"
//! label and color rather than being rejected.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Color used for any category key that is not in the table.
pub const DEFAULT_COLOR: &str = "#6b7280";

/// Label used for any category key that is not in the table.
pub const DEFAULT_LABEL: &str = "Other";

/// A crime category from the static category table.
///
/// The string form of each variant (via [`Display`], [`AsRefStr`], and
/// [`EnumString`]) is the stable key carried on incident reports.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CrimeCategory {
    /// Theft, snatching, break-ins
    Theft,
    /// Physical altercations
    Assault,
    /// Unlawful entry
    Burglary,
    /// Graffiti, property damage
    Vandalism,
    /// Drug activity
    Drug,
    /// Scams and fraud
    Fraud,
    /// Harassment and threats
    Harassment,
    /// Anything else
    Other,
}

impl CrimeCategory {
    /// Resolves a report's category key against the table.
    ///
    /// Matching is exact: `"Theft"` does not resolve, `"theft"` does.
    #[must_use]
    pub fn lookup(key: &str) -> Option<Self> {
        key.parse().ok()
    }

    /// Returns the stable key for this category.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Theft => "theft",
            Self::Assault => "assault",
            Self::Burglary => "burglary",
            Self::Vandalism => "vandalism",
            Self::Drug => "drug",
            Self::Fraud => "fraud",
            Self::Harassment => "harassment",
            Self::Other => "other",
        }
    }

    /// Returns the human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Theft => "Theft",
            Self::Assault => "Assault",
            Self::Burglary => "Burglary",
            Self::Vandalism => "Vandalism",
            Self::Drug => "Drug",
            Self::Fraud => "Fraud",
            Self::Harassment => "Harassment",
            Self::Other => DEFAULT_LABEL,
        }
    }

    /// Returns the hex color used for icons and chart series.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Theft => "#ef4444",
            Self::Assault => "#f59e0b",
            Self::Burglary => "#d97706",
            Self::Vandalism => "#7c3aed",
            Self::Drug => "#ec4899",
            Self::Fraud => "#8b5cf6",
            Self::Harassment => "#06b6d4",
            Self::Other => DEFAULT_COLOR,
        }
    }

    /// Returns all variants of this enum, in table order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Theft,
            Self::Assault,
            Self::Burglary,
            Self::Vandalism,
            Self::Drug,
            Self::Fraud,
            Self::Harassment,
            Self::Other,
        ]
    }
}

/// Label and color for a category key, after fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryStyle {
    /// Display label.
    pub label: &'static str,
    /// Hex color.
    pub color: &'static str,
}

impl Default for CategoryStyle {
    fn default() -> Self {
        Self {
            label: DEFAULT_LABEL,
            color: DEFAULT_COLOR,
        }
    }
}

impl From<CrimeCategory> for CategoryStyle {
    fn from(category: CrimeCategory) -> Self {
        Self {
            label: category.label(),
            color: category.color(),
        }
    }
}

/// Resolves the label and color for any category key.
///
/// Never fails: unknown keys get [`DEFAULT_LABEL`] and [`DEFAULT_COLOR`].
#[must_use]
pub fn resolve(key: &str) -> CategoryStyle {
    CrimeCategory::lookup(key).map_or_else(CategoryStyle::default, CategoryStyle::from)
}

/// One row of the category table, as exposed to filter and chart UIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDefinition {
    /// Stable key (e.g. `"theft"`).
    pub key: String,
    /// Human-readable label.
    pub label: String,
    /// Hex color.
    pub color: String,
}

impl From<CrimeCategory> for CategoryDefinition {
    fn from(category: CrimeCategory) -> Self {
        Self {
            key: category.key().to_string(),
            label: category.label().to_string(),
            color: category.color().to_string(),
        }
    }
}

/// Returns the whole category table in display order.
#[must_use]
pub fn table() -> Vec<CategoryDefinition> {
    CrimeCategory::all()
        .iter()
        .copied()
        .map(CategoryDefinition::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_matches_string_form() {
        for category in CrimeCategory::all() {
            assert_eq!(category.key(), category.as_ref());
            assert_eq!(CrimeCategory::lookup(category.key()), Some(*category));
        }
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!(CrimeCategory::lookup("theft"), Some(CrimeCategory::Theft));
        assert_eq!(CrimeCategory::lookup("Theft"), None);
    }

    #[test]
    fn unknown_key_resolves_to_default() {
        let style = resolve("arson");
        assert_eq!(style.label, "Other");
        assert_eq!(style.color, DEFAULT_COLOR);
    }

    #[test]
    fn known_key_resolves_to_table_entry() {
        let style = resolve("vandalism");
        assert_eq!(style.label, "Vandalism");
        assert_eq!(style.color, "#7c3aed");
    }

    #[test]
    fn other_matches_fallback() {
        assert_eq!(resolve("other"), CategoryStyle::default());
    }

    #[test]
    fn table_has_every_category_once() {
        let table = table();
        assert_eq!(table.len(), CrimeCategory::all().len());
        let mut keys: Vec<_> = table.iter().map(|c| c.key.as_str()).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), table.len());
    }
}
