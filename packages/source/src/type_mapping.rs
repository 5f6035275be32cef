//! Crime type mapping utilities.
//!
//! Maps free-form crime type strings (as picked or typed in the submission
//! form) to a key in the [`CrimeCategory`] table. The form's list never
//! matched the table exactly ("Robbery", "Drug-related"), so exact keys are
//! tried first and keyword detection second.

use incident_map_crime_models::CrimeCategory;

/// Maps a raw crime type string to a category.
///
/// Case-insensitive. Returns [`CrimeCategory::Other`] when nothing matches,
/// including for empty input.
#[must_use]
pub fn map_crime_type(raw: &str) -> CrimeCategory {
    let lower = raw.trim().to_lowercase();

    if let Some(category) = CrimeCategory::lookup(&lower) {
        return category;
    }

    // Burglary before theft: "break-in" reports often also say "stolen".
    if contains_any(&lower, &["burglary", "break-in", "breaking and entering"]) {
        return CrimeCategory::Burglary;
    }
    if contains_any(
        &lower,
        &[
            "theft",
            "robbery",
            "snatch",
            "stolen",
            "steal",
            "larceny",
            "shoplift",
            "pickpocket",
        ],
    ) {
        return CrimeCategory::Theft;
    }
    if contains_any(&lower, &["assault", "battery", "altercation", "fight"]) {
        return CrimeCategory::Assault;
    }
    if contains_any(&lower, &["vandal", "graffiti", "property damage", "mischief"]) {
        return CrimeCategory::Vandalism;
    }
    if contains_any(&lower, &["drug", "narcotic", "shabu", "marijuana"]) {
        return CrimeCategory::Drug;
    }
    if contains_any(&lower, &["fraud", "scam", "estafa", "forgery"]) {
        return CrimeCategory::Fraud;
    }
    if contains_any(&lower, &["harass", "threat", "stalk", "intimidat"]) {
        return CrimeCategory::Harassment;
    }

    CrimeCategory::Other
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_form_labels() {
        assert_eq!(map_crime_type("Theft"), CrimeCategory::Theft);
        assert_eq!(map_crime_type("Robbery"), CrimeCategory::Theft);
        assert_eq!(map_crime_type("Assault"), CrimeCategory::Assault);
        assert_eq!(map_crime_type("Burglary"), CrimeCategory::Burglary);
        assert_eq!(map_crime_type("Vandalism"), CrimeCategory::Vandalism);
        assert_eq!(map_crime_type("Drug-related"), CrimeCategory::Drug);
        assert_eq!(map_crime_type("Fraud"), CrimeCategory::Fraud);
        assert_eq!(map_crime_type("Other"), CrimeCategory::Other);
    }

    #[test]
    fn exact_keys_pass_through() {
        for category in CrimeCategory::all() {
            assert_eq!(map_crime_type(category.key()), *category);
        }
    }

    #[test]
    fn break_in_is_burglary() {
        assert_eq!(map_crime_type("House break-in, TV stolen"), CrimeCategory::Burglary);
    }

    #[test]
    fn unmatched_and_empty_fall_back_to_other() {
        assert_eq!(map_crime_type("noise complaint"), CrimeCategory::Other);
        assert_eq!(map_crime_type(""), CrimeCategory::Other);
    }
}
