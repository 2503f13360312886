//! State name and abbreviation lookup.
//!
//! Maps what a user types on the command line ("va", "Virginia",
//! "new york") to the OCD jurisdiction id used by the data store.

use thiserror::Error;

/// Errors resolving a jurisdiction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum JurisdictionError {
    #[error("unknown state or jurisdiction: {0}")]
    Unknown(String),
}

/// Postal abbreviation and full name for every supported jurisdiction.
const STATES: &[(&str, &str)] = &[
    ("al", "Alabama"),
    ("ak", "Alaska"),
    ("az", "Arizona"),
    ("ar", "Arkansas"),
    ("ca", "California"),
    ("co", "Colorado"),
    ("ct", "Connecticut"),
    ("de", "Delaware"),
    ("dc", "District of Columbia"),
    ("fl", "Florida"),
    ("ga", "Georgia"),
    ("hi", "Hawaii"),
    ("id", "Idaho"),
    ("il", "Illinois"),
    ("in", "Indiana"),
    ("ia", "Iowa"),
    ("ks", "Kansas"),
    ("ky", "Kentucky"),
    ("la", "Louisiana"),
    ("me", "Maine"),
    ("md", "Maryland"),
    ("ma", "Massachusetts"),
    ("mi", "Michigan"),
    ("mn", "Minnesota"),
    ("ms", "Mississippi"),
    ("mo", "Missouri"),
    ("mt", "Montana"),
    ("ne", "Nebraska"),
    ("nv", "Nevada"),
    ("nh", "New Hampshire"),
    ("nj", "New Jersey"),
    ("nm", "New Mexico"),
    ("ny", "New York"),
    ("nc", "North Carolina"),
    ("nd", "North Dakota"),
    ("oh", "Ohio"),
    ("ok", "Oklahoma"),
    ("or", "Oregon"),
    ("pa", "Pennsylvania"),
    ("pr", "Puerto Rico"),
    ("ri", "Rhode Island"),
    ("sc", "South Carolina"),
    ("sd", "South Dakota"),
    ("tn", "Tennessee"),
    ("tx", "Texas"),
    ("ut", "Utah"),
    ("vt", "Vermont"),
    ("va", "Virginia"),
    ("wa", "Washington"),
    ("wv", "West Virginia"),
    ("wi", "Wisconsin"),
    ("wy", "Wyoming"),
];

/// Build the OCD jurisdiction id for a postal abbreviation.
pub fn abbr_to_jid(abbr: &str) -> String {
    let abbr = abbr.to_lowercase();
    match abbr.as_str() {
        "dc" => "ocd-jurisdiction/country:us/district:dc/government".to_string(),
        "pr" => "ocd-jurisdiction/country:us/territory:pr/government".to_string(),
        _ => format!("ocd-jurisdiction/country:us/state:{}/government", abbr),
    }
}

/// Resolve a state abbreviation or full name to its OCD jurisdiction id.
pub fn resolve(state: &str) -> Result<String, JurisdictionError> {
    let needle = state.trim();

    STATES
        .iter()
        .find(|(abbr, name)| abbr.eq_ignore_ascii_case(needle) || name.eq_ignore_ascii_case(needle))
        .map(|(abbr, _)| abbr_to_jid(abbr))
        .ok_or_else(|| JurisdictionError::Unknown(state.to_string()))
}
