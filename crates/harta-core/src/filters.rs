use crate::gazetteer::Gazetteer;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Annotation OLX appends to the price of ads open to negotiation.
pub const NEGOTIABLE_NOTICE: &str = "Prețul e negociabil";

// ASCII digits only; `\d` would also admit other Unicode numerals.
static AREA_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{2,4} ?m²$").expect("Invalid area regex pattern"));

/// Strip the negotiation notice from a price and trim the result.
///
/// The currency stays whatever the search asked for; nothing is parsed.
pub fn clean_price(price: &str) -> String {
    let mut cleaned = price.to_string();
    while cleaned.contains(NEGOTIABLE_NOTICE) {
        cleaned = cleaned.replace(NEGOTIABLE_NOTICE, "");
    }
    cleaned.trim().to_string()
}

/// `true` for "55 m²" or "55m²": two to four digits, optional space, unit, nothing else.
pub fn is_valid_area(area: &str) -> bool {
    AREA_RE.is_match(area)
}

/// Bidirectional containment check between a location and the gazetteer terms.
pub fn matches(location: &str, gazetteer: &Gazetteer) -> bool {
    LocationFilter::Bidirectional.accepts(location, gazetteer)
}

/// How listings are matched against the gazetteer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationFilter {
    /// Keep every listing regardless of location.
    Off,
    /// Location text must contain a gazetteer term.
    Contains,
    /// Location contains a term, or a term contains the location.
    #[default]
    Bidirectional,
}

impl LocationFilter {
    pub fn accepts(&self, location: &str, gazetteer: &Gazetteer) -> bool {
        if *self == LocationFilter::Off {
            return true;
        }

        let location = location.trim().to_lowercase();
        if location.is_empty() {
            return false;
        }

        gazetteer.terms().any(|term| {
            location.contains(term)
                || (*self == LocationFilter::Bidirectional && term.contains(location.as_str()))
        })
    }
}

impl fmt::Display for LocationFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationFilter::Off => write!(f, "off"),
            LocationFilter::Contains => write!(f, "contains"),
            LocationFilter::Bidirectional => write!(f, "bidirectional"),
        }
    }
}

impl FromStr for LocationFilter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "off" | "none" => Ok(LocationFilter::Off),
            "contains" => Ok(LocationFilter::Contains),
            "bidirectional" | "both" => Ok(LocationFilter::Bidirectional),
            _ => Err(format!(
                "Invalid location filter: {}. Valid options are: off, contains, bidirectional",
                s
            )),
        }
    }
}
