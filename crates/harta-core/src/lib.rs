use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

mod display;
mod error;
pub mod export;
pub mod filters;
pub mod gazetteer;
pub mod normalize;
pub mod pipeline;

pub use display::{create_building_table, create_listing_table, format_results, ListingTableRow};
pub use error::{HartaError, Result};
pub use filters::{clean_price, is_valid_area, matches, LocationFilter, NEGOTIABLE_NOTICE};
pub use gazetteer::Gazetteer;
pub use normalize::{Extract, FieldNormalizer};
pub use pipeline::{ListingPipeline, PipelineConfig, Rejection};

/// Canonical marker for a scraped field that could not be found.
pub const NOT_AVAILABLE: &str = "N/A";

/// Origin used to absolutize site-relative offer links.
pub const OLX_ORIGIN: &str = "https://www.olx.ro";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub lat: f64,
    pub lng: f64,
}

/// A residential building or development shown on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub name: String,
    pub address: String,
    pub district: String,
    pub city: String,
    pub cartier: String,
    pub web: String,
    pub position: Position,
}

/// Unnormalized field bag scraped from one listing card.
///
/// `fields` keeps absent values as `None` so that "selector matched nothing"
/// and "selector matched an empty node" stay distinguishable until
/// normalization. `items` holds the text of every list item in the card and
/// `links` the href of every anchor, in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCard {
    pub fields: BTreeMap<String, Option<String>>,
    #[serde(default)]
    pub items: Vec<String>,
    #[serde(default)]
    pub links: Vec<String>,
}

impl RawCard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, name: &str, value: impl Into<String>) -> Self {
        self.fields.insert(name.to_string(), Some(value.into()));
        self
    }

    pub fn with_item(mut self, text: impl Into<String>) -> Self {
        self.items.push(text.into());
        self
    }

    pub fn with_link(mut self, href: impl Into<String>) -> Self {
        self.links.push(href.into());
        self
    }

    pub fn set_field(&mut self, name: &str, value: Option<String>) {
        self.fields.insert(name.to_string(), value);
    }

    /// Raw value of a field, `None` when the field is absent or recorded as missing.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(|v| v.as_deref())
    }
}

/// Validated, cleaned record for one real-estate ad.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub price: String,
    pub area: String,
    pub location: String,
    pub url: String,
}

impl Listing {
    /// Cards without a price or a link are unusable and never reach the filters.
    pub fn is_well_formed(&self) -> bool {
        self.price != NOT_AVAILABLE && !self.url.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchKind {
    Sale,
    Rent,
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchKind::Sale => write!(f, "sale"),
            SearchKind::Rent => write!(f, "rent"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Eur,
    Ron,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Eur => "EUR",
            Currency::Ron => "RON",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "eur" | "euro" => Ok(Currency::Eur),
            "ron" | "lei" => Ok(Currency::Ron),
            _ => Err(format!("Invalid currency: {}. Valid options are: EUR, RON", s)),
        }
    }
}

/// Combined answer for one building: both sides are always present, a failed
/// side is empty and its failure is reported in `error`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResults {
    pub sale: Vec<Listing>,
    pub rent: Vec<Listing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub fetched_at: DateTime<Utc>,
}

impl SearchResults {
    pub fn new(sale: Vec<Listing>, rent: Vec<Listing>) -> Self {
        Self {
            sale,
            rent,
            error: None,
            fetched_at: Utc::now(),
        }
    }

    pub fn listings(&self, kind: SearchKind) -> &[Listing] {
        match kind {
            SearchKind::Sale => &self.sale,
            SearchKind::Rent => &self.rent,
        }
    }
}
