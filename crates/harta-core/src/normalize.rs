use crate::{Listing, RawCard, NOT_AVAILABLE, OLX_ORIGIN};
use tracing::debug;
use url::Url;

/// Field names written by card extractors.
pub mod keys {
    pub const PRICE: &str = "price";
    pub const PRICE_LEGACY: &str = "price.legacy";
    pub const AREA: &str = "area";
    pub const LOCATION: &str = "location";
    pub const LOCATION_LEGACY: &str = "location.legacy";
    pub const URL: &str = "url";
}

/// Unit marker that identifies the surface list item of a card.
pub const AREA_MARKER: &str = "m²";

/// Path fragment shared by every OLX ad link.
pub const OFFER_PATH: &str = "/d/oferta/";

/// One way of pulling a value out of a card. Chains of these are tried in
/// order and the first non-empty result wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extract {
    /// A named field, trimmed, skipped when absent or blank.
    Field(String),
    /// The first list item whose text contains the marker.
    ItemContaining(String),
    /// The first anchor href containing the pattern.
    LinkContaining(String),
}

impl Extract {
    pub fn field(name: &str) -> Self {
        Extract::Field(name.to_string())
    }

    pub fn item_containing(marker: &str) -> Self {
        Extract::ItemContaining(marker.to_string())
    }

    pub fn link_containing(pattern: &str) -> Self {
        Extract::LinkContaining(pattern.to_string())
    }

    pub fn apply<'a>(&self, card: &'a RawCard) -> Option<&'a str> {
        match self {
            Extract::Field(name) => card.field(name).map(str::trim).filter(|v| !v.is_empty()),
            Extract::ItemContaining(marker) => card
                .items
                .iter()
                .map(|item| item.trim())
                .find(|item| item.contains(marker.as_str())),
            Extract::LinkContaining(pattern) => card
                .links
                .iter()
                .map(|href| href.trim())
                .find(|href| href.contains(pattern.as_str())),
        }
    }
}

fn first_match<'a>(chain: &[Extract], card: &'a RawCard) -> Option<&'a str> {
    chain.iter().find_map(|extract| extract.apply(card))
}

fn text_or_sentinel(chain: &[Extract], card: &RawCard) -> String {
    first_match(chain, card).unwrap_or(NOT_AVAILABLE).to_string()
}

/// Turns a [`RawCard`] into a [`Listing`] with sentinel values for missing fields.
#[derive(Debug, Clone)]
pub struct FieldNormalizer {
    pub price: Vec<Extract>,
    pub area: Vec<Extract>,
    pub location: Vec<Extract>,
    pub url: Vec<Extract>,
    origin: Url,
}

impl FieldNormalizer {
    /// Chains for the current OLX card markup and its legacy class-based variant.
    pub fn olx() -> Self {
        Self {
            price: vec![Extract::field(keys::PRICE), Extract::field(keys::PRICE_LEGACY)],
            area: vec![Extract::item_containing(AREA_MARKER), Extract::field(keys::AREA)],
            location: vec![
                Extract::field(keys::LOCATION),
                Extract::field(keys::LOCATION_LEGACY),
            ],
            url: vec![Extract::link_containing(OFFER_PATH), Extract::field(keys::URL)],
            origin: default_origin(),
        }
    }

    pub fn with_origin(mut self, origin: Url) -> Self {
        self.origin = origin;
        self
    }

    pub fn normalize(&self, card: &RawCard) -> Listing {
        Listing {
            price: text_or_sentinel(&self.price, card),
            area: text_or_sentinel(&self.area, card),
            location: text_or_sentinel(&self.location, card),
            url: first_match(&self.url, card)
                .map(|href| self.absolutize(href))
                .unwrap_or_default(),
        }
    }

    /// Site-relative links get the origin prepended as text; anything that is
    /// still not an absolute URL afterwards becomes empty. Links are never
    /// re-serialized.
    fn absolutize(&self, href: &str) -> String {
        let absolute = if href.starts_with('/') {
            format!("{}{}", self.origin.as_str().trim_end_matches('/'), href)
        } else {
            href.to_string()
        };

        match Url::parse(&absolute) {
            Ok(_) => absolute,
            Err(e) => {
                debug!("Dropping unusable link {:?}: {}", href, e);
                String::new()
            }
        }
    }
}

impl Default for FieldNormalizer {
    fn default() -> Self {
        Self::olx()
    }
}

pub(crate) fn default_origin() -> Url {
    Url::parse(OLX_ORIGIN).expect("OLX origin is a valid URL")
}
