use crate::filters::{clean_price, is_valid_area, LocationFilter};
use crate::gazetteer::Gazetteer;
use crate::normalize::{default_origin, FieldNormalizer};
use crate::{HartaError, Listing, RawCard, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};
use url::Url;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub location_filter: LocationFilter,
    #[serde(default = "default_origin")]
    pub site_origin: Url,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            location_filter: LocationFilter::default(),
            site_origin: default_origin(),
        }
    }
}

/// Why a card did not make it into the output. None of these are errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    MalformedCard,
    InvalidArea,
    LocationMismatch,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::MalformedCard => write!(f, "malformed card"),
            Rejection::InvalidArea => write!(f, "invalid area"),
            Rejection::LocationMismatch => write!(f, "location mismatch"),
        }
    }
}

/// Normalize, clean and filter the cards of one search.
///
/// Stateless between calls; one pipeline can serve the sale and rent
/// searches at the same time.
#[derive(Debug, Clone, Default)]
pub struct ListingPipeline {
    normalizer: FieldNormalizer,
    location_filter: LocationFilter,
}

impl ListingPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            normalizer: FieldNormalizer::olx().with_origin(config.site_origin),
            location_filter: config.location_filter,
        }
    }

    pub fn with_normalizer(mut self, normalizer: FieldNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Run over page batches in page order.
    ///
    /// A failed batch fails the whole run with [`HartaError::ScrapeFailure`];
    /// rows from pages before it are discarded. Duplicate listings across pages
    /// are kept.
    pub fn run<I>(&self, pages: I, gazetteer: &Gazetteer) -> Result<Vec<Listing>>
    where
        I: IntoIterator<Item = Result<Vec<RawCard>>>,
    {
        let mut normalized = Vec::new();
        for (index, page) in pages.into_iter().enumerate() {
            let cards = page.map_err(|e| match e {
                HartaError::ScrapeFailure(msg) => HartaError::ScrapeFailure(msg),
                other => HartaError::ScrapeFailure(format!("page {}: {}", index + 1, other)),
            })?;
            debug!("Page {}: {} cards", index + 1, cards.len());
            normalized.extend(cards.iter().map(|card| self.normalizer.normalize(card)));
        }

        Ok(self.filter(normalized, gazetteer))
    }

    /// Same as [`run`](Self::run) for batches that are already in hand.
    pub fn run_batches(&self, batches: &[Vec<RawCard>], gazetteer: &Gazetteer) -> Vec<Listing> {
        let normalized = batches
            .iter()
            .flatten()
            .map(|card| self.normalizer.normalize(card))
            .collect();
        self.filter(normalized, gazetteer)
    }

    /// Area is checked before location so an unusable listing never pays for the
    /// gazetteer scan.
    pub fn check(&self, listing: &Listing, gazetteer: &Gazetteer) -> std::result::Result<(), Rejection> {
        if !listing.is_well_formed() {
            return Err(Rejection::MalformedCard);
        }
        if !is_valid_area(&listing.area) {
            return Err(Rejection::InvalidArea);
        }
        if !self.location_filter.accepts(&listing.location, gazetteer) {
            return Err(Rejection::LocationMismatch);
        }
        Ok(())
    }

    fn filter(&self, normalized: Vec<Listing>, gazetteer: &Gazetteer) -> Vec<Listing> {
        let total = normalized.len();
        let listings: Vec<Listing> = normalized
            .into_iter()
            .filter(|listing| listing.is_well_formed())
            .map(|listing| Listing {
                price: clean_price(&listing.price),
                ..listing
            })
            .filter(|listing| match self.check(listing, gazetteer) {
                Ok(()) => true,
                Err(reason) => {
                    debug!("Rejected {} ({}): {}", listing.url, listing.area, reason);
                    false
                }
            })
            .collect();

        info!(
            "Kept {} of {} listings (location filter: {})",
            listings.len(),
            total,
            self.location_filter
        );
        listings
    }
}
