use harta_core::normalize::keys;
use harta_core::{HartaError, RawCard, Result};
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

/// Turns one fetched result page into raw cards, one per listing.
///
/// Implementations own the site-specific selectors so markup changes stay
/// out of the normalization and filtering code.
pub trait CardExtractor: Send + Sync {
    fn extract(&self, html: &str) -> Vec<RawCard>;
}

/// Selector set describing a listing card.
#[derive(Debug, Clone)]
pub struct CardMarkup {
    card: Selector,
    fields: Vec<(String, Selector)>,
    item: Selector,
    link: Selector,
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| HartaError::Selector(format!("{}: {}", selector, e)))
}

impl CardMarkup {
    pub fn new(card: &str, item: &str, link: &str) -> Result<Self> {
        Ok(Self {
            card: parse_selector(card)?,
            fields: Vec::new(),
            item: parse_selector(item)?,
            link: parse_selector(link)?,
        })
    }

    /// Record the text of the first element matching `selector` under `name`.
    pub fn with_field(mut self, name: &str, selector: &str) -> Result<Self> {
        self.fields.push((name.to_string(), parse_selector(selector)?));
        Ok(self)
    }

    /// Current OLX result cards, plus the class-based markup older pages still serve.
    pub fn olx() -> Result<Self> {
        Self::new("div[data-cy='l-card']", "li", "a[href]")?
            .with_field(keys::PRICE, "[data-testid='ad-price']")?
            .with_field(keys::PRICE_LEGACY, ".css-6j1qjp")?
            .with_field(keys::LOCATION, "[data-testid='location-date']")?
            .with_field(keys::LOCATION_LEGACY, ".css-1a4brun")
    }

    pub fn extract_card(&self, element: ElementRef) -> RawCard {
        let mut card = RawCard::new();

        for (name, selector) in &self.fields {
            let value = element
                .select(selector)
                .next()
                .map(|el| el.text().collect::<String>().trim().to_string());
            card.set_field(name, value);
        }

        card.items = element
            .select(&self.item)
            .map(|li| li.text().collect::<String>().trim().to_string())
            .collect();

        card.links = element
            .select(&self.link)
            .filter_map(|a| a.value().attr("href"))
            .map(str::to_string)
            .collect();

        card
    }
}

impl CardExtractor for CardMarkup {
    fn extract(&self, html: &str) -> Vec<RawCard> {
        let document = Html::parse_document(html);
        let cards: Vec<RawCard> = document
            .select(&self.card)
            .map(|element| self.extract_card(element))
            .collect();

        debug!("Extracted {} cards from {} bytes of HTML", cards.len(), html.len());
        cards
    }
}
