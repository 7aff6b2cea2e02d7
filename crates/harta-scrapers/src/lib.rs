pub mod extract;
pub mod olx;

use async_trait::async_trait;
use harta_core::{
    Currency, Gazetteer, HartaError, Listing, ListingPipeline, RawCard, Result, SearchKind,
    SearchResults,
};
use std::sync::Arc;
use tracing::{info, warn};
use url::Url;

pub use extract::{CardExtractor, CardMarkup};
pub use olx::OlxScraper;

/// Enum representing the supported classifieds sites
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScraperType {
    /// olx.ro apartment listings
    Olx,
}

/// One page of a search for a building or development name.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub name: String,
    pub kind: SearchKind,
    pub currency: Currency,
    pub page: u32,
}

impl SearchQuery {
    pub fn new(name: &str, kind: SearchKind, currency: Currency) -> Self {
        Self {
            name: name.to_string(),
            kind,
            currency,
            page: 1,
        }
    }

    pub fn next_page(&mut self) {
        self.page += 1;
    }

    /// `<origin>/imobiliare/<category>/q-<name>/?currency=<code>&page=<n>`, with
    /// the name percent-encoded as a single path segment.
    pub fn url(&self, origin: &Url, category: &str) -> Result<Url> {
        let mut url = origin.clone();
        url.path_segments_mut()
            .map_err(|_| HartaError::ScrapeFailure(format!("{} cannot be a base URL", origin)))?
            .clear()
            .push("imobiliare")
            .push(category)
            .push(&format!("q-{}", self.name.trim()))
            .push("");
        url.query_pairs_mut()
            .clear()
            .append_pair("currency", self.currency.code())
            .append_pair("page", &self.page.to_string());
        Ok(url)
    }
}

/// Per-search settings for [`search_building`].
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    pub max_pages: u32,
    pub sale_currency: Currency,
    pub rent_currency: Currency,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_pages: 2,
            sale_currency: Currency::Eur,
            rent_currency: Currency::Eur,
        }
    }
}

/// Trait for translating a search kind to the site's category path
pub trait SearchKindTranslator {
    fn search_kind_to_str(&self, kind: &SearchKind) -> &'static str;
}

/// A site that yields one batch of raw cards per fetched result page.
#[async_trait]
pub trait CardSource: Send + Sync + SearchKindTranslator {
    fn source_name(&self) -> &'static str;

    /// Fetch and extract a single result page.
    async fn fetch_page(&self, query: &SearchQuery) -> Result<Vec<RawCard>>;

    /// Fetch pages `query.page ..` sequentially, at most `max_pages` of them.
    ///
    /// Stops after the first failed page; that failure is the last element.
    async fn fetch_pages(&self, mut query: SearchQuery, max_pages: u32) -> Vec<Result<Vec<RawCard>>> {
        let mut pages = Vec::new();

        for _ in 0..max_pages {
            let page = self.fetch_page(&query).await;
            let failed = page.is_err();
            pages.push(page);
            if failed {
                break;
            }
            query.next_page();
        }

        pages
    }
}

/// Factory for creating card sources
pub struct ScraperFactory;

impl ScraperFactory {
    pub fn create_scraper(scraper_type: ScraperType) -> Result<Arc<dyn CardSource>> {
        match scraper_type {
            ScraperType::Olx => Ok(Arc::new(OlxScraper::new()?)),
        }
    }
}

/// Fetch the pages of one search and run them through the pipeline.
pub async fn search_listings(
    source: &dyn CardSource,
    pipeline: &ListingPipeline,
    gazetteer: &Gazetteer,
    query: SearchQuery,
    max_pages: u32,
) -> Result<Vec<Listing>> {
    let pages = source.fetch_pages(query, max_pages).await;
    pipeline.run(pages, gazetteer)
}

/// Sale and rent searches for one building, run concurrently.
///
/// A failed side comes back empty and its error is reported in
/// [`SearchResults::error`]; the other side is unaffected.
pub async fn search_building(
    source: &dyn CardSource,
    pipeline: &ListingPipeline,
    gazetteer: &Gazetteer,
    name: &str,
    config: &SearchConfig,
) -> SearchResults {
    info!("Searching {} for {:?}", source.source_name(), name);

    let sale = search_listings(
        source,
        pipeline,
        gazetteer,
        SearchQuery::new(name, SearchKind::Sale, config.sale_currency),
        config.max_pages,
    );
    let rent = search_listings(
        source,
        pipeline,
        gazetteer,
        SearchQuery::new(name, SearchKind::Rent, config.rent_currency),
        config.max_pages,
    );
    let (sale, rent) = futures::join!(sale, rent);

    let mut errors = Vec::new();
    let mut settle = |kind: SearchKind, outcome: Result<Vec<Listing>>| match outcome {
        Ok(listings) => {
            info!("Found {} {} listings", listings.len(), kind);
            listings
        }
        Err(e) => {
            warn!("{} search for {:?} failed: {}", kind, name, e);
            errors.push(format!("{}: {}", kind, e));
            Vec::new()
        }
    };
    let sale = settle(SearchKind::Sale, sale);
    let rent = settle(SearchKind::Rent, rent);

    let mut results = SearchResults::new(sale, rent);
    if !errors.is_empty() {
        results.error = Some(errors.join("; "));
    }
    results
}
