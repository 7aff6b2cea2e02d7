use crate::extract::{CardExtractor, CardMarkup};
use crate::{CardSource, SearchKindTranslator, SearchQuery};
use async_trait::async_trait;
use harta_core::{HartaError, RawCard, Result, SearchKind, OLX_ORIGIN};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Card source for olx.ro result pages.
pub struct OlxScraper {
    client: Client,
    origin: Url,
    extractor: Box<dyn CardExtractor>,
}

impl OlxScraper {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(20))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            origin: Url::parse(OLX_ORIGIN)?,
            extractor: Box::new(CardMarkup::olx()?),
        })
    }

    /// Swap the card markup, e.g. when the site ships a new layout.
    pub fn with_extractor(mut self, extractor: impl CardExtractor + 'static) -> Self {
        self.extractor = Box::new(extractor);
        self
    }

    pub fn with_origin(mut self, origin: Url) -> Self {
        self.origin = origin;
        self
    }

    async fn fetch_html(&self, url: &Url) -> Result<String> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| HartaError::ScrapeFailure(format!("{}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            warn!("OLX returned status {} for {}", status, url);
            return Err(HartaError::ScrapeFailure(format!("{} returned {}", url, status)));
        }

        response
            .text()
            .await
            .map_err(|e| HartaError::ScrapeFailure(format!("{}: {}", url, e)))
    }
}

impl SearchKindTranslator for OlxScraper {
    fn search_kind_to_str(&self, kind: &SearchKind) -> &'static str {
        match kind {
            SearchKind::Sale => "apartamente-garsoniere-de-vanzare",
            SearchKind::Rent => "apartamente-garsoniere-de-inchiriat",
        }
    }
}

#[async_trait]
impl CardSource for OlxScraper {
    fn source_name(&self) -> &'static str {
        "OLX"
    }

    async fn fetch_page(&self, query: &SearchQuery) -> Result<Vec<RawCard>> {
        let url = query.url(&self.origin, self.search_kind_to_str(&query.kind))?;
        info!("Scraping {} page {}: {}", query.kind, query.page, url);

        let html = self.fetch_html(&url).await?;
        debug!("Downloaded {} bytes of HTML", html.len());

        let cards = self.extractor.extract(&html);
        if cards.is_empty() {
            info!("No listing cards on page {} for {:?}", query.page, query.name);
        }
        Ok(cards)
    }
}
