use crate::fixtures::{card, gazetteer, page, FakeSource};
use harta_core::{Currency, HartaError, ListingPipeline, LocationFilter, PipelineConfig, SearchKind};
use harta_scrapers::{search_building, search_listings, CardSource, SearchConfig, SearchQuery};

fn pipeline() -> ListingPipeline {
    ListingPipeline::new(PipelineConfig {
        location_filter: LocationFilter::Bidirectional,
        ..PipelineConfig::default()
    })
}

fn config(max_pages: u32) -> SearchConfig {
    SearchConfig {
        max_pages,
        ..SearchConfig::default()
    }
}

#[tokio::test]
async fn test_search_building_returns_both_sides() {
    let source = FakeSource::new()
        .with_page(
            SearchKind::Sale,
            1,
            page(&[card("95 000 €", &["62 m²"], "Bucuresti, Sectorul 6", "/d/oferta/sale-1")]),
        )
        .with_page(
            SearchKind::Sale,
            2,
            page(&[card("95 000 €", &["62 m²"], "Bucuresti, Sectorul 6", "/d/oferta/sale-1")]),
        )
        .with_page(
            SearchKind::Rent,
            1,
            page(&[card("450 € Prețul e negociabil", &["48 m²"], "Chiajna", "/d/oferta/rent-1")]),
        );

    let results = search_building(&source, &pipeline(), &gazetteer(), "Rotar Park", &config(2)).await;

    assert!(results.error.is_none());
    assert_eq!(results.sale.len(), 2);
    assert_eq!(results.sale[0], results.sale[1]);
    assert_eq!(results.rent.len(), 1);
    assert_eq!(results.rent[0].price, "450 €");
    assert_eq!(source.fetches(), 4);
}

#[tokio::test]
async fn test_failed_side_degrades_to_empty() {
    let source = FakeSource::new()
        .with_page(
            SearchKind::Sale,
            1,
            page(&[card("95 000 €", &["62 m²"], "Bucuresti", "/d/oferta/sale-1")]),
        )
        .with_failure(SearchKind::Rent, 1, "selector timeout");

    let results = search_building(&source, &pipeline(), &gazetteer(), "Rotar Park", &config(1)).await;

    assert_eq!(results.sale.len(), 1);
    assert!(results.rent.is_empty());
    let error = results.error.unwrap();
    assert!(error.starts_with("rent:"));
    assert!(error.contains("selector timeout"));
}

#[tokio::test]
async fn test_late_page_failure_discards_earlier_pages() {
    let source = FakeSource::new()
        .with_page(
            SearchKind::Sale,
            1,
            page(&[card("95 000 €", &["62 m²"], "Bucuresti", "/d/oferta/sale-1")]),
        )
        .with_failure(SearchKind::Sale, 2, "connection reset");

    let query = SearchQuery::new("Rotar Park", SearchKind::Sale, Currency::Eur);
    let err = search_listings(&source, &pipeline(), &gazetteer(), query, 3)
        .await
        .unwrap_err();

    assert!(matches!(err, HartaError::ScrapeFailure(msg) if msg == "connection reset"));
    // page 3 is never requested once page 2 failed
    assert_eq!(source.fetches(), 2);
}

#[tokio::test]
async fn test_fetch_pages_is_sequential_from_query_page() {
    let source = FakeSource::new();
    let mut query = SearchQuery::new("Rotar Park", SearchKind::Rent, Currency::Ron);
    query.next_page();

    let pages = source.fetch_pages(query, 3).await;
    assert_eq!(pages.len(), 3);
    assert!(pages.iter().all(|p| matches!(p, Ok(cards) if cards.is_empty())));
}

#[tokio::test]
async fn test_no_pages_is_empty_result() {
    let source = FakeSource::new();

    let results = search_building(&source, &pipeline(), &gazetteer(), "Rotar Park", &config(0)).await;

    assert!(results.sale.is_empty());
    assert!(results.rent.is_empty());
    assert!(results.error.is_none());
    assert_eq!(source.fetches(), 0);
}
