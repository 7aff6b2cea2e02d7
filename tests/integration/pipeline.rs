use crate::fixtures::{card, gazetteer, page};
use harta_core::{ListingPipeline, LocationFilter, PipelineConfig};
use harta_scrapers::{CardExtractor, CardMarkup};

fn pipeline(location_filter: LocationFilter) -> ListingPipeline {
    ListingPipeline::new(PipelineConfig {
        location_filter,
        ..PipelineConfig::default()
    })
}

#[test]
fn test_sample_gazetteer_loads() {
    let gazetteer = gazetteer();
    assert_eq!(gazetteer.buildings().len(), 6);
    assert!(gazetteer.terms().any(|term| term == "bucuresti"));
    assert!(gazetteer.find_building("rotar park").is_some());
}

#[test]
fn test_pipeline_over_extracted_page() {
    let html = page(&[
        card(
            "1.200 €Prețul e negociabil",
            &["Decomandat", "55 m²"],
            "Bucuresti, Sectorul 6 - Reactualizat azi",
            "/d/oferta/apartament-militari-IDa.html",
        ),
        // wrong unit
        card("900 €", &["600 mp"], "Bucuresti, Sectorul 6", "/d/oferta/IDb.html"),
        // unknown location
        card("450 €", &["38 m²"], "Otopeni - 12 mai 2024", "/d/oferta/IDc.html"),
        // no offer link
        card("450 €", &["38 m²"], "Bucuresti", "/favorite"),
    ]);

    let cards = CardMarkup::olx().unwrap().extract(&html);
    assert_eq!(cards.len(), 4);

    let listings = pipeline(LocationFilter::Bidirectional).run_batches(&[cards], &gazetteer());
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].price, "1.200 €");
    assert_eq!(listings[0].area, "55 m²");
    assert_eq!(listings[0].location, "Bucuresti, Sectorul 6 - Reactualizat azi");
    assert_eq!(listings[0].url, "https://www.olx.ro/d/oferta/apartament-militari-IDa.html");
}

#[test]
fn test_disabled_location_filter_keeps_every_valid_card() {
    let html = page(&[
        card("450 €", &["38 m²"], "Otopeni - 12 mai 2024", "/d/oferta/IDc.html"),
        card("500 €", &["40m²"], "Bucuresti", "/d/oferta/IDd.html"),
    ]);
    let cards = CardMarkup::olx().unwrap().extract(&html);

    let filtered = pipeline(LocationFilter::Bidirectional).run_batches(&[cards.clone()], &gazetteer());
    let unfiltered = pipeline(LocationFilter::Off).run_batches(&[cards], &gazetteer());

    assert_eq!(filtered.len(), 1);
    assert_eq!(unfiltered.len(), 2);
}

#[test]
fn test_pages_keep_order_and_duplicates() {
    let first = page(&[
        card("1 €", &["30 m²"], "Bucuresti", "/d/oferta/one"),
        card("2 €", &["31 m²"], "Bucuresti", "/d/oferta/two"),
    ]);
    let second = page(&[
        card("2 €", &["31 m²"], "Bucuresti", "/d/oferta/two"),
        card("3 €", &["32 m²"], "Bucuresti", "/d/oferta/three"),
    ]);
    let markup = CardMarkup::olx().unwrap();

    let listings = pipeline(LocationFilter::Contains)
        .run_batches(&[markup.extract(&first), markup.extract(&second)], &gazetteer());
    let prices: Vec<&str> = listings.iter().map(|l| l.price.as_str()).collect();

    assert_eq!(prices, vec!["1 €", "2 €", "2 €", "3 €"]);
}
