use crate::fixtures::{card, gazetteer, page, FakeSource};
use harta_core::export::export_csv;
use harta_core::{ListingPipeline, LocationFilter, PipelineConfig, SearchKind};
use harta_scrapers::{search_building, SearchConfig};
use std::fs;
use tempfile::tempdir;

#[tokio::test]
async fn test_export_to_csv() {
    let temp_dir = tempdir().unwrap();
    let export_path = temp_dir.path().join("listings.csv");

    let source = FakeSource::new()
        .with_page(
            SearchKind::Sale,
            1,
            page(&[
                card("120 000 €", &["70 m²"], "Bucuresti, Sectorul 1", "/d/oferta/a"),
                card("99 000 €", &["5 m²"], "Bucuresti, Sectorul 1", "/d/oferta/tiny"),
            ]),
        )
        .with_page(
            SearchKind::Rent,
            1,
            page(&[card("2 500 lei", &["48m²"], "Voluntari", "/d/oferta/b")]),
        );
    let pipeline = ListingPipeline::new(PipelineConfig {
        location_filter: LocationFilter::Contains,
        ..PipelineConfig::default()
    });
    let config = SearchConfig {
        max_pages: 1,
        ..SearchConfig::default()
    };

    let results = search_building(&source, &pipeline, &gazetteer(), "Greenfield Baneasa", &config).await;
    let rows = export_csv(&export_path, &results).unwrap();
    assert_eq!(rows, 2);

    let content = fs::read_to_string(&export_path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "Kind,Price,Area,Location,URL");
    assert!(lines[1].starts_with("sale,120 000 €,70 m²"));
    assert!(lines[1].ends_with("https://www.olx.ro/d/oferta/a"));
    assert!(lines[2].starts_with("rent,2 500 lei,48m²,Voluntari"));
}
