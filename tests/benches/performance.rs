use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use harta_core::normalize::keys;
use harta_core::{Gazetteer, ListingPipeline, LocationFilter, PipelineConfig, RawCard};
use rand::seq::SliceRandom;
use rand::Rng;
use std::time::Duration;

const LOCATIONS: [&str; 5] = [
    "Bucuresti, Sectorul 6 - Reactualizat azi",
    "Chiajna - 12 mai 2024",
    "Otopeni - Ieri la 18:30",
    "Voluntari",
    "Sector 2",
];

const AREAS: [&str; 5] = ["55 m²", "120m²", "5 m²", "600 mp", "12345 m²"];

// Helper function to generate cards with a realistic mix of good and bad ones
fn generate_cards(count: usize) -> Vec<RawCard> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|i| {
            let mut card = RawCard::new()
                .with_field(
                    keys::PRICE,
                    format!("{} € Prețul e negociabil", rng.gen_range(300..250_000)),
                )
                .with_field(keys::LOCATION, *LOCATIONS.choose(&mut rng).unwrap())
                .with_item("Decomandat")
                .with_item(*AREAS.choose(&mut rng).unwrap());
            if i % 10 != 0 {
                card = card.with_link(format!("/d/oferta/apartament-ID{}.html", i));
            }
            card
        })
        .collect()
}

fn gazetteer() -> Gazetteer {
    Gazetteer::from_terms(["bucuresti", "sector 6", "ilfov", "chiajna", "voluntari", "sector 1"])
}

fn bench_pipeline(c: &mut Criterion) {
    let gazetteer = gazetteer();

    let mut group = c.benchmark_group("pipeline");
    group.sample_size(20);
    group.measurement_time(Duration::from_secs(5));

    for filter in [LocationFilter::Off, LocationFilter::Contains, LocationFilter::Bidirectional] {
        let pipeline = ListingPipeline::new(PipelineConfig {
            location_filter: filter,
            ..PipelineConfig::default()
        });

        for size in [40, 400, 4000].iter() {
            // one batch per 40-card result page
            let batches: Vec<Vec<RawCard>> = generate_cards(*size)
                .chunks(40)
                .map(|chunk| chunk.to_vec())
                .collect();

            group.bench_with_input(
                BenchmarkId::new(filter.to_string(), size),
                &batches,
                |b, batches| b.iter(|| black_box(pipeline.run_batches(batches, &gazetteer))),
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
