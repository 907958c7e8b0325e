//! Catalog enumeration and detail page parsing benchmarks
//!
//! - cold: a fresh catalog document per iteration, script tables parsed every time
//! - warm: one document, script tables parsed once and reused across families

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use court_catalog::application::EnumerationStrategy;
use court_catalog::domain::{CourtDetails, CourtFamily};
use court_catalog::infrastructure::{CatalogDocument, CourtPageParser};

const CATALOG: &str = include_str!("../tests/fixtures/catalog.html");
const COURT_PAGE: &str = include_str!("../tests/fixtures/court_page.html");

fn enumerate_all(catalog: &CatalogDocument) -> usize {
    CourtFamily::RUN_ORDER
        .into_iter()
        .flat_map(|family| {
            let strategy = EnumerationStrategy::for_family(family);
            family
                .type_codes()
                .filter_map(move |code| strategy.enumerate(code, catalog).ok())
        })
        .map(|params| params.len())
        .sum()
}

fn catalog_enumeration(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog_enumeration");

    group.bench_function("cold", |b| {
        b.iter(|| {
            let catalog = CatalogDocument::new(black_box(CATALOG).to_string());
            black_box(enumerate_all(&catalog))
        });
    });

    let catalog = CatalogDocument::new(CATALOG.to_string());
    group.bench_function("warm", |b| {
        b.iter(|| black_box(enumerate_all(black_box(&catalog))));
    });

    group.finish();
}

fn court_page_parsing(c: &mut Criterion) {
    let parser = CourtPageParser::new().expect("selectors compile");

    c.bench_function("court_page_fill", |b| {
        b.iter(|| {
            let mut details = CourtDetails::default();
            let _ = parser.fill(
                black_box(COURT_PAGE),
                "http://court.gov.ua/sud4810/",
                None,
                &mut details,
            );
            black_box(details)
        });
    });
}

criterion_group!(benches, catalog_enumeration, court_page_parsing);
criterion_main!(benches);
