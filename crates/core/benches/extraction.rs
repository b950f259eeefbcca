use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use folio_core::{Document, extract_from_html, render_report};

fn bench_parse(c: &mut Criterion) {
    let small = std::fs::read_to_string("../../tests/fixtures/sample_page.html").unwrap();
    let medium = std::fs::read_to_string("../../tests/fixtures/many_items.html").unwrap();

    let mut group = c.benchmark_group("parse");

    group.bench_with_input(BenchmarkId::new("small", "sample_page"), &small, |b, html| {
        b.iter(|| Document::parse(black_box(html)))
    });

    group.bench_with_input(BenchmarkId::new("medium", "many_items"), &medium, |b, html| {
        b.iter(|| Document::parse(black_box(html)))
    });

    group.finish();
}

fn bench_full_extraction(c: &mut Criterion) {
    let html = std::fs::read_to_string("../../tests/fixtures/many_items.html").unwrap();

    c.bench_function("full_extraction", |b| {
        b.iter(|| extract_from_html(black_box(&html), "https://example.com"))
    });
}

fn bench_render(c: &mut Criterion) {
    let html = std::fs::read_to_string("../../tests/fixtures/many_items.html").unwrap();
    let data = extract_from_html(&html, "https://example.com").unwrap();

    c.bench_function("render_report", |b| b.iter(|| render_report(black_box(&data))));
}

criterion_group!(benches, bench_parse, bench_full_extraction, bench_render);
criterion_main!(benches);
