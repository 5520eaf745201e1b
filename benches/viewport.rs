//! Benchmarks for viewport justification.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use panedit::document::Document;
use panedit::ui::viewport::Viewport;

fn sample_document() -> Document {
    Document::from_lines((0..5000).map(|i| {
        if i % 4 == 0 {
            format!("{i}: {}", "wrapped content ".repeat(12))
        } else {
            format!("{i}: short")
        }
    }))
}

fn bench_justify_in_place(c: &mut Criterion) {
    let doc = sample_document();
    let mut vp = Viewport::new(80, 40);
    vp.justify(&doc, 2500);
    c.bench_function("justify_in_place", |b| {
        b.iter(|| vp.justify(&doc, black_box(2500)))
    });
}

fn bench_justify_step_down(c: &mut Criterion) {
    let doc = sample_document();
    c.bench_function("justify_step_down_200", |b| {
        b.iter(|| {
            let mut vp = Viewport::new(80, 40);
            for line in 0..200 {
                vp.justify(&doc, black_box(line));
            }
        })
    });
}

criterion_group!(benches, bench_justify_in_place, bench_justify_step_down);
criterion_main!(benches);
