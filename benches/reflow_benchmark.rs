//! Benchmarks for songsheet parsing and re-flow performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks run on synthetic annotated lyric data.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use songsheet::parser::find_bold_spans;
use songsheet::render::{reflow_stanza, to_docx, RenderOptions};

/// Creates a synthetic annotated song with the given number of stanzas.
fn create_test_song(stanza_count: usize) -> String {
    let mut content = String::new();
    content.push_str("TITLE=Benchmark Song\n");
    content.push_str("REF_NO=999\n");
    content.push_str("AUTHORS=Nobody in particular\n");
    content.push_str("COPYRIGHT=Public Domain\n\n");

    for i in 0..stanza_count {
        content.push_str(&format!("{}. stanza with a <b>bold start\n", i + 1));
        content.push_str("that runs over the line break</b> and on,\n");
        content.push_str("then a plain line,\n");
        content.push_str("and a <b>short</b> bold word.\n\n");
    }

    content
}

/// Benchmark bold marker resolution.
fn bench_span_resolution(c: &mut Criterion) {
    let text = "A <b>phrase over\ntwo lines</b> and <b>another</b> marked <b>run</b> here";

    c.bench_function("find_bold_spans", |b| {
        b.iter(|| find_bold_spans(black_box(text)).unwrap());
    });
}

/// Benchmark stanza re-flow with and without capitalization.
fn bench_reflow(c: &mut Criterion) {
    let text = "r: a <b>phrase over\ntwo lines</b> and more,\nv: a plain closing line";
    let plain = RenderOptions::new();
    let capitalized = RenderOptions::new().with_capitalize(true);

    c.bench_function("reflow_stanza", |b| {
        b.iter(|| reflow_stanza(black_box(text), &plain).unwrap());
    });

    c.bench_function("reflow_stanza_capitalized", |b| {
        b.iter(|| reflow_stanza(black_box(text), &capitalized).unwrap());
    });
}

/// Benchmark full song-to-DOCX rendering at various sizes.
fn bench_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("to_docx");
    let options = RenderOptions::new();

    for stanza_count in [1, 10, 50].iter() {
        let text = create_test_song(*stanza_count);
        let song = songsheet::parse_str(&text).unwrap();

        group.bench_function(format!("{}_stanzas", stanza_count), |b| {
            b.iter(|| to_docx(black_box(&song), &options).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_span_resolution, bench_reflow, bench_conversion);
criterion_main!(benches);
