use chrono::{Duration, TimeZone, Utc};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use codedrill::generator::{self, Concept, Language, SnippetConfig};
use codedrill::generator::wrap::wrap_text;
use codedrill::session::diff::classify;
use codedrill::session::layout::{Window, WindowConfig, line_starts};
use codedrill::session::stats::{self, correct_word_chars};

fn make_target(blocks: usize) -> String {
    let config = SnippetConfig::new(Language::Python, Concept::Classes, blocks);
    let mut rng = SmallRng::seed_from_u64(42);
    generator::generate(&config, &mut rng)
}

/// Typed text with an error roughly every 13th character.
fn make_typed(target: &[char], len: usize) -> Vec<char> {
    target
        .iter()
        .take(len)
        .enumerate()
        .map(|(i, &ch)| if i % 13 == 12 && ch != '\n' { 'x' } else { ch })
        .collect()
}

fn bench_classify(c: &mut Criterion) {
    let target: Vec<char> = make_target(10).chars().collect();
    let typed = make_typed(&target, target.len() / 2);

    c.bench_function("classify (10 blocks, half typed)", |b| {
        b.iter(|| classify(black_box(&target), black_box(&typed)))
    });
}

fn bench_window(c: &mut Criterion) {
    let target: Vec<char> = make_target(10).chars().collect();
    let starts = line_starts(&target);
    let config = WindowConfig::default();

    c.bench_function("window for every cursor position", |b| {
        b.iter(|| {
            let mut last = None;
            for cursor in 0..=target.len() {
                last = Some(Window::for_cursor(
                    black_box(&target),
                    &starts,
                    cursor,
                    config,
                ));
            }
            last
        })
    });
}

fn bench_stats(c: &mut Criterion) {
    let target: Vec<char> = make_target(10).chars().collect();
    let typed = make_typed(&target, target.len());
    let start = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).single();
    let now = start.map(|s| s + Duration::seconds(90)).unwrap_or_else(Utc::now);

    c.bench_function("correct_word_chars (10 blocks)", |b| {
        b.iter(|| correct_word_chars(black_box(&target), black_box(&typed)))
    });

    c.bench_function("stats::compute (10 blocks)", |b| {
        b.iter(|| {
            stats::compute(
                black_box(&target),
                black_box(&typed),
                start,
                None,
                now,
                false,
            )
        })
    });
}

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for language in Language::ALL {
        let config = SnippetConfig::new(language, Concept::Loops, 10);
        group.bench_function(language.key(), |b| {
            let mut rng = SmallRng::seed_from_u64(7);
            b.iter(|| generator::generate(black_box(&config), &mut rng))
        });
    }
    group.finish();

    let text = make_target(10);
    c.bench_function("wrap_text (10 blocks, 40 cols)", |b| {
        b.iter(|| wrap_text(black_box(&text), 40))
    });
}

criterion_group!(
    benches,
    bench_classify,
    bench_window,
    bench_stats,
    bench_generate
);
criterion_main!(benches);
