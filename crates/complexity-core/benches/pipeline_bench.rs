// ─────────────────────────────────────────────────────────────────────
// Complexity Kernel — Pipeline Benchmarks
// ─────────────────────────────────────────────────────────────────────
//! Criterion benchmarks for the reflections solver and the full
//! multi-period pipeline on synthetic panels.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use complexity_core::{
    binarize, build_period_matrix, fill_missing, location_quotient, method_of_reflections,
    sanitize_period, ComplexityPipeline,
};
use complexity_types::{Label, Observation, StdConvention};

/// Deterministic panel: `places × sectors` cells over `periods` periods.
///
/// Values come from a small LCG so the advantage pattern is irregular
/// but reproducible.
fn synthetic_panel(periods: i64, places: i64, sectors: i64) -> Vec<Observation> {
    let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
    let mut out = Vec::with_capacity((periods * places * sectors) as usize);
    for t in 0..periods {
        for p in 0..places {
            for s in 0..sectors {
                state = state
                    .wrapping_mul(6_364_136_223_846_793_005)
                    .wrapping_add(1_442_695_040_888_963_407);
                let valor = ((state >> 33) % 1000) as f64;
                out.push(Observation::new(2000 + t, p, s, Some(valor)));
            }
        }
    }
    out
}

// ── method_of_reflections() ─────────────────────────────────────────

fn bench_reflections(c: &mut Criterion, places: i64, sectors: i64) {
    let panel = synthetic_panel(1, places, sectors);
    let data = fill_missing(&panel);
    let tempo = Label::from(2000);
    let slice = sanitize_period(&data, &tempo);
    let matrix = build_period_matrix(&tempo, &slice);
    let advantage = binarize(&location_quotient(&matrix).expect("synthetic panel is not degenerate"), 1.0);

    c.bench_function(&format!("reflections_{places}x{sectors}"), |b| {
        b.iter(|| method_of_reflections(black_box(&advantage), 19, StdConvention::Sample))
    });
}

fn bench_reflections_small(c: &mut Criterion) {
    bench_reflections(c, 50, 30);
}

fn bench_reflections_large(c: &mut Criterion) {
    bench_reflections(c, 500, 200);
}

// ── ComplexityPipeline ──────────────────────────────────────────────

fn bench_full_pipeline(c: &mut Criterion) {
    let panel = synthetic_panel(5, 100, 50);
    let pipeline = ComplexityPipeline::default_params();
    c.bench_function("complexity_5x100x50", |b| {
        b.iter(|| pipeline.complexity(black_box(&panel)))
    });
}

fn bench_advantage_only(c: &mut Criterion) {
    let panel = synthetic_panel(5, 100, 50);
    let pipeline = ComplexityPipeline::default_params();
    c.bench_function("advantage_5x100x50", |b| {
        b.iter(|| pipeline.advantage(black_box(&panel)))
    });
}

criterion_group!(
    benches,
    bench_reflections_small,
    bench_reflections_large,
    bench_full_pipeline,
    bench_advantage_only,
);
criterion_main!(benches);
