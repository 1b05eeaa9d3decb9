//! Benchmarks for the outfit analysis pipeline.
//!
//! Run with: cargo bench -p fitcheck-core

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;

use fitcheck_core::analyzer::labels::LabelBank;
use fitcheck_core::analyzer::{decode_image, preprocess, scorer, CLOTHING_ITEMS, STYLES};
use fitcheck_core::math::l2_normalize;

/// Deterministic unit-norm rows standing in for text embeddings.
fn synthetic_bank(labels: &[&str], dim: usize) -> LabelBank {
    let mut matrix = Vec::with_capacity(labels.len() * dim);
    for i in 0..labels.len() {
        let row: Vec<f32> = (0..dim)
            .map(|j| ((i * 31 + j * 7) % 97) as f32 / 97.0 - 0.5)
            .collect();
        matrix.extend(l2_normalize(&row));
    }
    LabelBank::from_raw(labels.iter().map(|s| s.to_string()).collect(), matrix, dim)
}

fn synthetic_embedding(dim: usize) -> Vec<f32> {
    let raw: Vec<f32> = (0..dim).map(|j| ((j * 13) % 89) as f32 / 89.0 - 0.5).collect();
    l2_normalize(&raw)
}

fn benchmark_decode(c: &mut Criterion) {
    let img = DynamicImage::new_rgb8(640, 480);
    let mut bytes = Cursor::new(Vec::new());
    img.write_to(&mut bytes, ImageFormat::Png).unwrap();
    let bytes = bytes.into_inner();

    c.bench_function("decode_png_640x480", |b| {
        b.iter(|| {
            let _ = decode_image(black_box(&bytes));
        })
    });
}

fn benchmark_preprocess(c: &mut Criterion) {
    let img = DynamicImage::new_rgb8(1920, 1080);

    c.bench_function("preprocess_224", |b| {
        b.iter(|| {
            let _ = preprocess::preprocess(black_box(&img), 224);
        })
    });
}

fn benchmark_scoring(c: &mut Criterion) {
    let garment_bank = synthetic_bank(CLOTHING_ITEMS, 512);
    let style_bank = synthetic_bank(STYLES, 512);
    let embedding = synthetic_embedding(512);

    c.bench_function("score_garment_vocabulary", |b| {
        b.iter(|| {
            let _ = scorer::score(black_box(&garment_bank), black_box(&embedding));
        })
    });

    c.bench_function("score_both_vocabularies_top3", |b| {
        b.iter(|| {
            let _ = scorer::top_k(black_box(&garment_bank), black_box(&embedding), 3);
            let _ = scorer::top_k(black_box(&style_bank), black_box(&embedding), 3);
        })
    });
}

criterion_group!(
    benches,
    benchmark_decode,
    benchmark_preprocess,
    benchmark_scoring,
);
criterion_main!(benches);
