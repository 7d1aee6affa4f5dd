//! Benchmarks for heatmap rendering - strategies, scanning and PNG encoding.
//!
//! Run with: cargo bench --package heatmap-renderer -- density
//! Or: cargo bench --package heatmap-renderer --bench render_benchmarks

use criterion::{
    black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput,
};
use heatmap_common::{BoundingBox, GeoPoint};
use heatmap_renderer::{png, BitDepth, Heatmap, RenderOptions, StrategyKind};
use rand::Rng;

/// Random points scattered over a city-sized box, with a denser core.
fn generate_points(count: usize, bbox: &BoundingBox) -> Vec<GeoPoint> {
    let mut rng = rand::thread_rng();
    let center_lat = (bbox.min_lat + bbox.max_lat) / 2.0;
    let center_lng = (bbox.min_lng + bbox.max_lng) / 2.0;

    (0..count)
        .map(|i| {
            let (lat, lng) = if i % 3 == 0 {
                (
                    center_lat + rng.gen_range(-0.01..0.01),
                    center_lng + rng.gen_range(-0.01..0.01),
                )
            } else {
                (
                    rng.gen_range(bbox.min_lat..bbox.max_lat),
                    rng.gen_range(bbox.min_lng..bbox.max_lng),
                )
            };
            GeoPoint::new(lat, lng, rng.gen_range(0.0..1.0), i as u64)
        })
        .collect()
}

fn city_bbox() -> BoundingBox {
    BoundingBox {
        min_lat: 51.45,
        min_lng: -0.25,
        max_lat: 51.55,
        max_lng: -0.05,
    }
}

/// RGBA data shaped like a rendered heatmap: legend colors with soft edges.
fn generate_heatmap_rgba(width: usize, height: usize) -> Vec<u8> {
    let colors: [[u8; 4]; 5] = [
        [0, 0, 0, 0],
        [50, 52, 144, 255],
        [0, 158, 84, 255],
        [253, 253, 45, 255],
        [235, 46, 46, 255],
    ];
    let mut data = Vec::with_capacity(width * height * 4);
    for y in 0..height {
        for x in 0..width {
            let band = ((x / 32) + (y / 32)) % colors.len();
            data.extend_from_slice(&colors[band]);
        }
    }
    data
}

fn bench_density(c: &mut Criterion) {
    let mut group = c.benchmark_group("density");
    let bbox = city_bbox();

    for count in [100, 1_000, 10_000] {
        let points = generate_points(count, &bbox);
        let options = RenderOptions {
            height: 256,
            effect_distance: 0.005,
            ..RenderOptions::default()
        };

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("points", count), &points, |b, points| {
            b.iter(|| Heatmap::render(black_box(points), bbox, &options));
        });
    }

    group.finish();
}

fn bench_weighted_average(c: &mut Criterion) {
    let mut group = c.benchmark_group("weighted_average");
    let bbox = city_bbox();

    for count in [100, 1_000, 10_000] {
        let points = generate_points(count, &bbox);
        let options = RenderOptions {
            height: 256,
            effect_distance: 0.005,
            strategy: StrategyKind::WeightedAverage,
            ..RenderOptions::default()
        };

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("points", count), &points, |b, points| {
            b.iter(|| Heatmap::render(black_box(points), bbox, &options));
        });
    }

    group.finish();
}

fn bench_effect_distance(c: &mut Criterion) {
    let mut group = c.benchmark_group("effect_distance");
    let bbox = city_bbox();
    let points = generate_points(1_000, &bbox);

    for ed in [0.001, 0.005, 0.02] {
        let options = RenderOptions {
            height: 512,
            effect_distance: ed,
            ..RenderOptions::default()
        };
        group.bench_with_input(BenchmarkId::new("density", ed), &options, |b, options| {
            b.iter(|| Heatmap::render(black_box(&points), bbox, options));
        });
    }

    group.finish();
}

fn bench_png_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("png_encoding");

    for (width, height) in [(256, 256), (512, 512), (1024, 1024)] {
        let data = generate_heatmap_rgba(width, height);
        group.throughput(Throughput::Bytes((width * height * 4) as u64));

        group.bench_with_input(
            BenchmarkId::new("auto", format!("{}x{}", width, height)),
            &data,
            |b, data| {
                b.iter(|| png::create_png_auto(black_box(data), width, height));
            },
        );

        group.bench_with_input(
            BenchmarkId::new("rgba", format!("{}x{}", width, height)),
            &data,
            |b, data| {
                b.iter(|| png::create_png(black_box(data), width, height));
            },
        );

        group.bench_with_input(
            BenchmarkId::new("rgba16", format!("{}x{}", width, height)),
            &data,
            |b, data| {
                b.iter(|| png::create_png_rgba16(black_box(data), width, height));
            },
        );
    }

    group.finish();
}

fn bench_end_to_end(c: &mut Criterion) {
    let bbox = city_bbox();
    let points = generate_points(2_000, &bbox);
    let options = RenderOptions {
        height: 512,
        bit_depth: BitDepth::Eight,
        ..RenderOptions::default()
    };

    c.bench_function("render_and_encode_512", |b| {
        b.iter(|| {
            Heatmap::render(black_box(&points), bbox, &options).and_then(|heatmap| heatmap.to_png())
        });
    });
}

criterion_group!(
    benches,
    bench_density,
    bench_weighted_average,
    bench_effect_distance,
    bench_png_encoding,
    bench_end_to_end,
);

criterion_main!(benches);
