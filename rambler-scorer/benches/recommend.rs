//! Criterion benchmarks for end-to-end recommendation.
//!
//! Measures filter, score and top-K selection over generated datasets of
//! increasing size, for both scoring policies.
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench --package rambler-scorer
//! ```

// Criterion macros generate code that triggers missing_docs warnings.
#![allow(missing_docs, reason = "Criterion macros generate undocumented code")]

use std::hint::black_box;
use std::num::NonZeroUsize;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rambler_core::{Context, Dataset, DatasetShape, PointOfInterest};
use rambler_scorer::Recommender;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seed for deterministic dataset generation.
const BENCHMARK_SEED: u64 = 42;

/// Dataset sizes to benchmark.
const DATASET_SIZES: &[usize] = &[1_000, 10_000, 50_000];

const KINDS: [&str; 4] = ["park", "museum", "temple", "lake"];
const WEATHER: [&str; 3] = ["sunny", "rainy", "cloudy"];

/// Generate places scattered around central Bengaluru.
fn generate_pois(count: usize, seed: u64) -> Vec<PointOfInterest> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    KINDS
        .iter()
        .cycle()
        .zip(WEATHER.iter().cycle())
        .take(count)
        .enumerate()
        .map(|(index, (kind, weather))| {
            PointOfInterest::new(format!("Place {index}"), *kind)
                .with_avg_cost(rng.gen_range(0.0..500.0))
                .with_distance_km(rng.gen_range(0.0..40.0))
                .with_open_hour(rng.gen_range(0..24))
                .with_weather(*weather)
                .with_location(rng.gen_range(12.8..13.1), rng.gen_range(77.4..77.8))
        })
        .collect()
}

fn bench_recommend(c: &mut Criterion) {
    let mut group = c.benchmark_group("recommend");
    let top_k = NonZeroUsize::new(10).unwrap_or(NonZeroUsize::MIN);
    let shape = DatasetShape {
        has_coordinates: true,
        has_distance_km: true,
    };

    for &size in DATASET_SIZES {
        let recommender =
            Recommender::from_dataset(Dataset::new(generate_pois(size, BENCHMARK_SEED), shape));
        let feature = Context::default()
            .with_kind("park")
            .with_weather("sunny")
            .with_avg_cost(100.0)
            .with_top_k(top_k);
        let geo = feature.clone().with_position(12.97, 77.59);

        group.throughput(Throughput::Elements(u64::try_from(size).unwrap_or(u64::MAX)));
        group.bench_with_input(BenchmarkId::new("feature", size), &feature, |b, context| {
            b.iter(|| black_box(recommender.recommend_context(context)));
        });
        group.bench_with_input(BenchmarkId::new("geo", size), &geo, |b, context| {
            b.iter(|| black_box(recommender.recommend_context(context)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_recommend);
criterion_main!(benches);
