use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::collections::BTreeMap;
use std::hint::black_box;

use ecole::{ArmState, BanditArmSelector};

fn pool(k: usize) -> BTreeMap<String, ArmState> {
    (0..k)
        .map(|i| {
            let n = (i as u64 + 1) * 7;
            (format!("play_{i:03}"), ArmState::new(n as f64 * 0.1 * (i % 5) as f64, n))
        })
        .collect()
}

fn bench_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("select");
    for k in [2usize, 8, 32] {
        let arms = pool(k);
        let selector = BanditArmSelector::with_seed(7);
        group.bench_with_input(BenchmarkId::from_parameter(k), &arms, |b, arms| {
            b.iter(|| black_box(selector.select(arms, 0.1).unwrap()));
        });
    }
    group.finish();
}

fn bench_select_with_propensity(c: &mut Criterion) {
    let mut group = c.benchmark_group("select_with_propensity");
    let arms = pool(8);
    for samples in [50u32, 200, 1000] {
        let selector = BanditArmSelector::with_seed(7);
        group.bench_with_input(BenchmarkId::from_parameter(samples), &samples, |b, &samples| {
            b.iter(|| black_box(selector.select_with_propensity(&arms, 0.1, samples).unwrap()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_select, bench_select_with_propensity);
criterion_main!(benches);
