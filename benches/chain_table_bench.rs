use cardcat::chain_table::ChainTable;
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

// Chain probes are linear by design, so sizes stay catalog-shaped.
fn bench_insert_fresh_1k(c: &mut Criterion) {
    c.bench_function("chain_table::insert_fresh_1k", |b| {
        b.iter_batched(
            ChainTable::<u64>::new,
            |mut t| {
                for (i, x) in lcg(1).take(1_000).enumerate() {
                    let _ = t.insert(key(x), i as u64);
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_lookup_hit_1k(c: &mut Criterion) {
    let mut t = ChainTable::<u64>::new();
    let keys: Vec<String> = lcg(2).take(1_000).map(key).collect();
    for (i, k) in keys.iter().enumerate() {
        let _ = t.insert(k.clone(), i as u64);
    }
    c.bench_function("chain_table::lookup_hit_1k", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            for k in &keys {
                if let Some(v) = t.get(black_box(k)) {
                    sum = sum.wrapping_add(*v);
                }
            }
            black_box(sum)
        })
    });
}

fn bench_remove_all_1k(c: &mut Criterion) {
    let keys: Vec<String> = lcg(3).take(1_000).map(key).collect();
    c.bench_function("chain_table::remove_all_1k", |b| {
        b.iter_batched(
            || {
                let mut t = ChainTable::<u64>::new();
                for (i, k) in keys.iter().enumerate() {
                    let _ = t.insert(k.clone(), i as u64);
                }
                t
            },
            |mut t| {
                for k in &keys {
                    let _ = t.remove(k);
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_insert_fresh_1k,
    bench_lookup_hit_1k,
    bench_remove_all_1k
);
criterion_main!(benches);
