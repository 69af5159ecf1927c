use chained_hashmap::ChainedHashMap;
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::time::Duration;

const BUCKETS: usize = 4096;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

fn filled(seed: u64, n: usize) -> (ChainedHashMap, Vec<String>) {
    let mut m = ChainedHashMap::with_buckets(BUCKETS).unwrap();
    let keys: Vec<String> = lcg(seed).take(n).map(key).collect();
    for (i, k) in keys.iter().enumerate() {
        m.insert(k, i as i64).unwrap();
    }
    (m, keys)
}

fn bench_insert(c: &mut Criterion) {
    let keys: Vec<String> = lcg(1).take(10_000).map(key).collect();
    c.bench_function("chained_hashmap_insert_10k", |b| {
        b.iter_batched(
            || ChainedHashMap::with_buckets(BUCKETS).unwrap(),
            |mut m| {
                for (i, k) in keys.iter().enumerate() {
                    m.insert(k, i as i64).unwrap();
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_get_hit(c: &mut Criterion) {
    c.bench_function("chained_hashmap_get_hit", |b| {
        let (m, keys) = filled(7, 20_000);
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(m.get(k));
        })
    });
}

fn bench_get_miss(c: &mut Criterion) {
    c.bench_function("chained_hashmap_get_miss", |b| {
        let (m, _) = filled(11, 10_000);
        let mut miss = lcg(0xdead_beef);
        b.iter(|| {
            // generate keys unlikely in map
            let k = key(miss.next().unwrap());
            black_box(m.get(&k));
        })
    });
}

fn bench_remove_reinsert(c: &mut Criterion) {
    c.bench_function("chained_hashmap_remove_reinsert", |b| {
        let (mut m, keys) = filled(13, 10_000);
        let mut it = keys.iter().enumerate().cycle();
        b.iter(|| {
            let (i, k) = it.next().unwrap();
            black_box(m.remove(k));
            m.insert(k, i as i64).unwrap();
        })
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(8))
        .warm_up_time(Duration::from_secs(2))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_insert, bench_get_hit, bench_get_miss, bench_remove_reinsert
}
criterion_main!(benches);
