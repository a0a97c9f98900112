use criterion::{Criterion, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use redblack::RedBlackMap;
use std::hint::black_box;

// Inserts never replace, so each measured insert is paired with a delete to keep the size fixed.
macro_rules! map_insert_rand_bench {
    ($name: ident, $n: expr) => (
        fn $name(c: &mut Criterion) {
            let n: usize = $n;
            let mut map = RedBlackMap::new();
            let mut rng = StdRng::seed_from_u64(0);

            for _ in 0..n {
                let i = rng.gen_range(0..n);
                map.insert(i, i);
            }

            c.bench_function(stringify!($name), |b| b.iter(|| {
                let k = rng.gen_range(0..n);
                map.insert(k, k);
                black_box(map.delete(&k));
            }));
        }
    )
}

macro_rules! map_insert_seq_bench {
    ($name: ident, $n: expr) => (
        fn $name(c: &mut Criterion) {
            let n: usize = $n;
            let mut map = RedBlackMap::new();

            for i in 0..n {
                map.insert(i * 2, i * 2);
            }

            let mut i = 1;
            c.bench_function(stringify!($name), |b| b.iter(|| {
                map.insert(i, i);
                black_box(map.delete(&i));
                i = (i + 2) % n;
            }));
        }
    )
}

macro_rules! map_find_rand_bench {
    ($name: ident, $n: expr) => (
        fn $name(c: &mut Criterion) {
            let n: usize = $n;
            let mut map = RedBlackMap::new();
            let mut rng = StdRng::seed_from_u64(0);
            let mut keys: Vec<_> = (0..n).map(|_| rng.gen_range(0..n)).collect();

            for &k in &keys {
                map.insert(k, k);
            }

            keys.shuffle(&mut rng);

            let mut i = 0;
            c.bench_function(stringify!($name), |b| b.iter(|| {
                let t = map.get(&keys[i]);
                i = (i + 1) % n;
                black_box(t);
            }));
        }
    )
}

macro_rules! map_find_seq_bench {
    ($name: ident, $n: expr) => (
        fn $name(c: &mut Criterion) {
            let n: usize = $n;
            let map: RedBlackMap<_, _> = (0..n).map(|i| (i, i)).collect();

            let mut i = 0;
            c.bench_function(stringify!($name), |b| b.iter(|| {
                let x = map.get(&i);
                i = (i + 1) % n;
                black_box(x);
            }));
        }
    )
}

macro_rules! map_delete_bench {
    ($name: ident, $n: expr) => (
        fn $name(c: &mut Criterion) {
            let n: usize = $n;
            let mut rng = StdRng::seed_from_u64(0);
            let mut keys: Vec<usize> = (0..n).collect();
            keys.shuffle(&mut rng);

            c.bench_function(stringify!($name), |b| b.iter_with_setup(
                || keys.iter().map(|&k| (k, k)).collect::<RedBlackMap<_, _>>(),
                |mut map| {
                    for k in &keys {
                        map.delete(k);
                    }

                    map
                },
            ));
        }
    )
}

macro_rules! map_iter_bench {
    ($name: ident, $n: expr) => (
        fn $name(c: &mut Criterion) {
            let n: usize = $n;
            let mut map = RedBlackMap::<u32, u32>::new();
            let mut rng = StdRng::seed_from_u64(0);

            for _ in 0..n {
                map.insert(rng.gen(), rng.gen());
            }

            c.bench_function(stringify!($name), |b| b.iter(|| {
                for entry in map.iter() {
                    black_box(entry);
                }
            }));
        }
    )
}

map_insert_rand_bench!{insert_rand_100,    100}
map_insert_rand_bench!{insert_rand_10_000, 10_000}

map_insert_seq_bench!{insert_seq_100,    100}
map_insert_seq_bench!{insert_seq_10_000, 10_000}

map_find_rand_bench!{find_rand_100,    100}
map_find_rand_bench!{find_rand_10_000, 10_000}

map_find_seq_bench!{find_seq_100,    100}
map_find_seq_bench!{find_seq_10_000, 10_000}

map_delete_bench!{delete_100,    100}
map_delete_bench!{delete_10_000, 10_000}

map_iter_bench!{iter_100,    100}
map_iter_bench!{iter_10_000, 10_000}

criterion_group!(
    benches,
    insert_rand_100,
    insert_rand_10_000,
    insert_seq_100,
    insert_seq_10_000,
    find_rand_100,
    find_rand_10_000,
    find_seq_100,
    find_seq_10_000,
    delete_100,
    delete_10_000,
    iter_100,
    iter_10_000,
);
criterion_main!(benches);
