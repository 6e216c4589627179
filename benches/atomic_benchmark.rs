use atomcell::{create, create_with_padding, AtomicCell, AtomicNumber, AtomicU64, PaddingStrategy};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::thread;

const THREADS: usize = 4;
const OPS: u64 = 10_000;

fn bench_single_thread(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_thread");

    group.bench_function("fetch_add", |b| {
        let cell = AtomicU64::new(0);
        b.iter(|| black_box(cell.increment_and_get()))
    });

    group.bench_function("transform_loop", |b| {
        let cell = AtomicU64::new(0);
        b.iter(|| black_box(cell.transform_and_get(|v| v + 1)))
    });

    group.bench_function("generic_transform", |b| {
        let cell = create(vec![0u64; 4]);
        b.iter(|| {
            black_box(cell.transform_and_extract(|v| {
                let mut next = v.clone();
                next[0] += 1;
                (next[0], next)
            }))
        })
    });

    group.finish();
}

fn bench_false_sharing(c: &mut Criterion) {
    let mut group = c.benchmark_group("false_sharing");

    group.bench_function("adjacent_counters", |b| {
        let counters: Vec<AtomicU64> = (0..THREADS).map(|_| AtomicU64::new(0)).collect();
        b.iter(|| {
            thread::scope(|s| {
                for counter in &counters {
                    s.spawn(move || {
                        for _ in 0..OPS {
                            counter.increment();
                        }
                    });
                }
            });
        })
    });

    for (name, strategy) in [
        ("padded_left_right_64", PaddingStrategy::LEFT_RIGHT_64),
        ("padded_left_right_128", PaddingStrategy::LEFT_RIGHT_128),
    ] {
        group.bench_function(name, |b| {
            let counters: Vec<_> = (0..THREADS)
                .map(|_| create_with_padding(0u64, strategy).unwrap())
                .collect();
            b.iter(|| {
                thread::scope(|s| {
                    for counter in &counters {
                        s.spawn(move || {
                            for _ in 0..OPS {
                                counter.increment();
                            }
                        });
                    }
                });
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_single_thread, bench_false_sharing);
criterion_main!(benches);
