use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use futures_util::stream::StreamExt;
use pipeflow::{from_seq, merge, workers, FlowStream};
use std::time::Duration;
use tokio::runtime::Runtime;

fn bench_worker_pool_throughput(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();

    let mut group = c.benchmark_group("worker_pool_throughput");
    group.measurement_time(Duration::from_secs(10));

    let item_count = 10_000;

    for worker_count in [1, 2, 4, 8, 16] {
        group.bench_with_input(
            BenchmarkId::new("cpu_bound_transform", worker_count),
            &worker_count,
            |b, &worker_count| {
                b.to_async(&rt).iter(|| async move {
                    let input = from_seq(0..item_count, 64);
                    let output = workers(input, 64, worker_count, |x: u64| async move {
                        black_box(x.wrapping_mul(2654435761))
                    })
                    .unwrap();
                    let result: Vec<u64> = output.collect().await;
                    black_box(result)
                });
            },
        );
    }

    for worker_count in [1, 4, 16] {
        group.bench_with_input(
            BenchmarkId::new("yielding_transform", worker_count),
            &worker_count,
            |b, &worker_count| {
                b.to_async(&rt).iter(|| async move {
                    let input = from_seq(0..1000u64, 64);
                    let output = workers(input, 64, worker_count, |x| async move {
                        tokio::task::yield_now().await;
                        black_box(x + 1)
                    })
                    .unwrap();
                    let result: Vec<u64> = output.collect().await;
                    black_box(result)
                });
            },
        );
    }

    group.finish();
}

fn bench_merge_throughput(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();

    let mut group = c.benchmark_group("merge_throughput");
    group.measurement_time(Duration::from_secs(10));

    let total_items = 10_000u64;

    for input_count in [1, 2, 8, 32] {
        group.bench_with_input(
            BenchmarkId::new("even_inputs", input_count),
            &input_count,
            |b, &input_count| {
                b.to_async(&rt).iter(|| async move {
                    let per_input = total_items / input_count;
                    let inputs: Vec<FlowStream<u64>> = (0..input_count)
                        .map(|i| from_seq(i * per_input..(i + 1) * per_input, 16))
                        .collect();
                    let result: Vec<u64> = merge(inputs).collect().await;
                    black_box(result)
                });
            },
        );
    }

    group.finish();
}

fn bench_source_capacity(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();

    let mut group = c.benchmark_group("source_capacity");

    for capacity in [1, 16, 256, 4096] {
        group.bench_with_input(
            BenchmarkId::new("drain", capacity),
            &capacity,
            |b, &capacity| {
                b.to_async(&rt).iter(|| async move {
                    let result: Vec<u64> = from_seq(0..10_000u64, capacity).collect().await;
                    black_box(result)
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_worker_pool_throughput,
    bench_merge_throughput,
    bench_source_capacity
);
criterion_main!(benches);
