// Benchmarks for batching host dispatch overhead
// Run with: cargo bench

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use model_host::{FnPredictor, HostConfig, Hosted, IdentityBatcher};

fn score_batch(batch: Vec<i64>) -> anyhow::Result<Vec<i64>> {
    Ok(batch.into_iter().map(|x| x.wrapping_mul(31).wrapping_add(7)).collect())
}

/// Round-trip latency/throughput through the host for different numbers
/// of concurrent callers. Higher concurrency amortizes the per-invocation
/// overhead across larger batches.
fn hosted_prediction_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Hosted Prediction");
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .unwrap();

    let host = rt.block_on(async {
        let host = Arc::new(FnPredictor::new(score_batch).host(
            IdentityBatcher::new(),
            HostConfig { max_batch_size: 64 },
        ));
        host.start().unwrap();
        host
    });

    for concurrency in [1usize, 8, 64].iter() {
        group.bench_with_input(
            BenchmarkId::new("concurrent_predict", concurrency),
            concurrency,
            |b, &n| {
                let host = Arc::clone(&host);
                b.to_async(&rt).iter(|| {
                    let host = Arc::clone(&host);
                    async move {
                        let callers: Vec<_> = (0..n as i64)
                            .map(|x| {
                                let host = Arc::clone(&host);
                                tokio::spawn(async move { host.predict(x).await })
                            })
                            .collect();
                        for caller in callers {
                            black_box(caller.await.unwrap().unwrap());
                        }
                    }
                });
            },
        );
    }

    group.finish();
}

/// Baseline: the same work as one direct batched call, no host in the way.
fn direct_call_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Direct Call");

    for batch_size in [1usize, 8, 64].iter() {
        group.bench_with_input(
            BenchmarkId::new("score_batch", batch_size),
            batch_size,
            |b, &n| {
                let batch: Vec<i64> = (0..n as i64).collect();
                b.iter(|| black_box(score_batch(black_box(batch.clone())).unwrap()));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, hosted_prediction_benchmark, direct_call_benchmark);
criterion_main!(benches);
