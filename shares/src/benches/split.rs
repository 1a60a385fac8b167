use commonware_shares::{compact, sparse, Blob, Namespace, TX_NAMESPACE};
use criterion::{criterion_group, BatchSize, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn bench_split_txs(c: &mut Criterion) {
    let mut sampler = StdRng::seed_from_u64(0);
    for n in [100, 1_000, 10_000] {
        for size in [100, 1_000] {
            let txs: Vec<Vec<u8>> = (0..n)
                .map(|_| {
                    let mut tx = vec![0u8; size];
                    sampler.fill(&mut tx[..]);
                    tx
                })
                .collect();
            c.bench_function(
                &format!("{}/txs={} size={}", module_path!(), n, size),
                |b| {
                    b.iter(|| {
                        let mut splitter = compact::Splitter::new(TX_NAMESPACE, 0).unwrap();
                        for tx in &txs {
                            splitter.write(tx).unwrap();
                        }
                        splitter.export().unwrap()
                    })
                },
            );
        }
    }
}

fn bench_count_txs(c: &mut Criterion) {
    let mut sampler = StdRng::seed_from_u64(0);
    for n in [1_000, 10_000, 100_000] {
        let lens: Vec<usize> = (0..n).map(|_| sampler.gen_range(50..2_000)).collect();
        c.bench_function(&format!("{}/txs={}", module_path!(), n), |b| {
            b.iter(|| {
                let mut counter = compact::Counter::new();
                for len in &lens {
                    counter.add(*len);
                }
                counter.size()
            })
        });
    }
}

fn bench_split_blobs(c: &mut Criterion) {
    let mut sampler = StdRng::seed_from_u64(0);
    for size in [1_000, 100_000, 1_000_000] {
        let namespace = Namespace::new_v0(&[1, 2, 3]).unwrap();
        let mut data = vec![0u8; size];
        sampler.fill(&mut data[..]);
        let blob = Blob::new(namespace, data, 0).unwrap();
        c.bench_function(&format!("{}/size={}", module_path!(), size), |b| {
            b.iter_batched(
                || sparse::Splitter::new(&[0]),
                |mut splitter| {
                    splitter.write(&blob).unwrap();
                    splitter
                },
                BatchSize::SmallInput,
            )
        });
    }
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(10);
    targets = bench_split_txs, bench_count_txs, bench_split_blobs
}
