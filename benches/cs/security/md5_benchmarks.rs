use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use refalgos::security::md5::{
    md5_digest, CompressionTransform, Md5State, PortableTransform, UnrolledTransform,
    MD5_BLOCK_SIZE,
};

fn bench_compress(c: &mut Criterion) {
    let mut group = c.benchmark_group("md5_compress");
    group.throughput(Throughput::Bytes(MD5_BLOCK_SIZE as u64));

    let block = [0u8; MD5_BLOCK_SIZE];

    group.bench_function("portable", |b| {
        let mut state = Md5State::ZERO;
        b.iter(|| {
            PortableTransform.compress(&mut state, black_box(&block));
            black_box(&state);
        });
    });

    group.bench_function("unrolled", |b| {
        let mut state = Md5State::ZERO;
        b.iter(|| {
            UnrolledTransform.compress(&mut state, black_box(&block));
            black_box(&state);
        });
    });

    group.finish();
}

fn bench_digest(c: &mut Criterion) {
    let mut group = c.benchmark_group("md5_digest");
    for size in [64usize, 1024, 16 * 1024] {
        let message = vec![0u8; size];
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_function(format!("{size}_bytes"), |b| {
            b.iter(|| md5_digest(black_box(&message)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_compress, bench_digest);
criterion_main!(benches);
