use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rand::{Rng, SeedableRng};
use ruhuff::decoding::decode_all_to_vec;
use ruhuff::encoding::compress_to_vec;

fn criterion_benchmark(c: &mut Criterion) {
    const DATA_SIZE: usize = 1024 * 1024;

    // a skewed alphabet, so codes of several lengths are exercised
    let mut rng = rand::rngs::SmallRng::seed_from_u64(0xDEADBEEF);
    let data: Vec<u8> = (0..DATA_SIZE)
        .map(|_| {
            let x: u32 = rng.gen_range(0..1024);
            (x * x / 4096) as u8
        })
        .collect();
    let compressed = compress_to_vec(&data);

    let mut group = c.benchmark_group("codec");
    group.throughput(Throughput::Bytes(DATA_SIZE as u64));
    group.bench_function("compress", |b| b.iter(|| compress_to_vec(black_box(&data))));
    group.bench_function("decompress", |b| {
        b.iter(|| decode_all_to_vec(black_box(&compressed)).unwrap())
    });
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
