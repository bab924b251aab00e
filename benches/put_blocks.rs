use btcindexer_wire::{decode, decode_borrowed, encode, encode_into, PutBlock};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

fn sample_batch(records: usize, block_len: usize) -> Vec<PutBlock> {
    (0..records)
        .map(|i| PutBlock::new(800_000 + i as i64, vec![(i % 256) as u8; block_len]))
        .collect()
}

fn benchmark_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    // 10 mainnet-sized blocks
    let batch = sample_batch(10, 1_500_000);
    group.throughput(Throughput::Bytes(encode(&batch).len() as u64));
    group.bench_function("10x1.5mb", |b| b.iter(|| black_box(encode(black_box(&batch)))));

    let mut buf = Vec::new();
    group.bench_function("10x1.5mb_reuse", |b| {
        b.iter(|| {
            buf.clear();
            encode_into(&mut buf, black_box(&batch));
            black_box(buf.len())
        })
    });

    // many small regtest blocks
    let batch = sample_batch(1_000, 250);
    group.throughput(Throughput::Bytes(encode(&batch).len() as u64));
    group.bench_function("1000x250b", |b| b.iter(|| black_box(encode(black_box(&batch)))));

    group.finish();
}

fn benchmark_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    let bytes = encode(&sample_batch(10, 1_500_000));
    group.throughput(Throughput::Bytes(bytes.len() as u64));
    group.bench_function("owned_10x1.5mb", |b| b.iter(|| black_box(decode(black_box(&bytes)))));
    group.bench_function("borrowed_10x1.5mb", |b| {
        b.iter(|| black_box(decode_borrowed(black_box(&bytes)).map(|r| r.len())))
    });

    group.finish();
}

criterion_group!(benches, benchmark_encode, benchmark_decode);
criterion_main!(benches);
