//! Benchmarks for Huffman encoding and decoding.
//!
//! Run with: `cargo bench -p huffer-huffman`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use huffer_huffman::{analyse, decode, encode, FrequencyTable, HuffmanTree};

/// Generate test data with varying compressibility.
fn generate_test_data(size: usize, compressibility: f64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(42);
    let mut data = Vec::with_capacity(size);

    if compressibility > 0.9 {
        // Skewed alphabet, a few symbols dominate
        while data.len() < size {
            let byte = match rng.gen_range(0..100) {
                0..=59 => b'e',
                60..=84 => b't',
                85..=94 => b'a',
                _ => rng.gen_range(b'b'..=b'z'),
            };
            data.push(byte);
        }
    } else if compressibility > 0.5 {
        // English-like text
        let phrases: &[&[u8]] = &[
            b"The quick brown fox jumps over the lazy dog. ",
            b"Pack my box with five dozen liquor jugs! ",
            b"How vexingly quick daft zebras jump!! ",
        ];
        while data.len() < size {
            let phrase = phrases[rng.gen_range(0..phrases.len())];
            data.extend_from_slice(phrase);
        }
        data.truncate(size);
    } else {
        // Uniform bytes, nothing to gain
        data.resize(size, 0);
        rng.fill(&mut data[..]);
    }

    data
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("huffman_encode");

    for size in [1024, 16 * 1024, 256 * 1024] {
        for (name, compressibility) in [("skewed", 0.95), ("text", 0.7), ("random", 0.0)] {
            let data = generate_test_data(size, compressibility);
            group.throughput(Throughput::Bytes(size as u64));
            group.bench_with_input(
                BenchmarkId::new(name, size),
                &data,
                |b, data| b.iter(|| encode(black_box(data)).unwrap()),
            );
        }
    }

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("huffman_decode");

    for size in [1024, 16 * 1024, 256 * 1024] {
        for (name, compressibility) in [("skewed", 0.95), ("text", 0.7), ("random", 0.0)] {
            let data = generate_test_data(size, compressibility);
            let encoded = encode(&data).unwrap();
            group.throughput(Throughput::Bytes(size as u64));
            group.bench_with_input(
                BenchmarkId::new(name, size),
                &encoded,
                |b, encoded| b.iter(|| decode(black_box(encoded)).unwrap()),
            );
        }
    }

    group.finish();
}

fn bench_stages(c: &mut Criterion) {
    let mut group = c.benchmark_group("huffman_stages");
    let data = generate_test_data(64 * 1024, 0.7);
    let table = analyse(&data);
    let table_bytes = table.encode().unwrap();

    group.bench_function("analyse", |b| b.iter(|| analyse(black_box(&data))));
    group.bench_function("build_tree", |b| {
        b.iter(|| HuffmanTree::new(black_box(&table)).unwrap())
    });
    group.bench_function("table_decode", |b| {
        b.iter(|| FrequencyTable::decode(black_box(&table_bytes)).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode, bench_stages);
criterion_main!(benches);
