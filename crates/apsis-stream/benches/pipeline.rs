//! Serialize-then-deserialize throughput across chunk geometries.

use std::hint::black_box;

use apsis_stream::{PullSerializer, PushDeserializer};
use apsis_test_utils::{deterministic_bytes, ByteBlob};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn roundtrip(payload: &[u8], chunk_size: usize, number_of_chunks: usize) -> Vec<u8> {
    let mut serializer = PullSerializer::new(chunk_size, number_of_chunks);
    let mut deserializer = PushDeserializer::<ByteBlob>::new(chunk_size, number_of_chunks);
    serializer.start(ByteBlob(payload.to_vec()));
    deserializer.start();
    while let Some(chunk) = serializer.pull() {
        deserializer.push(chunk.as_slice());
    }
    serializer.join().unwrap();
    deserializer.push(&[]);
    deserializer.join().unwrap().0
}

fn bench_pipeline(c: &mut Criterion) {
    let payload = deterministic_bytes(42, 64 * 1024);
    let mut group = c.benchmark_group("pipeline_roundtrip");
    group.throughput(Throughput::Bytes(payload.len() as u64));
    for chunk_size in [256, 1024, 4096] {
        group.bench_with_input(
            BenchmarkId::from_parameter(chunk_size),
            &chunk_size,
            |b, &chunk_size| {
                b.iter(|| black_box(roundtrip(&payload, chunk_size, 4)));
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
