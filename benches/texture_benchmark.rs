//! Test texture generation benchmarks
//!
//! Measures CPU fill rate for each synthetic texture type at common sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use vst_postprocess::test_texture::{TestTexture, TextureType};

fn bench_texture_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("texture_generation");

    for kind in [TextureType::Noise, TextureType::Grid, TextureType::Gradient] {
        for size in [256u32, 1024] {
            group.throughput(Throughput::Elements(u64::from(size) * u64::from(size)));
            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", kind), size),
                &size,
                |b, &size| {
                    let mut frame = 0;
                    b.iter(|| {
                        frame += 1;
                        let tex = TestTexture::generate(kind, size, size, frame).unwrap();
                        black_box(tex)
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_texture_generation);
criterion_main!(benches);
