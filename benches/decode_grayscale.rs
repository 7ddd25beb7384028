//! Benchmarks for grayscale decoding

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use jpeg_bitmap::{image_from_data, probe_header};
use jpeg_encoder::{ColorType, Encoder};

fn synthetic_gray(width: u16, height: u16) -> Vec<u8>
{
    let (w, h) = (usize::from(width), usize::from(height));
    let pixels: Vec<u8> = (0..w * h).map(|i| ((i % w) ^ (i / w)) as u8).collect();
    let mut buf = Vec::new();

    Encoder::new(&mut buf, 90)
        .encode(&pixels, width, height, ColorType::Luma)
        .unwrap();
    buf
}

fn criterion_benchmark(c: &mut Criterion)
{
    let data = synthetic_gray(1920, 1080);

    c.bench_function("Grayscale JPEG to BGRA jpeg-bitmap", |b| {
        b.iter(|| black_box(image_from_data(data.as_slice())))
    });

    c.bench_function("Grayscale JPEG header probe", |b| {
        b.iter(|| black_box(probe_header(data.as_slice(), 96)))
    });
}

criterion_group!(name=benches;
      config={
      let c = Criterion::default();
        c.measurement_time(Duration::from_secs(5))
      };
    targets=criterion_benchmark);
criterion_main!(benches);
