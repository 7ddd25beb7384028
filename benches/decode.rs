use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use jpeg_bitmap::image_from_data;
use jpeg_encoder::{ColorType, Encoder};

fn synthetic(width: u16, height: u16, progressive: bool) -> Vec<u8>
{
    let (w, h) = (usize::from(width), usize::from(height));
    let mut pixels = Vec::with_capacity(w * h * 3);

    for y in 0..h
    {
        for x in 0..w
        {
            pixels.extend_from_slice(&[(x * 255 / w) as u8, (y * 255 / h) as u8, ((x ^ y) & 0xff) as u8]);
        }
    }
    let mut buf = Vec::new();
    let mut encoder = Encoder::new(&mut buf, 90);

    encoder.set_progressive(progressive);
    encoder.encode(&pixels, width, height, ColorType::Rgb).unwrap();
    buf
}

fn decode_jpeg_image_rs(buf: &[u8]) -> Vec<u8>
{
    let mut decoder = jpeg_decoder::Decoder::new(buf);
    decoder.decode().unwrap()
}

fn criterion_benchmark(c: &mut Criterion)
{
    let baseline = synthetic(1920, 1080, false);

    c.bench_function("Baseline JPEG to BGRA jpeg-bitmap", |b| {
        b.iter(|| black_box(image_from_data(baseline.as_slice())))
    });
    c.bench_function("Baseline JPEG Decoding imagers/jpeg-decoder", |b| {
        b.iter(|| black_box(decode_jpeg_image_rs(baseline.as_slice())))
    });

    let progressive = synthetic(1920, 1080, true);

    c.bench_function("Progressive JPEG to BGRA jpeg-bitmap", |b| {
        b.iter(|| black_box(image_from_data(progressive.as_slice())))
    });
}

criterion_group!(name=benches;
      config={
      let c = Criterion::default();
        c.measurement_time(Duration::from_secs(5))
      };
    targets=criterion_benchmark);
criterion_main!(benches);
