use jpeg_bitmap::{image_from_data, image_from_data_with_options, DecoderOptions, LockMode};
use jpeg_bitmap::{probe_header, ColorSpace, PixelFormat, Rect};
use jpeg_encoder::{ColorType, Density, Encoder};

/// Deterministic noise, so every run encodes the same image
fn noise(len: usize) -> Vec<u8>
{
    let mut state: u32 = 0x1234_5678;

    (0..len)
        .map(|_| {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12345);
            (state >> 16) as u8
        })
        .collect()
}

fn encode(
    pixels: &[u8], width: u16, height: u16, color: ColorType, progressive: bool,
    density: Option<Density>,
) -> Vec<u8>
{
    let mut buf = Vec::new();
    let mut encoder = Encoder::new(&mut buf, 90);

    encoder.set_progressive(progressive);
    if let Some(density) = density
    {
        encoder.set_density(density);
    }
    encoder.encode(pixels, width, height, color).unwrap();
    buf
}

/// What the entropy decoder alone makes of `data`
fn reference(data: &[u8]) -> Vec<u8>
{
    jpeg_decoder::Decoder::new(data).decode().unwrap()
}

#[test]
fn rgb_matches_reference_decoder()
{
    let (width, height) = (37, 21);
    let data = encode(&noise(width * height * 3), 37, 21, ColorType::Rgb, false, None);
    let expected = reference(&data);

    let bitmap = image_from_data(&data).expect("rgb image");

    assert_eq!(bitmap.pixel_format(), PixelFormat::Bgra32);
    assert_eq!((bitmap.width(), bitmap.height()), (width, height));

    for y in 0..height
    {
        for x in 0..width
        {
            let src = &expected[(y * width + x) * 3..][..3];

            assert_eq!(bitmap.pixel(x, y), [src[2], src[1], src[0], 255], "pixel {},{}", x, y);
        }
    }
}

#[test]
fn gray_is_expanded_to_bgra()
{
    let (width, height) = (16, 9);
    let data = encode(&noise(width * height), 16, 9, ColorType::Luma, false, None);
    let expected = reference(&data);

    let bitmap = image_from_data(&data).expect("grayscale image");

    assert_eq!(bitmap.pixel_format(), PixelFormat::Bgra32);
    for y in 0..height
    {
        for x in 0..width
        {
            let gray = expected[y * width + x];

            assert_eq!(bitmap.pixel(x, y), [gray, gray, gray, 255]);
        }
    }
}

#[test]
fn cmyk_is_inverted()
{
    let (width, height) = (8, 8);
    let data = encode(&noise(width * height * 4), 8, 8, ColorType::Cmyk, false, None);
    let expected = reference(&data);

    let bitmap = image_from_data(&data).expect("cmyk image");

    assert_eq!(bitmap.pixel_format(), PixelFormat::Cmyk32);
    for y in 0..height
    {
        for x in 0..width
        {
            let src = &expected[(y * width + x) * 4..][..4];

            assert_eq!(
                bitmap.pixel(x, y),
                [255 - src[0], 255 - src[1], 255 - src[2], 255 - src[3]]
            );
        }
    }
}

#[test]
fn progressive_decodes_like_baseline()
{
    let pixels = noise(24 * 24 * 3);
    let data = encode(&pixels, 24, 24, ColorType::Rgb, true, None);
    let expected = reference(&data);

    let info = probe_header(&data, 96).unwrap();
    assert!(info.sof.is_progressive());

    let bitmap = image_from_data(&data).expect("progressive image");

    for (x, y) in [(0, 0), (5, 7), (23, 23)]
    {
        let src = &expected[(y * 24 + x) * 3..][..3];

        assert_eq!(bitmap.pixel(x, y), [src[2], src[1], src[0], 255]);
    }
}

#[test]
fn resolution_comes_from_jfif_density()
{
    let pixels = vec![200; 4 * 4 * 3];
    let density = Density::Inch { x: 300, y: 150 };
    let data = encode(&pixels, 4, 4, ColorType::Rgb, false, Some(density));

    assert_eq!(image_from_data(&data).unwrap().resolution(), (300.0, 150.0));

    let data = encode(&pixels, 4, 4, ColorType::Rgb, false, Some(Density::None));
    let options = DecoderOptions::default().set_default_dpi(72);

    assert_eq!(image_from_data(&data).unwrap().resolution(), (96.0, 96.0));
    assert_eq!(
        image_from_data_with_options(&data, &options).unwrap().resolution(),
        (72.0, 72.0)
    );
}

#[test]
fn solid_color_survives()
{
    let mut pixels = Vec::new();
    for _ in 0..4
    {
        pixels.extend_from_slice(&[255, 0, 0]);
    }
    let data = encode(&pixels, 2, 2, ColorType::Rgb, false, None);

    let info = probe_header(&data, 96).unwrap();
    assert_eq!((info.width, info.height, info.colorspace), (2, 2, ColorSpace::RGB));

    let bitmap = image_from_data(&data).unwrap();

    for y in 0..2
    {
        for x in 0..2
        {
            let [b, g, r, a] = bitmap.pixel(x, y);

            assert!(b < 24 && g < 24 && r > 230, "{:?}", (b, g, r));
            assert_eq!(a, 255);
        }
    }
}

#[test]
fn every_call_returns_an_independent_bitmap()
{
    let data = encode(&noise(10 * 10 * 3), 10, 10, ColorType::Rgb, false, None);

    let mut first = image_from_data(&data).unwrap();
    let second = image_from_data(&data).unwrap();

    for y in 0..10
    {
        assert_eq!(first.row(y), second.row(y));
    }
    {
        let mut bits = first
            .lock_bits(Rect::new(0, 0, 1, 1), LockMode::Write, PixelFormat::Bgra32)
            .unwrap();
        bits.row_mut(0).unwrap().copy_from_slice(&[1, 2, 3, 4]);
    }
    assert_eq!(first.pixel(0, 0), [1, 2, 3, 4]);
    assert_eq!(second.pixel(0, 0)[3], 255);
}

#[test]
fn stride_alignment_does_not_change_pixels()
{
    let data = encode(&noise(13 * 5 * 3), 13, 5, ColorType::Rgb, false, None);
    let options = DecoderOptions::default().set_stride_alignment(64);

    let packed = image_from_data(&data).unwrap();
    let padded = image_from_data_with_options(&data, &options).unwrap();

    for y in 0..5
    {
        assert_eq!(packed.row(y), padded.row(y));
    }
}
