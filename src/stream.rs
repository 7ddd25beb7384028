//! Pull based access to decoded pixels
//!
//! The converter never sees a whole decoded image, it asks a [`PixelStream`]
//! for one pixel worth of channels at a time, in raster order.
use std::io::{Cursor, ErrorKind, Read};

use jpeg_decoder::{ColorTransform, Decoder};

use crate::errors::DecodeErrors;

/// A forward only cursor over decoded pixel data
pub trait PixelStream
{
    /// Fill `out` with the next decoded bytes
    ///
    /// Returns how many bytes were written, this is less than `out.len()`
    /// only when the stream has run dry.
    ///
    /// # Errors
    /// If decoding the underlying data fails
    fn read_pixels(&mut self, out: &mut [u8]) -> Result<usize, DecodeErrors>;
}

impl<R: Read> PixelStream for R
{
    fn read_pixels(&mut self, out: &mut [u8]) -> Result<usize, DecodeErrors>
    {
        let mut filled = 0;

        while filled < out.len()
        {
            match self.read(&mut out[filled..])
            {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(DecodeErrors::Format(format!("Pixel stream failed: {}", e))),
            }
        }
        Ok(filled)
    }
}

/// Parameters for the DCT stream adapter
///
/// The default leaves every decision to the entropy decoder.
#[derive(Clone, Debug, Default)]
pub struct DctParams
{
    /// Force a color transform instead of the one implied by the
    /// JFIF/Adobe markers
    pub color_transform: Option<ColorTransform>,
}

/// A byte cursor over a buffer already in memory
#[must_use]
pub fn open_memory(data: &[u8]) -> Cursor<&[u8]>
{
    Cursor::new(data)
}

/// Decodes a baseline or progressive DCT stream, pixels are produced in the
/// colorspace the image was encoded in (gray, RGB or CMYK)
///
/// Entropy decoding happens on the first read.
pub struct DctStream<'a>
{
    decoder: Option<Decoder<Cursor<&'a [u8]>>>,
    decoded: Cursor<Vec<u8>>,
}

impl<'a> DctStream<'a>
{
    /// Wrap a byte cursor, nothing is decoded until the first read
    #[must_use]
    pub fn new(source: Cursor<&'a [u8]>, params: DctParams) -> DctStream<'a>
    {
        let mut decoder = Decoder::new(source);

        if let Some(transform) = params.color_transform
        {
            decoder.set_color_transform(transform);
        }

        DctStream {
            decoder: Some(decoder),
            decoded: Cursor::new(Vec::new()),
        }
    }
}

impl<'a> PixelStream for DctStream<'a>
{
    fn read_pixels(&mut self, out: &mut [u8]) -> Result<usize, DecodeErrors>
    {
        if let Some(mut decoder) = self.decoder.take()
        {
            let pixels = decoder.decode()?;

            if let Some(info) = decoder.info()
            {
                debug!(
                    "Decoded {} bytes of {:?} for a {}x{} image",
                    pixels.len(),
                    info.pixel_format,
                    info.width,
                    info.height
                );
            }
            self.decoded = Cursor::new(pixels);
        }
        self.decoded.read_pixels(out)
    }
}

impl<'a> Drop for DctStream<'a>
{
    fn drop(&mut self)
    {
        let position = usize::try_from(self.decoded.position()).unwrap_or(usize::MAX);
        let unread = self.decoded.get_ref().len().saturating_sub(position);

        trace!("Closing pixel stream, {} decoded bytes unread", unread);
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    /// A reader that hands out a single byte per call
    struct Trickle<'a>(&'a [u8]);

    impl<'a> Read for Trickle<'a>
    {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize>
        {
            match self.0.split_first()
            {
                Some((first, rest)) if !buf.is_empty() =>
                {
                    buf[0] = *first;
                    self.0 = rest;
                    Ok(1)
                }
                _ => Ok(0),
            }
        }
    }

    #[test]
    fn short_reads_are_stitched_together()
    {
        let mut stream = Trickle(&[1, 2, 3, 4, 5]);
        let mut out = [0; 3];

        assert_eq!(stream.read_pixels(&mut out).unwrap(), 3);
        assert_eq!(out, [1, 2, 3]);
        assert_eq!(stream.read_pixels(&mut out).unwrap(), 2);
        assert_eq!(&out[..2], &[4, 5]);
        assert_eq!(stream.read_pixels(&mut out).unwrap(), 0);
    }

    fn drain(stream: &mut DctStream) -> Vec<u8>
    {
        let mut pixels = Vec::new();
        let mut chunk = [0; 64];

        loop
        {
            let n = stream.read_pixels(&mut chunk).unwrap();
            pixels.extend_from_slice(&chunk[..n]);

            if n < chunk.len()
            {
                return pixels;
            }
        }
    }

    #[test]
    fn color_transform_override_reaches_the_decoder()
    {
        let rgb: Vec<u8> = (0..16 * 16 * 3).map(|i| (i * 37 % 256) as u8).collect();
        let mut data = Vec::new();
        jpeg_encoder::Encoder::new(&mut data, 90)
            .encode(&rgb, 16, 16, jpeg_encoder::ColorType::Rgb)
            .unwrap();

        let mut converted = DctStream::new(open_memory(&data), DctParams::default());
        let converted = drain(&mut converted);

        let params = DctParams {
            color_transform: Some(ColorTransform::None),
        };
        let mut raw = DctStream::new(open_memory(&data), params);
        let raw = drain(&mut raw);

        assert_eq!(converted.len(), 16 * 16 * 3);
        assert_eq!(raw.len(), converted.len());
        // without the YCbCr conversion the samples come out untouched
        assert_ne!(raw, converted);
        assert_eq!(converted, jpeg_decoder::Decoder::new(&data[..]).decode().unwrap());
    }

    #[test]
    fn garbage_fails_on_first_read()
    {
        let data = [0xFF, 0xD8, 0xFF, 0xD9, 0, 0, 0, 0];
        let mut stream = DctStream::new(open_memory(&data), DctParams::default());
        let mut out = [0; 3];

        assert!(matches!(
            stream.read_pixels(&mut out),
            Err(DecodeErrors::Decoder(_))
        ));
    }
}
