//! Main image logic.
//!
//! Drives a [`JpegBackend`] and writes what it decodes into a [`Bitmap`],
//! reordering or inverting channels on the way.
#![allow(clippy::doc_markdown)]

use crate::backend::JpegBackend;
use crate::bitmap::{Bitmap, BitmapData, LockMode, PixelFormat, Rect, BYTES_PER_PIXEL};
use crate::context::Context;
use crate::errors::DecodeErrors;
use crate::misc::ColorSpace;
use crate::stream::{DctParams, PixelStream};

/// Output pixel format for pixels decoded in `colorspace`
///
/// - RGB and grayscale become [`PixelFormat::Bgra32`] with an opaque alpha
/// - CMYK becomes [`PixelFormat::Cmyk32`] with every channel inverted
/// - anything else has no output format
#[must_use]
pub fn output_format(colorspace: ColorSpace) -> Option<PixelFormat>
{
    match colorspace
    {
        ColorSpace::RGB | ColorSpace::GRAYSCALE => Some(PixelFormat::Bgra32),
        ColorSpace::CMYK => Some(PixelFormat::Cmyk32),
        ColorSpace::Unknown => None,
    }
}

/// Decode a JPEG already known to start with the SOI marker
///
/// The returned bitmap is a copy of the one pixels were written into.
///
/// # Errors
///  - `UnsupportedColorSpace` - the headers could not be read, or the image
///    is not gray, RGB or CMYK
///  - `Allocation`/`Lock` - no bitmap could be set up for the image
///  - `InsufficientData`/`Decoder` - the pixel stream ended early or failed
#[allow(clippy::cast_precision_loss)]
pub(crate) fn decode_jpeg<B: JpegBackend>(
    ctx: &Context<B>, data: &[u8],
) -> Result<Bitmap, DecodeErrors>
{
    let options = ctx.options();

    // A failed probe is not reported as such, the image simply ends up with
    // no colorspace and is refused below.
    let opened = ctx
        .backend()
        .probe_header(data, options.get_default_dpi())
        .and_then(|info| {
            let stream = ctx.backend().open_pixel_stream(data, DctParams::default())?;
            Ok((info, stream))
        });
    let (colorspace, opened) = match opened
    {
        Ok((info, stream)) => (info.colorspace, Some((info, stream))),
        Err(e) =>
        {
            warn!("Could not read image headers: {}", e);
            (ColorSpace::Unknown, None)
        }
    };

    let (format, channels, info, mut stream) =
        match (output_format(colorspace), colorspace.num_components(), opened)
        {
            (Some(format), Some(channels), Some((info, stream))) => (format, channels, info, stream),
            _ =>
            {
                debug!("No output format for colorspace {:?}", colorspace);
                return Err(DecodeErrors::UnsupportedColorSpace(colorspace));
            }
        };
    debug!(
        "Decoding {}x{} {:?} image into {:?}, resolution {}x{}",
        info.width, info.height, colorspace, format, info.x_resolution, info.y_resolution
    );

    let (width, height) = (usize::from(info.width), usize::from(info.height));

    if width > options.get_max_width() || height > options.get_max_height()
    {
        return Err(DecodeErrors::Allocation(format!(
            "Image dimensions {}x{} exceed the limit of {}x{}",
            width,
            height,
            options.get_max_width(),
            options.get_max_height()
        )));
    }
    if width.checked_mul(height).map_or(true, |pixels| pixels > options.get_max_pixels())
    {
        return Err(DecodeErrors::Allocation(format!(
            "Image of {}x{} pixels exceeds the limit of {} pixels",
            width,
            height,
            options.get_max_pixels()
        )));
    }
    let mut bitmap =
        Bitmap::with_stride_alignment(width, height, format, options.get_stride_alignment())?;
    bitmap.set_resolution(info.x_resolution as f32, info.y_resolution as f32);

    let rect = Rect::new(0, 0, width, height);
    let filled = {
        let mut bits = bitmap.lock_bits(rect, LockMode::Write, format)?;

        fill_pixels(&mut bits, &mut *stream, colorspace, channels)
    };
    // everything is released before looking at how the fill went
    drop(stream);
    drop(info);

    filled?;

    bitmap.clone_region(rect, format)
}

/// Pull one pixel at a time out of `stream` and write it into `bits`
fn fill_pixels<S: PixelStream + ?Sized>(
    bits: &mut BitmapData, stream: &mut S, colorspace: ColorSpace, channels: usize,
) -> Result<(), DecodeErrors>
{
    for y in 0..bits.height()
    {
        let row = bits.row_mut(y)?;

        for pixel in row.chunks_exact_mut(BYTES_PER_PIXEL)
        {
            let found = stream.read_pixels(&mut pixel[..channels])?;

            if found != channels
            {
                return Err(DecodeErrors::InsufficientData {
                    expected: channels,
                    found,
                });
            }
            convert_pixel(colorspace, pixel);
        }
    }
    Ok(())
}

/// Rewrite a freshly decoded pixel in place
///
/// `pixel` holds 4 bytes, of which the first `channels` came from the stream.
#[inline]
fn convert_pixel(colorspace: ColorSpace, pixel: &mut [u8])
{
    match colorspace
    {
        // RGB -> BGRA
        ColorSpace::RGB =>
        {
            pixel.swap(0, 2);
            pixel[3] = 0xFF;
        }
        // gray -> BGRA
        ColorSpace::GRAYSCALE =>
        {
            pixel[1] = pixel[0];
            pixel[2] = pixel[0];
            pixel[3] = 0xFF;
        }
        ColorSpace::CMYK =>
        {
            for channel in pixel.iter_mut()
            {
                *channel = 255 - *channel;
            }
        }
        ColorSpace::Unknown => (),
    }
}
