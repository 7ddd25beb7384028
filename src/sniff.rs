//! Entry points, checking a buffer before anything is allocated for it
use crate::backend::{DctBackend, JpegBackend};
use crate::bitmap::Bitmap;
use crate::context::Context;
use crate::decoder::decode_jpeg;
use crate::errors::DecodeErrors;
use crate::misc::{MAX_INPUT_LEN, MIN_INPUT_LEN, START_OF_IMAGE};
use crate::options::DecoderOptions;

/// Decode a JPEG held in memory into a 32 bit bitmap
///
/// Returns `None` for anything that is not a JPEG we can decode, use
/// [`try_image_from_data`] to learn why.
#[must_use]
pub fn image_from_data(data: &[u8]) -> Option<Bitmap>
{
    image_from_data_with_options(data, &DecoderOptions::default())
}

/// Same as [`image_from_data`], with custom options
#[must_use]
pub fn image_from_data_with_options(data: &[u8], options: &DecoderOptions) -> Option<Bitmap>
{
    match decode_with(DctBackend, options, data)
    {
        Ok(bitmap) => Some(bitmap),
        Err(e) =>
        {
            debug!("Could not decode image: {}", e);
            None
        }
    }
}

/// Decode a JPEG held in memory, reporting why decoding failed
///
/// # Errors
/// See [`DecodeErrors`], every variant can be returned from here.
pub fn try_image_from_data(data: &[u8]) -> Result<Bitmap, DecodeErrors>
{
    decode_with(DctBackend, &DecoderOptions::default(), data)
}

/// Decode `data` with a caller supplied backend
///
/// A decoding context is created only once `data` has passed the size
/// checks and is dropped before returning, on every path.
///
/// # Errors
///  - `TooSmall`/`TooLarge` - `data` is shorter than 8 bytes or longer
///    than `i32::MAX` bytes
///  - `Context` - the options are invalid
///  - `IllegalMagicBytes` - `data` does not start with `0xFFD8`
///  - anything the conversion itself returns
pub fn decode_with<B: JpegBackend>(
    backend: B, options: &DecoderOptions, data: &[u8],
) -> Result<Bitmap, DecodeErrors>
{
    check_input_len(data.len())?;

    let context = Context::with_backend(backend, *options)?;

    let magic_bytes = u16::from_be_bytes([data[0], data[1]]);
    if magic_bytes != START_OF_IMAGE
    {
        return Err(DecodeErrors::IllegalMagicBytes(magic_bytes));
    }
    decode_jpeg(&context, data)
}

/// Check that a buffer of `len` bytes is worth looking at
fn check_input_len(len: usize) -> Result<(), DecodeErrors>
{
    if len < MIN_INPUT_LEN
    {
        return Err(DecodeErrors::TooSmall(len));
    }
    if len > MAX_INPUT_LEN
    {
        return Err(DecodeErrors::TooLarge(len));
    }
    Ok(())
}
