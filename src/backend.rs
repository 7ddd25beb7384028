use crate::errors::DecodeErrors;
use crate::image::ImageDescriptor;
use crate::probe::probe_header;
use crate::stream::{open_memory, DctParams, DctStream, PixelStream};

/// Something that can look inside a compressed JPEG
///
/// The converter only needs two things from a decoder: a cheap look at the
/// headers, and a stream of decoded channel groups in raster order.
pub trait JpegBackend
{
    /// Read dimensions, resolution and colorspace without decoding pixels
    ///
    /// # Errors
    /// If the headers are malformed or describe an image the backend cannot
    /// decode
    fn probe_header(&self, data: &[u8], default_dpi: u32)
        -> Result<ImageDescriptor, DecodeErrors>;

    /// Open a stream of decoded pixels over `data`
    ///
    /// # Errors
    /// If the stream cannot be set up
    fn open_pixel_stream<'a>(
        &self, data: &'a [u8], params: DctParams,
    ) -> Result<Box<dyn PixelStream + 'a>, DecodeErrors>;
}

/// The default backend
///
/// Headers are read by this crate, entropy coded data is decoded by
/// `jpeg-decoder`.
#[derive(Clone, Copy, Debug, Default)]
pub struct DctBackend;

impl JpegBackend for DctBackend
{
    fn probe_header(&self, data: &[u8], default_dpi: u32)
        -> Result<ImageDescriptor, DecodeErrors>
    {
        probe_header(data, default_dpi)
    }

    fn open_pixel_stream<'a>(
        &self, data: &'a [u8], params: DctParams,
    ) -> Result<Box<dyn PixelStream + 'a>, DecodeErrors>
    {
        Ok(Box::new(DctStream::new(open_memory(data), params)))
    }
}
