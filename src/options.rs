//! Knobs for a decode call
use crate::errors::DecodeErrors;
use crate::misc::{DEFAULT_DPI, MAX_DIMENSIONS};

/// Options handed to a [`Context`](crate::Context)
///
/// The defaults accept anything a baseline JPEG can describe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecoderOptions
{
    max_width: usize,
    max_height: usize,
    max_pixels: usize,
    stride_alignment: usize,
    default_dpi: u32,
}

impl Default for DecoderOptions
{
    fn default() -> Self
    {
        DecoderOptions {
            max_width: usize::from(u16::MAX),
            max_height: usize::from(u16::MAX),
            max_pixels: MAX_DIMENSIONS,
            stride_alignment: 4,
            default_dpi: DEFAULT_DPI,
        }
    }
}

impl DecoderOptions
{
    /// Widest image we are willing to allocate a bitmap for
    #[must_use]
    pub const fn set_max_width(mut self, width: usize) -> Self
    {
        self.max_width = width;
        self
    }
    /// Tallest image we are willing to allocate a bitmap for
    #[must_use]
    pub const fn set_max_height(mut self, height: usize) -> Self
    {
        self.max_height = height;
        self
    }
    /// Largest `width * height` we are willing to allocate a bitmap for
    ///
    /// A frame header is a handful of bytes, this stops one from asking for
    /// gigabytes before any pixel has been decoded.
    #[must_use]
    pub const fn set_max_pixels(mut self, pixels: usize) -> Self
    {
        self.max_pixels = pixels;
        self
    }
    /// Row stride of the output bitmap is rounded up to a multiple of this
    ///
    /// Must be a power of two no smaller than 4
    #[must_use]
    pub const fn set_stride_alignment(mut self, alignment: usize) -> Self
    {
        self.stride_alignment = alignment;
        self
    }
    /// Resolution reported for images that do not declare one
    #[must_use]
    pub const fn set_default_dpi(mut self, dpi: u32) -> Self
    {
        self.default_dpi = dpi;
        self
    }

    /// Widest image accepted
    #[must_use]
    pub const fn get_max_width(&self) -> usize
    {
        self.max_width
    }
    /// Tallest image accepted
    #[must_use]
    pub const fn get_max_height(&self) -> usize
    {
        self.max_height
    }
    /// Largest pixel count accepted
    #[must_use]
    pub const fn get_max_pixels(&self) -> usize
    {
        self.max_pixels
    }
    /// Row stride alignment of the working bitmap
    #[must_use]
    pub const fn get_stride_alignment(&self) -> usize
    {
        self.stride_alignment
    }
    /// Resolution reported for images that do not declare one
    #[must_use]
    pub const fn get_default_dpi(&self) -> u32
    {
        self.default_dpi
    }

    /// Check that the options describe something we can decode with
    ///
    /// # Errors
    /// `Context` naming the offending option
    pub fn validate(&self) -> Result<(), DecodeErrors>
    {
        if self.max_width == 0 || self.max_height == 0 || self.max_pixels == 0
        {
            return Err(DecodeErrors::Context(format!(
                "Maximum dimensions must be non zero, found {}x{} and {} pixels",
                self.max_width, self.max_height, self.max_pixels
            )));
        }
        if self.stride_alignment < 4 || !self.stride_alignment.is_power_of_two()
        {
            return Err(DecodeErrors::Context(format!(
                "Stride alignment must be a power of two no smaller than 4, found {}",
                self.stride_alignment
            )));
        }
        if self.default_dpi == 0
        {
            return Err(DecodeErrors::Context(
                "Default resolution must be non zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn defaults_are_valid()
    {
        assert!(DecoderOptions::default().validate().is_ok());
    }

    #[test]
    fn bad_stride_alignment()
    {
        for alignment in [0, 2, 6, 12]
        {
            let options = DecoderOptions::default().set_stride_alignment(alignment);

            assert!(matches!(options.validate(), Err(DecodeErrors::Context(_))));
        }
        let options = DecoderOptions::default().set_stride_alignment(64);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn default_pixel_cap_is_below_the_header_maximum()
    {
        let options = DecoderOptions::default();
        let largest_frame = usize::from(u16::MAX) * usize::from(u16::MAX);

        assert_eq!(options.get_max_pixels(), 1 << 27);
        assert!(options.get_max_pixels() < largest_frame);
    }

    #[test]
    fn zero_limits()
    {
        let options = DecoderOptions::default().set_max_width(0);

        assert!(options.validate().is_err());
        assert!(DecoderOptions::default().set_max_pixels(0).validate().is_err());
        assert!(DecoderOptions::default().set_default_dpi(0).validate().is_err());
    }
}
