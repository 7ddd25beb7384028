//! The output container
//!
//! A [`Bitmap`] is a block of 32 bit pixels whose rows may be padded, so
//! code writing into it has to step by [`Bitmap::stride`] and not by
//! `width * 4`.
use std::fmt;

use crate::errors::DecodeErrors;

/// Bytes every pixel occupies, whatever the format
pub const BYTES_PER_PIXEL: usize = 4;

/// Layout of a single pixel
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PixelFormat
{
    /// Blue, green, red, alpha. One byte each, in memory order.
    Bgra32,
    /// Cyan, magenta, yellow, key. One byte each, in memory order.
    Cmyk32,
}

/// A rectangle in pixels, origin at the top left
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Rect
{
    /// Left edge
    pub x: usize,
    /// Top edge
    pub y: usize,
    /// Width in pixels
    pub width: usize,
    /// Height in pixels
    pub height: usize,
}

impl Rect
{
    /// A `width` by `height` rectangle whose top left corner is `(x, y)`
    #[must_use]
    pub const fn new(x: usize, y: usize, width: usize, height: usize) -> Rect
    {
        Rect { x, y, width, height }
    }

    fn fits_in(&self, width: usize, height: usize) -> bool
    {
        self.width != 0
            && self.height != 0
            && self.x.checked_add(self.width).map_or(false, |end| end <= width)
            && self.y.checked_add(self.height).map_or(false, |end| end <= height)
    }
}

/// What a lock is going to be used for
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LockMode
{
    /// Pixels will only be read
    Read,
    /// Pixels will only be written
    Write,
    /// Both
    ReadWrite,
}

impl LockMode
{
    fn writable(self) -> bool
    {
        matches!(self, LockMode::Write | LockMode::ReadWrite)
    }
}

/// A 32 bit per pixel image
pub struct Bitmap
{
    width: usize,
    height: usize,
    stride: usize,
    format: PixelFormat,
    x_resolution: f32,
    y_resolution: f32,
    pixels: Vec<u8>,
}

impl Bitmap
{
    /// Allocate a zeroed bitmap whose rows are 4 byte aligned
    ///
    /// # Errors
    /// `Allocation` if a dimension is zero or the buffer cannot be reserved
    pub fn new(width: usize, height: usize, format: PixelFormat) -> Result<Bitmap, DecodeErrors>
    {
        Bitmap::with_stride_alignment(width, height, format, BYTES_PER_PIXEL)
    }

    /// Allocate a zeroed bitmap whose row stride is a multiple of `alignment`
    ///
    /// # Errors
    /// `Allocation` if a dimension is zero, `alignment` is not a power of
    /// two, the size overflows or the buffer cannot be reserved
    pub fn with_stride_alignment(
        width: usize, height: usize, format: PixelFormat, alignment: usize,
    ) -> Result<Bitmap, DecodeErrors>
    {
        if width == 0 || height == 0
        {
            return Err(DecodeErrors::Allocation(format!(
                "Cannot allocate a {}x{} bitmap",
                width, height
            )));
        }
        if !alignment.is_power_of_two()
        {
            return Err(DecodeErrors::Allocation(format!(
                "Stride alignment {} is not a power of two",
                alignment
            )));
        }
        let overflow = || {
            DecodeErrors::Allocation(format!("A {}x{} bitmap overflows usize", width, height))
        };
        let stride = width
            .checked_mul(BYTES_PER_PIXEL)
            .and_then(|row| row.checked_add(alignment - 1))
            .map(|row| row & !(alignment - 1))
            .ok_or_else(overflow)?;
        let size = stride.checked_mul(height).ok_or_else(overflow)?;

        let mut pixels = Vec::new();
        pixels.try_reserve_exact(size).map_err(|e| {
            DecodeErrors::Allocation(format!("Could not reserve {} bytes: {}", size, e))
        })?;
        pixels.resize(size, 0);

        trace!("Allocated {}x{} {:?} bitmap, stride {}", width, height, format, stride);

        Ok(Bitmap {
            width,
            height,
            stride,
            format,
            x_resolution: 0.0,
            y_resolution: 0.0,
            pixels,
        })
    }

    /// Width in pixels
    #[must_use]
    pub const fn width(&self) -> usize
    {
        self.width
    }
    /// Height in pixels
    #[must_use]
    pub const fn height(&self) -> usize
    {
        self.height
    }
    /// Distance in bytes between the start of two rows
    #[must_use]
    pub const fn stride(&self) -> usize
    {
        self.stride
    }
    /// Layout of every pixel
    #[must_use]
    pub const fn pixel_format(&self) -> PixelFormat
    {
        self.format
    }

    /// Set horizontal and vertical resolution, in dots per inch
    pub fn set_resolution(&mut self, x: f32, y: f32)
    {
        self.x_resolution = x;
        self.y_resolution = y;
    }

    /// Horizontal and vertical resolution, in dots per inch
    #[must_use]
    pub const fn resolution(&self) -> (f32, f32)
    {
        (self.x_resolution, self.y_resolution)
    }

    /// Pixels of row `y`, without the padding
    ///
    /// # Panics
    /// If `y` is not less than the height
    #[must_use]
    pub fn row(&self, y: usize) -> &[u8]
    {
        assert!(y < self.height, "row {} out of bounds", y);
        let start = y * self.stride;

        &self.pixels[start..start + self.width * BYTES_PER_PIXEL]
    }

    /// The four bytes of pixel `(x, y)`
    ///
    /// # Panics
    /// If the pixel lies outside the bitmap
    #[must_use]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4]
    {
        assert!(x < self.width, "column {} out of bounds", x);
        let start = x * BYTES_PER_PIXEL;
        let row = self.row(y);

        [row[start], row[start + 1], row[start + 2], row[start + 3]]
    }

    /// Lock a region for direct access
    ///
    /// The region is unlocked when the returned guard is dropped.
    ///
    /// # Errors
    /// `Lock` if the region is empty or out of bounds, or `format` is not the
    /// format of this bitmap
    pub fn lock_bits(
        &mut self, rect: Rect, mode: LockMode, format: PixelFormat,
    ) -> Result<BitmapData<'_>, DecodeErrors>
    {
        if !rect.fits_in(self.width, self.height)
        {
            return Err(DecodeErrors::Lock(format!(
                "{:?} does not fit in a {}x{} bitmap",
                rect, self.width, self.height
            )));
        }
        if format != self.format
        {
            return Err(DecodeErrors::Lock(format!(
                "Cannot lock a {:?} bitmap as {:?}",
                self.format, format
            )));
        }
        trace!("Locking {:?} for {:?}", rect, mode);

        Ok(BitmapData {
            rect,
            mode,
            stride: self.stride,
            pixels: &mut self.pixels,
        })
    }

    /// Copy a region into a new, independent bitmap
    ///
    /// The copy carries the resolution of this bitmap.
    ///
    /// # Errors
    /// `Lock` if the region does not fit or the format differs,
    /// `Allocation` if the copy cannot be allocated
    pub fn clone_region(&self, rect: Rect, format: PixelFormat) -> Result<Bitmap, DecodeErrors>
    {
        if !rect.fits_in(self.width, self.height)
        {
            return Err(DecodeErrors::Lock(format!(
                "{:?} does not fit in a {}x{} bitmap",
                rect, self.width, self.height
            )));
        }
        if format != self.format
        {
            return Err(DecodeErrors::Lock(format!(
                "Cannot clone a {:?} bitmap as {:?}",
                self.format, format
            )));
        }
        let mut clone = Bitmap::new(rect.width, rect.height, format)?;
        clone.set_resolution(self.x_resolution, self.y_resolution);

        let row_bytes = rect.width * BYTES_PER_PIXEL;
        let offset = rect.x * BYTES_PER_PIXEL;

        for y in 0..rect.height
        {
            let src = (rect.y + y) * self.stride + offset;
            let dst = y * clone.stride;

            clone.pixels[dst..dst + row_bytes].copy_from_slice(&self.pixels[src..src + row_bytes]);
        }
        Ok(clone)
    }
}

impl fmt::Debug for Bitmap
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.debug_struct("Bitmap")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("stride", &self.stride)
            .field("format", &self.format)
            .field("resolution", &(self.x_resolution, self.y_resolution))
            .finish()
    }
}

/// A locked region of a [`Bitmap`]
///
/// Rows are indexed relative to the locked rectangle.
pub struct BitmapData<'a>
{
    rect: Rect,
    mode: LockMode,
    stride: usize,
    pixels: &'a mut [u8],
}

impl<'a> BitmapData<'a>
{
    /// Width of the locked region
    #[must_use]
    pub const fn width(&self) -> usize
    {
        self.rect.width
    }
    /// Height of the locked region
    #[must_use]
    pub const fn height(&self) -> usize
    {
        self.rect.height
    }
    /// Stride of the bitmap the region belongs to
    #[must_use]
    pub const fn stride(&self) -> usize
    {
        self.stride
    }

    fn row_range(&self, y: usize) -> std::ops::Range<usize>
    {
        let start = (self.rect.y + y) * self.stride + self.rect.x * BYTES_PER_PIXEL;

        start..start + self.rect.width * BYTES_PER_PIXEL
    }

    /// Pixels of row `y` of the locked region
    ///
    /// # Panics
    /// If `y` is not less than the locked height
    #[must_use]
    pub fn row(&self, y: usize) -> &[u8]
    {
        assert!(y < self.rect.height, "row {} out of bounds", y);
        &self.pixels[self.row_range(y)]
    }

    /// Writable pixels of row `y` of the locked region
    ///
    /// # Errors
    /// `Lock` if the region was locked for reading only
    ///
    /// # Panics
    /// If `y` is not less than the locked height
    pub fn row_mut(&mut self, y: usize) -> Result<&mut [u8], DecodeErrors>
    {
        assert!(y < self.rect.height, "row {} out of bounds", y);
        if !self.mode.writable()
        {
            return Err(DecodeErrors::Lock("Region was locked read only".to_string()));
        }
        let range = self.row_range(y);

        Ok(&mut self.pixels[range])
    }
}

impl<'a> Drop for BitmapData<'a>
{
    fn drop(&mut self)
    {
        trace!("Unlocking {:?}", self.rect);
    }
}
