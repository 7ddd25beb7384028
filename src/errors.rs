//! Contains most common errors that may be encountered while turning a JPEG
//! into a bitmap
//!
//! Every error here collapses to `None` at [`image_from_data`](crate::image_from_data),
//! use [`try_image_from_data`](crate::try_image_from_data) to see the cause.
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

use crate::misc::{ColorSpace, SOFMarkers};

/// Common Decode errors
#[allow(clippy::module_name_repetitions)]
pub enum DecodeErrors
{
    /// Input buffer is shorter than the smallest JPEG we look at
    TooSmall(usize),
    /// Input buffer is larger than what the decoder can address
    TooLarge(usize),
    /// Illegal Magic Bytes
    IllegalMagicBytes(u16),
    /// The decoding context could not be created
    Context(String),
    /// Problems with the image headers
    Format(String),
    /// Start of frame errors
    SofError(String),
    /// UnsupportedImages
    Unsupported(UnsupportedSchemes),
    /// The probed colorspace has no output pixel format
    UnsupportedColorSpace(ColorSpace),
    /// The output bitmap could not be allocated
    Allocation(String),
    /// The output bitmap could not be locked for writing
    Lock(String),
    /// The pixel stream ended before the image was filled
    InsufficientData
    {
        /// Bytes needed for the pixel being written
        expected: usize,
        /// Bytes the stream actually produced
        found: usize,
    },
    /// The entropy decoder gave up on the stream
    Decoder(jpeg_decoder::Error),
}

impl Display for DecodeErrors
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result
    {
        match &self
        {
            Self::TooSmall(len) => write!(f, "Buffer of {} bytes is too small to be an image", len),
            Self::TooLarge(len) => write!(f, "Buffer of {} bytes is too large to decode", len),
            Self::IllegalMagicBytes(bytes) =>
            {
                write!(f, "Error parsing image. Illegal start bytes:{:X}", bytes)
            }
            Self::Context(ref reason) =>
            {
                write!(f, "Could not create a decoding context. Reason:{}", reason)
            }
            Self::Format(ref reason) => write!(f, "{}", reason),
            Self::SofError(ref reason) => write!(f, "Error parsing SOF segment. Reason:{}", reason),
            Self::Unsupported(ref image_type) => write!(f, "{:?}", image_type),
            Self::UnsupportedColorSpace(colorspace) =>
            {
                write!(f, "No output pixel format for colorspace {:?}", colorspace)
            }
            Self::Allocation(ref reason) =>
            {
                write!(f, "Could not allocate output bitmap. Reason:{}", reason)
            }
            Self::Lock(ref reason) => write!(f, "Could not lock bitmap bits. Reason:{}", reason),
            Self::InsufficientData { expected, found } => write!(
                f,
                "Insufficient data for image, wanted {} bytes for a pixel but got {}",
                expected, found
            ),
            Self::Decoder(ref err) => write!(f, "Error decoding image data. Reason:{}", err),
        }
    }
}

impl Debug for DecodeErrors
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result
    {
        Display::fmt(self, f)
    }
}

impl Error for DecodeErrors
{
    fn source(&self) -> Option<&(dyn Error + 'static)>
    {
        match self
        {
            Self::Decoder(err) => Some(err),
            _ => None,
        }
    }
}

impl From<jpeg_decoder::Error> for DecodeErrors
{
    fn from(err: jpeg_decoder::Error) -> Self
    {
        DecodeErrors::Decoder(err)
    }
}

/// Contains Unsupported/Yet-to-be supported JPEG image encoding types.
#[derive(Eq, PartialEq, Copy, Clone)]
pub enum UnsupportedSchemes
{
    /// SOF_1 Extended sequential DCT,Huffman coding
    ExtendedSequentialHuffman,
    /// Lossless (sequential), huffman coding,
    LosslessHuffman,
    /// Extended sequential DEC, arithmetic coding
    ExtendedSequentialDctArithmetic,
    /// Progressive DCT, arithmetic coding,
    ProgressiveDctArithmetic,
    /// Lossless ( sequential), arithmetic coding
    LosslessArithmetic,
    /// Differential (hierarchical) frames, SOF5-7 and SOF13-15
    Hierarchical,
    /// Samples that are not 8 bits wide
    SamplePrecision(u8),
    /// Height is defined later by a DNL marker
    DefineNumberOfLines,
}

impl Debug for UnsupportedSchemes
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result
    {
        match &self
        {
            Self::ExtendedSequentialHuffman =>
            {
                write!(f, "The library cannot yet decode images encoded using Extended Sequential Huffman encoding scheme with 12 bit samples.")
            }
            Self::LosslessHuffman =>
            {
                write!(f, "The library cannot yet decode images encoded with Lossless Huffman encoding scheme")
            }
            Self::ExtendedSequentialDctArithmetic =>
            {
                write!(f, "The library cannot yet decode Images Encoded with Extended Sequential DCT Arithmetic scheme")
            }
            Self::ProgressiveDctArithmetic =>
            {
                write!(f, "The library cannot yet decode images encoded with Progressive DCT Arithmetic scheme")
            }
            Self::LosslessArithmetic =>
            {
                write!(f, "The library cannot yet decode images encoded with Lossless Arithmetic encoding scheme")
            }
            Self::Hierarchical =>
            {
                write!(f, "The library cannot decode hierarchical (differential) images")
            }
            Self::SamplePrecision(bits) =>
            {
                write!(f, "The library can only decode 8 bit samples, the image has {} bits", bits)
            }
            Self::DefineNumberOfLines =>
            {
                write!(f, "The library cannot decode images whose height is set by a DNL marker")
            }
        }
    }
}

impl UnsupportedSchemes
{
    /// Reject frames using a scheme the entropy decoder cannot handle
    #[must_use]
    pub fn from_frame(sof: SOFMarkers, precision: u8) -> Option<UnsupportedSchemes>
    {
        if sof.is_lossless() || sof.is_arithmetic()
        {
            return match sof
            {
                SOFMarkers::LosslessHuffman => Some(Self::LosslessHuffman),
                SOFMarkers::LosslessArithmetic => Some(Self::LosslessArithmetic),
                SOFMarkers::ProgressiveDctArithmetic => Some(Self::ProgressiveDctArithmetic),
                _ => Some(Self::ExtendedSequentialDctArithmetic),
            };
        }
        if precision != 8
        {
            if sof == SOFMarkers::ExtendedSequentialHuffman
            {
                return Some(Self::ExtendedSequentialHuffman);
            }
            return Some(Self::SamplePrecision(precision));
        }
        None
    }
}
