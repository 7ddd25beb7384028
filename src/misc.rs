//! Constants and small helpers shared by the header probe and the converter
use std::fmt;

use crate::errors::DecodeErrors;

/// Start of image, these are the first two bytes in the Image
pub const START_OF_IMAGE: u16 = 0xffd8;
/// Start of baseline DCT Huffman coding
pub const START_OF_FRAME_BASE: u16 = 0xffc0;
/// Start of another frame
pub const START_OF_FRAME_EXT_SEQ: u16 = 0xffc1;
/// Start of progressive DCT encoding
pub const START_OF_FRAME_PROG_DCT: u16 = 0xffc2;
/// Start of losless sequential Huffman coding
pub const START_OF_FRAME_LOS_SEQ: u16 = 0xffc3;
/// Start of extended sequential DCT arithmetic coding
pub const START_OF_FRAME_EXT_AR: u16 = 0xffc9;
/// Start of Progressive DCT arithmetic coding
pub const START_OF_FRAME_PROG_DCT_AR: u16 = 0xffca;
/// Start of Lossless sequential Arithmetic coding
pub const START_OF_FRAME_LOS_SEQ_AR: u16 = 0xffcb;

/// Smallest buffer we are willing to look at.
pub const MIN_INPUT_LEN: usize = 8;
/// Largest buffer we are willing to look at, the decoder
/// addresses its input with a signed 32 bit length.
pub const MAX_INPUT_LEN: usize = i32::MAX as usize;

/// Largest number of pixels a bitmap is allocated for by default.
pub const MAX_DIMENSIONS: usize = 1 << 27;

/// Resolution assumed when the image does not declare one
pub const DEFAULT_DPI: u32 = 96;

/// Colorspace of the decoded (not the output) pixel data.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[allow(clippy::upper_case_acronyms)]
pub enum ColorSpace
{
    /// Three channels, red green blue
    RGB,
    /// A single luminance channel
    GRAYSCALE,
    /// Four channels, cyan magenta yellow key
    CMYK,
    /// Anything the converter cannot map to an output format
    Unknown,
}

impl ColorSpace
{
    /// Colorspace implied by the number of components in a frame header
    #[must_use]
    pub const fn from_components(components: u8) -> ColorSpace
    {
        match components
        {
            1 => ColorSpace::GRAYSCALE,
            3 => ColorSpace::RGB,
            4 => ColorSpace::CMYK,
            _ => ColorSpace::Unknown,
        }
    }

    /// Number of bytes a single pixel occupies in the decoded stream
    ///
    /// Returns `None` for [`ColorSpace::Unknown`]
    #[must_use]
    pub const fn num_components(self) -> Option<usize>
    {
        match self
        {
            ColorSpace::RGB => Some(3),
            ColorSpace::GRAYSCALE => Some(1),
            ColorSpace::CMYK => Some(4),
            ColorSpace::Unknown => None,
        }
    }
}

/// Markers that identify different Start of Frame markers
/// They identify the type of encoding and whether the file use lossy(DCT) or lossless
/// compression and whether we use Huffman or arithmetic coding schemes
#[derive(Eq, PartialEq, Copy, Clone)]
#[allow(clippy::upper_case_acronyms)]
pub enum SOFMarkers
{
    /// Baseline DCT markers
    BaselineDct,
    /// SOF_1 Extended sequential DCT,Huffman coding
    ExtendedSequentialHuffman,
    /// Progressive DCT, Huffman coding
    ProgressiveDctHuffman,
    /// Lossless (sequential), huffman coding,
    LosslessHuffman,
    /// Extended sequential DEC, arithmetic coding
    ExtendedSequentialDctArithmetic,
    /// Progressive DCT, arithmetic coding,
    ProgressiveDctArithmetic,
    /// Lossless ( sequential), arithmetic coding
    LosslessArithmetic,
}

impl Default for SOFMarkers
{
    fn default() -> Self
    {
        Self::BaselineDct
    }
}

impl SOFMarkers
{
    /// Check if a marker uses arithmetic entropy coding
    #[must_use]
    pub fn is_arithmetic(self) -> bool
    {
        matches!(
            self,
            Self::ExtendedSequentialDctArithmetic
                | Self::ProgressiveDctArithmetic
                | Self::LosslessArithmetic
        )
    }
    /// Check if a marker is a Lossles type or not
    #[must_use]
    pub fn is_lossless(self) -> bool
    {
        matches!(self, Self::LosslessHuffman | Self::LosslessArithmetic)
    }
    /// Check whether a marker is a progressive marker or not
    #[must_use]
    pub fn is_progressive(self) -> bool
    {
        matches!(
            self,
            Self::ProgressiveDctHuffman | Self::ProgressiveDctArithmetic
        )
    }
    /// Map a start of frame marker code (`0xffc0`...) to its coding process
    #[must_use]
    pub fn from_int(int: u16) -> Option<SOFMarkers>
    {
        match int
        {
            START_OF_FRAME_BASE => Some(Self::BaselineDct),
            START_OF_FRAME_PROG_DCT => Some(Self::ProgressiveDctHuffman),
            START_OF_FRAME_PROG_DCT_AR => Some(Self::ProgressiveDctArithmetic),
            START_OF_FRAME_LOS_SEQ => Some(Self::LosslessHuffman),
            START_OF_FRAME_LOS_SEQ_AR => Some(Self::LosslessArithmetic),
            START_OF_FRAME_EXT_SEQ => Some(Self::ExtendedSequentialHuffman),
            START_OF_FRAME_EXT_AR => Some(Self::ExtendedSequentialDctArithmetic),
            _ => None,
        }
    }
}

impl fmt::Debug for SOFMarkers
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result
    {
        match &self
        {
            Self::BaselineDct => write!(f, "Baseline DCT"),
            Self::ExtendedSequentialHuffman =>
            {
                write!(f, "Extended sequential DCT, Huffman Coding")
            }
            Self::ProgressiveDctHuffman => write!(f, "Progressive DCT,Huffman Encoding"),
            Self::LosslessHuffman => write!(f, "Lossless (sequential) Huffman encoding"),
            Self::ExtendedSequentialDctArithmetic =>
            {
                write!(f, "Extended sequential DCT, arithmetic coding")
            }
            Self::ProgressiveDctArithmetic => write!(f, "Progressive DCT, arithmetic coding"),
            Self::LosslessArithmetic => write!(f, "Lossless (sequential) arithmetic coding"),
        }
    }
}

/// A forward only reader over an in-memory JPEG.
///
/// Every read is bounds checked, running off the end of the
/// buffer is a [`DecodeErrors::Format`] error and never a panic.
pub(crate) struct ByteReader<'a>
{
    data: &'a [u8],
    position: usize,
}

impl<'a> ByteReader<'a>
{
    pub fn new(data: &'a [u8]) -> ByteReader<'a>
    {
        ByteReader { data, position: 0 }
    }

    pub fn remaining(&self) -> usize
    {
        self.data.len().saturating_sub(self.position)
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeErrors>
    {
        let byte = *self.data.get(self.position).ok_or_else(|| {
            DecodeErrors::Format(format!("No more bytes at offset {}", self.position))
        })?;
        self.position += 1;

        Ok(byte)
    }

    pub fn read_u16_be(&mut self) -> Result<u16, DecodeErrors>
    {
        let bytes = self.read_slice(2)?;

        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_slice(&mut self, len: usize) -> Result<&'a [u8], DecodeErrors>
    {
        let end = self.position.checked_add(len).filter(|end| *end <= self.data.len());

        match end
        {
            Some(end) =>
            {
                let slice = &self.data[self.position..end];
                self.position = end;
                Ok(slice)
            }
            None => Err(DecodeErrors::Format(format!(
                "Wanted {} bytes at offset {}, only {} remain",
                len,
                self.position,
                self.remaining()
            ))),
        }
    }

    pub fn skip(&mut self, len: usize) -> Result<(), DecodeErrors>
    {
        self.read_slice(len).map(|_| ())
    }
}
