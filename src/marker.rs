#![allow(clippy::upper_case_acronyms)]

/// JPEG markers, the byte following a `0xFF`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Marker
{
    /// Start Of Frame markers
    ///
    /// - SOF(0) : Baseline DCT (Huffman coding)
    /// - SOF(1) : Extended sequential DCT (Huffman coding)
    /// - SOF(2) : Progressive DCT (Huffman coding)
    /// - SOF(3) : Lossless (sequential) (Huffman coding)
    /// - SOF(5) : Differential sequential DCT (Huffman coding)
    /// - SOF(6) : Differential progressive DCT (Huffman coding)
    /// - SOF(7) : Differential lossless (Huffman coding)
    /// - SOF(9) : Extended sequential DCT (arithmetic coding)
    /// - SOF(10) : Progressive DCT (arithmetic coding)
    /// - SOF(11) : Lossless (sequential) (arithmetic coding)
    /// - SOF(13) : Differential sequential DCT (arithmetic coding)
    /// - SOF(14) : Differential progressive DCT (arithmetic coding)
    /// - SOF(15) : Differential lossless (arithmetic coding)
    SOF(u8),
    /// Define Huffman table(s)
    DHT,
    /// Define arithmetic coding conditioning(s)
    DAC,
    /// Restart with modulo 8 count `m`
    RST(u8),
    /// Start of image
    SOI,
    /// End of image
    EOI,
    /// Start of scan
    SOS,
    /// Define quantization table(s)
    DQT,
    /// Define number of lines
    DNL,
    /// Define restart interval
    DRI,
    /// Reserved for application segments
    APP(u8),
    /// Comment
    COM,
    /// For temporary private use in arithmetic coding
    TEM,
}

impl Marker
{
    pub fn from_u8(n: u8) -> Option<Marker>
    {
        use self::Marker::{APP, COM, DAC, DHT, DNL, DQT, DRI, EOI, RST, SOF, SOI, SOS, TEM};

        match n
        {
            0x01 => Some(TEM),
            0xFE => Some(COM),
            0xC0 => Some(SOF(0)),
            0xC1 => Some(SOF(1)),
            0xC2 => Some(SOF(2)),
            0xC3 => Some(SOF(3)),
            0xC4 => Some(DHT),
            0xC5 => Some(SOF(5)),
            0xC6 => Some(SOF(6)),
            0xC7 => Some(SOF(7)),
            0xC9 => Some(SOF(9)),
            0xCA => Some(SOF(10)),
            0xCB => Some(SOF(11)),
            0xCC => Some(DAC),
            0xCD => Some(SOF(13)),
            0xCE => Some(SOF(14)),
            0xCF => Some(SOF(15)),
            0xD0..=0xD7 => Some(RST(n - 0xD0)),
            0xD8 => Some(SOI),
            0xD9 => Some(EOI),
            0xDA => Some(SOS),
            0xDB => Some(DQT),
            0xDC => Some(DNL),
            0xDD => Some(DRI),
            0xE0..=0xEF => Some(APP(n - 0xE0)),
            _ => None,
        }
    }

    /// Markers that stand alone, without a length field and payload
    pub fn is_standalone(self) -> bool
    {
        matches!(self, Marker::SOI | Marker::EOI | Marker::RST(_) | Marker::TEM)
    }
}
