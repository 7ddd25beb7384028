use crate::errors::{DecodeErrors, UnsupportedSchemes};
use crate::headers::{parse_app, parse_start_of_frame, read_segment};
use crate::image::ImageDescriptor;
use crate::marker::Marker;
use crate::misc::{ByteReader, SOFMarkers, DEFAULT_DPI, START_OF_IMAGE};

/// Probe a buffer and return a boolean
/// to show if this is a jpeg image we can turn into a bitmap.
///
/// If it's a valid image, this parses the header without
/// doing the entropy decoding and post processing stage
#[must_use]
pub fn probe(buffer: &[u8]) -> bool
{
    probe_header(buffer, DEFAULT_DPI).is_ok()
}

/// Read image dimensions, resolution and colorspace from the headers
///
/// Markers are walked from the start of image up to the first start of
/// frame segment, nothing after it is looked at. `default_dpi` is used for
/// both resolutions unless an APP(0) segment declares a density.
///
/// # Errors
///  - `IllegalMagicBytes` - The first two bytes of the image are not `0xffd8`
///  - `Format` - A segment runs past the end of the buffer, or the scan
///    starts before a frame header was seen
///  - `Unsupported` - The frame uses a coding process we cannot decode
pub fn probe_header(buffer: &[u8], default_dpi: u32) -> Result<ImageDescriptor, DecodeErrors>
{
    let mut buf = ByteReader::new(buffer);
    let mut info = ImageDescriptor::default();

    info.set_resolution(default_dpi, default_dpi);

    // First two bytes should be jpeg soi marker
    let magic_bytes = buf.read_u16_be()?;
    if magic_bytes != START_OF_IMAGE
    {
        return Err(DecodeErrors::IllegalMagicBytes(magic_bytes));
    }

    loop
    {
        if buf.read_u8()? != 0xFF
        {
            continue;
        }
        let mut m = buf.read_u8()?;
        // markers may be preceded by any number of fill bytes
        while m == 0xFF
        {
            m = buf.read_u8()?;
        }
        let marker = match Marker::from_u8(m)
        {
            Some(marker) => marker,
            None =>
            {
                if m != 0x00
                {
                    warn!("Marker 0xFF{:X} not known, skipping it", m);
                    read_segment(&mut buf)?;
                }
                continue;
            }
        };

        match marker
        {
            Marker::SOF(n) =>
            {
                let code = 0xffc0 | u16::from(n);

                match SOFMarkers::from_int(code)
                {
                    Some(sof) =>
                    {
                        debug!("Image encoding scheme =`{:?}`", sof);
                        parse_start_of_frame(&mut buf, sof, &mut info)?;

                        return Ok(info);
                    }
                    // SOF5-7 and SOF13-15, the differential frames
                    None =>
                    {
                        return Err(DecodeErrors::Unsupported(UnsupportedSchemes::Hierarchical));
                    }
                }
            }
            Marker::APP(_) => parse_app(&mut buf, marker, &mut info)?,

            Marker::SOS =>
            {
                return Err(DecodeErrors::Format(
                    "Start of scan encountered before start of frame".to_string(),
                ));
            }
            Marker::EOI => return Err(DecodeErrors::Format("Premature End of image".to_string())),

            standalone if standalone.is_standalone() => (),

            _ =>
            {
                let skipped = read_segment(&mut buf)?;
                trace!("Skipping {:?} segment of {} bytes", marker, skipped.len());
            }
        }
    }
}
