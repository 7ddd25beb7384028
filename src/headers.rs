//! Decode JPEG markers/segments
//!
//! This file deals with decoding header information in a JPEG file, only as
//! much as the header probe needs: image dimensions, component count and
//! pixel density.
//!
//! A good guide on markers can be found [here](http://vip.sugovica.hu/Sardi/kepnezo/JPEG%20File%20Layout%20and%20Format.htm)
//!
use crate::errors::{DecodeErrors, UnsupportedSchemes};
use crate::image::ImageDescriptor;
use crate::marker::Marker;
use crate::misc::{ByteReader, SOFMarkers};

/// JFIF density unit, dots per inch
const DENSITY_DOTS_PER_INCH: u8 = 1;
/// JFIF density unit, dots per centimetre
const DENSITY_DOTS_PER_CM: u8 = 2;

/// Read the length of a segment and hand out its payload
///
/// The length includes the two bytes used to store it.
pub(crate) fn read_segment<'a>(buf: &mut ByteReader<'a>) -> Result<&'a [u8], DecodeErrors>
{
    let length = buf.read_u16_be()?;

    if length < 2
    {
        return Err(DecodeErrors::Format(format!(
            "Found a marker with invalid length:{}",
            length
        )));
    }
    buf.read_slice(usize::from(length - 2))
}

/// Section:`B.2.2 Frame header syntax`
///--------------------------------------
///
/// Parse a START OF FRAME segment
///
/// | Field              |Size        |Description
/// ---------------------|------------|-----------------
/// | Marker Identifier  |2 bytes     |0xff, 0xc0 to identify SOF0 marker
/// | Length             |2 bytes     |This value equals to 8 + components*3 value
/// | Data precision     |1 byte      |This is in bits/sample, usually 8
/// |                    |            |(12 and 16 not supported by most software).
/// |Image height        |2 bytes     |This must be > 0
/// |Image Width         |2 bytes     |This must be > 0
/// |Number of components|1 byte      |Usually 1 = grey scaled, 3 = color `YcbCr` or `YIQ` 4 = color `CMYK`
/// |Each component      |3 bytes     | Read each component data of 3 bytes. We skip them,
/// |                    |            | the entropy decoder deals with sampling factors.
///
/// # Errors
/// - `Format` - Width of the image is 0
/// - `SofError` - Length of Start of Frame differs from expected
/// - `Unsupported` - A coding process or precision we cannot decode
pub(crate) fn parse_start_of_frame(
    buf: &mut ByteReader, sof: SOFMarkers, info: &mut ImageDescriptor,
) -> Result<(), DecodeErrors>
{
    // Get length of the frame header
    let length = buf.read_u16_be()?;
    // usually 8, but can be 12 and 16
    let dt_precision = buf.read_u8()?;
    // read the image height , maximum is 65,536
    let img_height = buf.read_u16_be()?;
    // read image width
    let img_width = buf.read_u16_be()?;
    let num_components = buf.read_u8()?;

    debug!(
        "Frame header: {}x{}, {} components, {} bit samples",
        img_width, img_height, num_components, dt_precision
    );

    // length should be equal to num components
    let expected = 8 + 3 * u16::from(num_components);
    if length != expected
    {
        return Err(DecodeErrors::SofError(format!(
            "Length of start of frame differs from expected {},value is {}",
            expected, length
        )));
    }
    if let Some(scheme) = UnsupportedSchemes::from_frame(sof, dt_precision)
    {
        return Err(DecodeErrors::Unsupported(scheme));
    }
    if img_width == 0
    {
        return Err(DecodeErrors::Format(
            "Image width is set to zero, cannot continue".to_string(),
        ));
    }
    if img_height == 0
    {
        return Err(DecodeErrors::Unsupported(
            UnsupportedSchemes::DefineNumberOfLines,
        ));
    }
    // component identifiers, sampling factors and table numbers
    buf.skip(3 * usize::from(num_components))?;

    info.precision = dt_precision;
    info.set_width(img_width);
    info.set_height(img_height);
    info.set_components(num_components);
    info.set_sof_marker(sof);

    Ok(())
}

/// Parse an application segment.
///
/// - APP(0) with a `JFIF` identifier carries the pixel density
/// - APP(14) with an `Adobe` identifier carries the color transform, which
///   we only report
///
/// Any other application segment is skipped.
pub(crate) fn parse_app(
    buf: &mut ByteReader, marker: Marker, info: &mut ImageDescriptor,
) -> Result<(), DecodeErrors>
{
    let payload = read_segment(buf)?;

    match marker
    {
        Marker::APP(0) =>
        {
            // identifier(5) version(2) units(1) x density(2) y density(2)
            if payload.len() >= 12 && &payload[0..5] == b"JFIF\0"
            {
                let units = payload[7];
                let x_density = u16::from_be_bytes([payload[8], payload[9]]);
                let y_density = u16::from_be_bytes([payload[10], payload[11]]);

                debug!(
                    "JFIF density {}x{} in units of {}",
                    x_density, y_density, units
                );
                if let Some((x, y)) = density_to_dpi(units, x_density, y_density)
                {
                    info.set_resolution(x, y);
                }
            }
        }
        Marker::APP(14) =>
        {
            // identifier(5) version(2) flags0(2) flags1(2) transform(1)
            if payload.len() >= 12 && &payload[0..5] == b"Adobe"
            {
                debug!("Adobe APP(14) segment, color transform {}", payload[11]);
            }
        }
        _ => trace!("Skipping {:?} segment of {} bytes", marker, payload.len()),
    }
    Ok(())
}

/// Convert a JFIF density to dots per inch.
///
/// Returns `None` when the image only declares an aspect ratio or a
/// zero density, the caller keeps its default resolution then.
fn density_to_dpi(units: u8, x: u16, y: u16) -> Option<(u32, u32)>
{
    if x == 0 || y == 0
    {
        return None;
    }
    let (x, y) = (u32::from(x), u32::from(y));

    match units
    {
        DENSITY_DOTS_PER_INCH => Some((x, y)),
        DENSITY_DOTS_PER_CM => Some((x * 254 / 100, y * 254 / 100)),
        _ => None,
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    fn jfif(units: u8, x: u16, y: u16) -> Vec<u8>
    {
        let mut segment = vec![0x00, 0x10];
        segment.extend_from_slice(b"JFIF\0");
        segment.extend_from_slice(&[1, 2, units]);
        segment.extend_from_slice(&x.to_be_bytes());
        segment.extend_from_slice(&y.to_be_bytes());
        segment.extend_from_slice(&[0, 0]);
        segment
    }

    #[test]
    fn jfif_density_in_inches()
    {
        let data = jfif(1, 300, 150);
        let mut info = ImageDescriptor::default();

        parse_app(&mut ByteReader::new(&data), Marker::APP(0), &mut info).unwrap();

        assert_eq!((info.x_resolution, info.y_resolution), (300, 150));
    }

    #[test]
    fn jfif_density_in_centimetres()
    {
        let data = jfif(2, 100, 40);
        let mut info = ImageDescriptor::default();

        parse_app(&mut ByteReader::new(&data), Marker::APP(0), &mut info).unwrap();

        assert_eq!((info.x_resolution, info.y_resolution), (254, 101));
    }

    #[test]
    fn aspect_ratio_only_keeps_default()
    {
        let data = jfif(0, 1, 1);
        let mut info = ImageDescriptor::default();
        info.set_resolution(72, 72);

        parse_app(&mut ByteReader::new(&data), Marker::APP(0), &mut info).unwrap();

        assert_eq!((info.x_resolution, info.y_resolution), (72, 72));
    }

    #[test]
    fn sof_length_mismatch()
    {
        // length says 17 but only one component follows
        let data = [0x00, 0x11, 8, 0x00, 0x10, 0x00, 0x10, 1, 1, 0x11, 0];
        let mut info = ImageDescriptor::default();

        let err = parse_start_of_frame(
            &mut ByteReader::new(&data),
            SOFMarkers::BaselineDct,
            &mut info,
        )
        .unwrap_err();

        assert!(
            matches!(err, DecodeErrors::SofError(x) if x == "Length of start of frame differs from expected 11,value is 17")
        );
    }

    #[test]
    fn twelve_bit_samples_are_unsupported()
    {
        let data = [0x00, 0x0b, 12, 0x00, 0x10, 0x00, 0x10, 1, 1, 0x11, 0];
        let mut info = ImageDescriptor::default();

        let err = parse_start_of_frame(
            &mut ByteReader::new(&data),
            SOFMarkers::ExtendedSequentialHuffman,
            &mut info,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            DecodeErrors::Unsupported(UnsupportedSchemes::ExtendedSequentialHuffman)
        ));
    }
}
