use crate::misc::{ColorSpace, SOFMarkers, DEFAULT_DPI};

/// What the header probe learned about an image
///
/// Nothing here requires decoding entropy coded data, the
/// values come from the APP(0) and start of frame segments.
#[derive(Clone, Debug, PartialEq)]
#[allow(clippy::module_name_repetitions)]
pub struct ImageDescriptor
{
    /// Width of the image
    pub width: u16,
    /// Height of image
    pub height: u16,
    /// Horizontal resolution in dots per inch
    pub x_resolution: u32,
    /// Vertical resolution in dots per inch
    pub y_resolution: u32,
    /// Colorspace the pixel stream will be decoded into
    pub colorspace: ColorSpace,
    /// Start of frame markers
    pub sof: SOFMarkers,
    /// Bits per sample
    pub precision: u8,
    /// Number of components
    pub components: u8,
}

impl Default for ImageDescriptor
{
    fn default() -> Self
    {
        ImageDescriptor {
            width: 0,
            height: 0,
            x_resolution: DEFAULT_DPI,
            y_resolution: DEFAULT_DPI,
            colorspace: ColorSpace::Unknown,
            sof: SOFMarkers::default(),
            precision: 8,
            components: 0,
        }
    }
}

impl ImageDescriptor
{
    /// Set width of the image
    ///
    /// Found in the start of frame
    pub fn set_width(&mut self, width: u16)
    {
        self.width = width;
    }
    /// Set height of the image
    ///
    /// Found in the start of frame
    pub fn set_height(&mut self, height: u16)
    {
        self.height = height;
    }
    /// Set image Start of frame marker
    ///
    /// found in the Start of frame header
    pub fn set_sof_marker(&mut self, marker: SOFMarkers)
    {
        self.sof = marker;
    }
    /// Set horizontal and vertical resolution (dots per inch)
    ///
    /// Found in the APP(0) marker
    pub fn set_resolution(&mut self, x: u32, y: u32)
    {
        self.x_resolution = x;
        self.y_resolution = y;
    }
    /// Set the number of components, this also decides the colorspace
    pub fn set_components(&mut self, components: u8)
    {
        self.components = components;
        self.colorspace = ColorSpace::from_components(components);
    }
}
