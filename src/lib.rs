//! Turn in-memory JPEG images into 32 bit bitmaps
//!
//! # Features
//!  - Header probing without decoding, including JFIF pixel density
//!  - Grayscale and RGB images are written as BGRA with an opaque alpha
//!  - CMYK images are written as inverted CMYK, one byte per channel
//!  - Output rows may be padded to any power of two alignment
//!
//! # Usage
//! ```no_run
//! let data = std::fs::read("image.jpg").unwrap();
//!
//! if let Some(bitmap) = jpeg_bitmap::image_from_data(&data)
//! {
//!     println!("{}x{} {:?}", bitmap.width(), bitmap.height(), bitmap.pixel_format());
//! }
//! ```
//!
//! # Failure
//! Decoding is all or nothing. A buffer that is too short or too long, is
//! not a JPEG, uses a colorspace other than gray/RGB/CMYK, or whose pixel
//! data ends early gives `None`, never a partially filled bitmap.
//! [`try_image_from_data`] reports the reason instead.
//!
//! # Decoding
//! Entropy decoding is delegated to a [`JpegBackend`], by default
//! [`DctBackend`] which uses `jpeg-decoder`. Enabling the `rayon` feature
//! (on by default) lets it decode components in parallel.
//!
//! Every call creates its own [`Context`] and drops it before returning, so
//! calls from different threads do not share anything.

#![allow(
    clippy::needless_return,
    clippy::similar_names,
    clippy::inline_always,
    clippy::doc_markdown,
    clippy::module_name_repetitions
)]
#![warn(
    clippy::correctness,
    clippy::perf,
    clippy::pedantic,
    clippy::inline_always,
    clippy::missing_errors_doc,
    clippy::panic
)]
#![deny(missing_docs)]

#[macro_use]
extern crate log;

pub use crate::backend::{DctBackend, JpegBackend};
pub use crate::bitmap::{Bitmap, BitmapData, LockMode, PixelFormat, Rect, BYTES_PER_PIXEL};
pub use crate::context::Context;
pub use crate::decoder::output_format;
pub use crate::errors::{DecodeErrors, UnsupportedSchemes};
pub use crate::image::ImageDescriptor;
pub use crate::misc::{ColorSpace, SOFMarkers};
pub use crate::options::DecoderOptions;
pub use crate::probe::{probe, probe_header};
pub use crate::sniff::{
    decode_with, image_from_data, image_from_data_with_options, try_image_from_data,
};
pub use crate::stream::{open_memory, DctParams, DctStream, PixelStream};

mod backend;
mod bitmap;
mod context;
mod decoder;
pub mod errors;
mod headers;
mod image;
mod marker;
mod misc;
mod options;
mod probe;
mod sniff;
mod stream;
