#![forbid(unsafe_code)]

//! Holds all the tools for decoding PNG data.
//!
//! * [Portable Network Graphics Specification (Second Edition)][png-spec]
//!
//! [png-spec]: https://www.w3.org/TR/2003/REC-PNG-20031110/
//!
//! ## Automated PNG Decoding
//!
//! Just call [`decode_png`] and you get a [`PngImage`] with the header and a
//! [`PixelGrid`](crate::PixelGrid), or the first [`DecodeError`] found.
//!
//! ## Decoding a PNG Yourself
//!
//! Each stage of decoding is also available on its own, in the same order that
//! [`decode_png`] uses them:
//!
//! 1) [`ChunkIter`] checks the signature and produces CRC-checked
//!    [`RawChunk`] values up to and including `IEND`. Turn each one into a
//!    [`PngChunk`] to have it parsed by type.
//! 2) The first chunk must be the [`ImageHeader`]. It describes the
//!    dimensions and pixel format, and so how everything else is read.
//! 3) Indexed color images have a [`PaletteTable`].
//! 4) All of the `IDAT` data gets joined into one [`CompressedPayload`], and
//!    [`inflate_image_data`] decompresses it. This gives you *filtered* data,
//!    not the final data you want.
//! 5) [`reconstruct_image`] unfilters the data one scanline at a time (with
//!    [`reconstruct_row`]) and unpacks the pixels.
//!
//! ## Parsing Errors
//!
//! This decoder is strict. A bad signature, a bad CRC, a missing or repeated
//! header, an illegal header value, and broken compressed data are all errors,
//! and no partial image is ever returned.
//!
//! Chunk types other than `IHDR`, `PLTE`, `IDAT`, and `IEND` are not an error.
//! They're passed along as [`PngChunk::Unknown`], and [`decode_png`] lists
//! them in [`PngImage::skipped`].
//!
//! Interlaced images are not supported.

use core::fmt::{Debug, Write};

use alloc::vec::Vec;
use log::{debug, trace, warn};

use crate::{
  byte_reader::ByteReader, DecodeError, Limits, Pixel, PixelGrid, RGB8, RGBA8, Y8, YA8,
};

mod chunk;
pub use chunk::*;

mod crc32;
pub use crc32::*;

mod decoder;
pub use decoder::*;

mod idat;
pub use idat::*;

mod ihdr;
pub use ihdr::*;

mod plte;
pub use plte::*;

mod scanline;
pub use scanline::*;

mod unfilter;
pub use unfilter::*;

/// The first eight bytes of a PNG datastream should match these bytes.
pub const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Checks if the PNG's initial 8 bytes are correct.
///
/// * If this is the case, the rest of the bytes are very likely PNG data.
/// * If this is *not* the case, the rest of the bytes are very likely *not* PNG
///   data.
#[inline]
#[must_use]
pub const fn is_png_signature_correct(bytes: &[u8]) -> bool {
  matches!(bytes, [137, 80, 78, 71, 13, 10, 26, 10, ..])
}
