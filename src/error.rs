use crate::png::{ChunkType, ColorMode, HeaderField};

/// An error from decoding PNG data.
///
/// Every variant is terminal: once one is returned no pixel data is produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum DecodeError {
  /// The first 8 bytes are not the PNG signature.
  #[error("missing or incorrect PNG signature")]
  FormatError,

  /// A declared length runs past the end of the data, or the data ended
  /// before the `IEND` chunk.
  #[error("unexpected end of input at offset {offset}: needed {needed} bytes, {available} available")]
  UnexpectedEof { offset: usize, needed: usize, available: usize },

  /// A chunk's CRC didn't match its type and data.
  #[error("CRC mismatch in {chunk_type} chunk at offset {offset}: declared {declared:#010x}, computed {actual:#010x}")]
  CorruptChunk { offset: usize, chunk_type: ChunkType, declared: u32, actual: u32 },

  /// The first chunk wasn't `IHDR`.
  #[error("first chunk must be IHDR, found {found}")]
  MissingHeader { found: ChunkType },

  /// A second `IHDR` chunk appeared.
  #[error("duplicate IHDR chunk at offset {offset}")]
  DuplicateHeader { offset: usize },

  /// Width or height is 0, or too large to address.
  #[error("invalid image dimensions {width}x{height}")]
  InvalidDimensions { width: u32, height: u32 },

  /// A header byte has an illegal value (or an illegal combination).
  #[error("invalid IHDR field {field}: {value}")]
  InvalidHeaderField { field: HeaderField, value: u32 },

  /// The header asks for Adam7 interlacing, which isn't reconstructed.
  #[error("interlaced images are not supported")]
  UnsupportedInterlace,

  /// A `PLTE` chunk appeared in an image that doesn't use a palette.
  #[error("PLTE chunk at offset {offset} not allowed for color mode {color_mode:?}")]
  UnexpectedPalette { offset: usize, color_mode: ColorMode },

  /// The `PLTE` data isn't 1 to 256 whole RGB entries.
  #[error("invalid PLTE length {len}")]
  InvalidPaletteLength { len: usize },

  /// An indexed image had no `PLTE` chunk.
  #[error("indexed color image has no palette")]
  MissingPalette,

  /// An index sample points past the end of the palette.
  #[error("palette index {index} at ({x}, {y}) is out of range for {palette_len} entries")]
  PaletteIndexOutOfRange { x: u32, y: u32, index: u8, palette_len: usize },

  /// The compressed stream ran short (or long) of what the header implies.
  #[error("truncated {context}: expected {expected} bytes, got {actual}")]
  TruncatedStream { context: &'static str, expected: usize, actual: usize },

  /// The compressed stream is not valid zlib/DEFLATE data.
  #[error("inflate failed: {reason}")]
  InflateError { reason: &'static str },

  /// A scanline started with a filter type other than 0 through 4.
  #[error("invalid filter type {filter} on row {row}")]
  InvalidFilterType { row: u32, filter: u8 },

  /// A configured [`Limits`](crate::Limits) value was exceeded.
  #[error("{what} {value} exceeds limit {limit}")]
  LimitExceeded { what: &'static str, value: u64, limit: u64 },

  /// The allocator couldn't give us enough space.
  #[error("allocation failed")]
  Alloc,
}

impl From<alloc::collections::TryReserveError> for DecodeError {
  #[inline]
  fn from(_: alloc::collections::TryReserveError) -> Self {
    Self::Alloc
  }
}

/// Returned when a pixel position is outside of a [`PixelGrid`](crate::PixelGrid).
///
/// This is a caller bug, not a decoding failure, so it's kept apart from
/// [`DecodeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("position ({x}, {y}) is out of bounds for a {width}x{height} image")]
pub struct OutOfBounds {
  pub x: u32,
  pub y: u32,
  pub width: u32,
  pub height: u32,
}
