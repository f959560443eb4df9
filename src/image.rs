#![forbid(unsafe_code)]

//! Provides the decoded pixel grid.

use alloc::vec::Vec;

use crate::{DecodeError, OutOfBounds, Pixel, RGBA8};

/// Converts an `(x,y)` position within a given `width` 2D space into a linear
/// index.
///
/// You don't ever need to call this function yourself, but it's how the grid
/// converts 2d coordinates into index values within its pixel vector.
#[inline]
#[must_use]
pub const fn xy_width_to_index(x: u32, y: u32, width: u32) -> usize {
  (y as usize) * (width as usize) + (x as usize)
}

/// A row-major grid of decoded pixels.
///
/// The grid always holds exactly `width * height` pixels, with the origin at
/// the top left. It's built once by the decoder and can't be changed after.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PixelGrid {
  width: u32,
  height: u32,
  pixels: Vec<Pixel>,
}
impl PixelGrid {
  /// Makes an empty grid with room for every pixel of the image.
  pub(crate) fn with_capacity(width: u32, height: u32) -> Result<Self, DecodeError> {
    let count = (width as usize)
      .checked_mul(height as usize)
      .ok_or(DecodeError::InvalidDimensions { width, height })?;
    let mut pixels = Vec::new();
    pixels.try_reserve_exact(count)?;
    Ok(Self { width, height, pixels })
  }

  #[inline]
  pub(crate) fn push(&mut self, pixel: Pixel) {
    debug_assert!(self.pixels.len() < self.pixels.capacity());
    self.pixels.push(pixel);
  }

  #[inline]
  pub(crate) fn is_complete(&self) -> bool {
    self.pixels.len() == xy_width_to_index(0, self.height, self.width)
  }

  #[inline]
  #[must_use]
  pub const fn width(&self) -> u32 {
    self.width
  }

  #[inline]
  #[must_use]
  pub const fn height(&self) -> u32 {
    self.height
  }

  /// The number of pixels, always `width * height`.
  #[inline]
  #[must_use]
  pub fn len(&self) -> usize {
    self.pixels.len()
  }

  #[inline]
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.pixels.is_empty()
  }

  /// Gets the pixel at `(x, y)`.
  #[inline]
  pub fn get(&self, x: u32, y: u32) -> Result<Pixel, OutOfBounds> {
    if x < self.width && y < self.height {
      Ok(self.pixels[xy_width_to_index(x, y, self.width)])
    } else {
      Err(OutOfBounds { x, y, width: self.width, height: self.height })
    }
  }

  /// All of the pixels, row-major.
  #[inline]
  #[must_use]
  pub fn pixels(&self) -> &[Pixel] {
    &self.pixels
  }

  /// One row of pixels, or `None` if `y` is out of bounds.
  #[inline]
  #[must_use]
  pub fn row(&self, y: u32) -> Option<&[Pixel]> {
    if y < self.height {
      let start = xy_width_to_index(0, y, self.width);
      Some(&self.pixels[start..start + self.width as usize])
    } else {
      None
    }
  }

  /// Iterates `(x, y, pixel)` in row-major order.
  #[inline]
  pub fn iter(&self) -> impl Iterator<Item = (u32, u32, Pixel)> + '_ {
    let width = self.width as usize;
    self.pixels.iter().enumerate().map(move |(i, p)| ((i % width) as u32, (i / width) as u32, *p))
  }

  /// Converts every pixel to RGBA8, row-major.
  pub fn to_rgba8_vec(&self) -> Vec<RGBA8> {
    self.pixels.iter().map(Pixel::to_rgba8).collect()
  }
}
