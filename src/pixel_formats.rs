//! Module for pixel formats.
//!
//! Decoded pixels always have 8 bits per channel, no matter what bit depth the
//! PNG stored them at. How each depth gets to 8 bits is described in
//! [`bit_depth_changes`](crate::bit_depth_changes).
//!
//! The channel layout is kept though: a greyscale image gives [`Pixel::Y`]
//! values, greyscale with alpha gives [`Pixel::YA`], and so on. Indexed color
//! is resolved through the palette, so it gives [`Pixel::RGB`].

use bytemuck::{Pod, Zeroable};

/// An 8-bit greyscale pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Pod, Zeroable)]
#[repr(C)]
pub struct Y8 {
  pub y: u8,
}

/// An 8-bits per channel greyscale + alpha pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Pod, Zeroable)]
#[repr(C)]
pub struct YA8 {
  pub y: u8,
  pub a: u8,
}

/// An RGB value, 8-bits per channel.
///
/// This is also the layout of a `PLTE` entry, so palette data can be cast
/// straight to `[RGB8]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Pod, Zeroable)]
#[repr(C)]
pub struct RGB8 {
  pub r: u8,
  pub g: u8,
  pub b: u8,
}
impl RGB8 {
  #[inline]
  #[must_use]
  pub const fn new(r: u8, g: u8, b: u8) -> Self {
    Self { r, g, b }
  }
}

/// An 8-bits per channel RGBA pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Pod, Zeroable)]
#[repr(C)]
pub struct RGBA8 {
  pub r: u8,
  pub g: u8,
  pub b: u8,
  pub a: u8,
}
impl RGBA8 {
  #[inline]
  #[must_use]
  pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
    Self { r, g, b, a }
  }
}

/// One decoded pixel.
///
/// The variant matches the image's color mode, with 1 to 4 channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pixel {
  /// Greyscale
  Y(Y8),
  /// Greyscale + Alpha
  YA(YA8),
  /// Red, Green, Blue (also used for palette entries)
  RGB(RGB8),
  /// Red, Green, Blue, Alpha
  RGBA(RGBA8),
}
impl Pixel {
  /// How many channels this pixel has.
  #[inline]
  #[must_use]
  pub const fn channel_count(&self) -> usize {
    match self {
      Self::Y(_) => 1,
      Self::YA(_) => 2,
      Self::RGB(_) => 3,
      Self::RGBA(_) => 4,
    }
  }

  /// The channel values in storage order.
  #[inline]
  #[must_use]
  pub fn channels(&self) -> &[u8] {
    match self {
      Self::Y(p) => bytemuck::bytes_of(p),
      Self::YA(p) => bytemuck::bytes_of(p),
      Self::RGB(p) => bytemuck::bytes_of(p),
      Self::RGBA(p) => bytemuck::bytes_of(p),
    }
  }

  /// The color without alpha. Grey is copied to all three channels.
  #[inline]
  #[must_use]
  pub const fn rgb(&self) -> RGB8 {
    match *self {
      Self::Y(Y8 { y }) | Self::YA(YA8 { y, .. }) => RGB8 { r: y, g: y, b: y },
      Self::RGB(rgb) => rgb,
      Self::RGBA(RGBA8 { r, g, b, .. }) => RGB8 { r, g, b },
    }
  }

  /// The alpha channel, or fully opaque if there isn't one.
  #[inline]
  #[must_use]
  pub const fn alpha(&self) -> u8 {
    match *self {
      Self::YA(YA8 { a, .. }) | Self::RGBA(RGBA8 { a, .. }) => a,
      Self::Y(_) | Self::RGB(_) => u8::MAX,
    }
  }

  #[inline]
  #[must_use]
  pub const fn to_rgba8(&self) -> RGBA8 {
    let RGB8 { r, g, b } = self.rgb();
    RGBA8 { r, g, b, a: self.alpha() }
  }
}
impl From<Y8> for Pixel {
  #[inline]
  fn from(p: Y8) -> Self {
    Self::Y(p)
  }
}
impl From<YA8> for Pixel {
  #[inline]
  fn from(p: YA8) -> Self {
    Self::YA(p)
  }
}
impl From<RGB8> for Pixel {
  #[inline]
  fn from(p: RGB8) -> Self {
    Self::RGB(p)
  }
}
impl From<RGBA8> for Pixel {
  #[inline]
  fn from(p: RGBA8) -> Self {
    Self::RGBA(p)
  }
}
impl From<Pixel> for RGBA8 {
  #[inline]
  fn from(p: Pixel) -> Self {
    p.to_rgba8()
  }
}

#[test]
fn test_pixel_views() {
  let p = Pixel::YA(YA8 { y: 7, a: 9 });
  assert_eq!(p.channels(), &[7, 9]);
  assert_eq!(p.rgb(), RGB8::new(7, 7, 7));
  assert_eq!(p.to_rgba8(), RGBA8::new(7, 7, 7, 9));
  let p = Pixel::RGB(RGB8::new(1, 2, 3));
  assert_eq!(p.channel_count(), 3);
  assert_eq!(p.alpha(), 255);
  assert_eq!(RGBA8::from(p), RGBA8::new(1, 2, 3, 255));
}
