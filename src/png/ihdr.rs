use super::*;

/// Bits per sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum BitDepth {
  One = 1,
  Two = 2,
  Four = 4,
  Eight = 8,
  Sixteen = 16,
}
impl BitDepth {
  #[inline]
  #[must_use]
  pub const fn bits(self) -> u32 {
    self as u32
  }
}
impl TryFrom<u8> for BitDepth {
  type Error = DecodeError;
  #[inline]
  fn try_from(value: u8) -> Result<Self, Self::Error> {
    Ok(match value {
      1 => Self::One,
      2 => Self::Two,
      4 => Self::Four,
      8 => Self::Eight,
      16 => Self::Sixteen,
      _ => {
        return Err(DecodeError::InvalidHeaderField {
          field: HeaderField::BitDepth,
          value: value.into(),
        })
      }
    })
  }
}

/// The types of color that PNG supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ColorMode {
  /// Greyscale
  Gray = 0,
  /// Red, Green, Blue
  Truecolor = 2,
  /// Index into a palette.
  Palette = 3,
  /// Greyscale + Alpha
  GrayAlpha = 4,
  /// Red, Green, Blue, Alpha
  TruecolorAlpha = 6,
}
impl ColorMode {
  /// The number of samples stored for each pixel.
  #[inline]
  #[must_use]
  pub const fn channel_count(self) -> usize {
    match self {
      Self::Gray => 1,
      Self::Truecolor => 3,
      Self::Palette => 1,
      Self::GrayAlpha => 2,
      Self::TruecolorAlpha => 4,
    }
  }

  /// If a given bit depth is legal with this color mode.
  #[inline]
  #[must_use]
  pub const fn allows(self, depth: BitDepth) -> bool {
    use BitDepth::*;
    match self {
      Self::Gray => true,
      Self::Palette => !matches!(depth, Sixteen),
      Self::Truecolor | Self::GrayAlpha | Self::TruecolorAlpha => matches!(depth, Eight | Sixteen),
    }
  }
}
impl TryFrom<u8> for ColorMode {
  type Error = DecodeError;
  #[inline]
  fn try_from(value: u8) -> Result<Self, Self::Error> {
    Ok(match value {
      0 => Self::Gray,
      2 => Self::Truecolor,
      3 => Self::Palette,
      4 => Self::GrayAlpha,
      6 => Self::TruecolorAlpha,
      _ => {
        return Err(DecodeError::InvalidHeaderField {
          field: HeaderField::ColorMode,
          value: value.into(),
        })
      }
    })
  }
}

/// Names a header field in an [`InvalidHeaderField`](DecodeError::InvalidHeaderField) error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderField {
  /// The `IHDR` data wasn't 13 bytes; the value is the actual length.
  Length,
  BitDepth,
  ColorMode,
  CompressionMethod,
  FilterMethod,
  Interlace,
}
impl core::fmt::Display for HeaderField {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_str(match self {
      Self::Length => "length",
      Self::BitDepth => "bit depth",
      Self::ColorMode => "color type",
      Self::CompressionMethod => "compression method",
      Self::FilterMethod => "filter method",
      Self::Interlace => "interlace method",
    })
  }
}

/// Image Header
///
/// Describes the image's dimensions and how its pixels are stored. Every
/// other part of decoding depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageHeader {
  /// width in pixels
  pub width: u32,
  /// height in pixels
  pub height: u32,
  /// bits per sample
  pub bit_depth: BitDepth,
  /// pixel color type
  pub color_mode: ColorMode,
  /// always 0 (zlib DEFLATE)
  pub compression_method: u8,
  /// always 0 (adaptive filtering)
  pub filter_method: u8,
  /// if the image data is stored Adam7 interlaced.
  pub interlace: bool,
}
impl ImageHeader {
  /// The largest width or height PNG allows.
  pub const MAX_DIMENSION: u32 = (1 << 31) - 1;

  #[inline]
  #[must_use]
  pub const fn bits_per_pixel(&self) -> usize {
    (self.bit_depth.bits() as usize) * self.color_mode.channel_count()
  }

  /// The byte distance used by the filters to find the "left" byte.
  ///
  /// This is the bytes per complete pixel, rounded up to at least 1.
  #[inline]
  #[must_use]
  pub const fn filter_unit(&self) -> usize {
    let bytes = self.bits_per_pixel() / 8;
    if bytes == 0 {
      1
    } else {
      bytes
    }
  }

  /// Bytes of pixel data in each scanline, not counting the filter byte.
  ///
  /// When pixels are less than 8 bits it's possible to end up with a partial
  /// byte on the end of the line, so we round up.
  pub fn bytes_per_scanline(&self) -> Result<usize, DecodeError> {
    let bits = (self.bits_per_pixel() as u64) * u64::from(self.width);
    usize::try_from(bits.div_ceil(8)).map_err(|_| self.dimensions_error())
  }

  /// The exact size of the decompressed image data: every scanline plus its
  /// filter type byte.
  pub fn decompressed_len(&self) -> Result<usize, DecodeError> {
    self
      .bytes_per_scanline()?
      .checked_add(1)
      .and_then(|line| line.checked_mul(self.height as usize))
      .ok_or_else(|| self.dimensions_error())
  }

  #[inline]
  fn dimensions_error(&self) -> DecodeError {
    DecodeError::InvalidDimensions { width: self.width, height: self.height }
  }
}
impl TryFrom<&[u8]> for ImageHeader {
  type Error = DecodeError;
  fn try_from(data: &[u8]) -> Result<Self, Self::Error> {
    let bad = |field: HeaderField, value: u8| DecodeError::InvalidHeaderField {
      field,
      value: value.into(),
    };
    let [w0, w1, w2, w3, h0, h1, h2, h3, bit_depth, color_type, compression_method, filter_method, interlace_method] =
      *data
    else {
      return Err(DecodeError::InvalidHeaderField {
        field: HeaderField::Length,
        value: data.len() as u32,
      });
    };
    let width = u32::from_be_bytes([w0, w1, w2, w3]);
    let height = u32::from_be_bytes([h0, h1, h2, h3]);
    if width == 0 || height == 0 || width > Self::MAX_DIMENSION || height > Self::MAX_DIMENSION {
      return Err(DecodeError::InvalidDimensions { width, height });
    }
    let depth = BitDepth::try_from(bit_depth)?;
    let color_mode = ColorMode::try_from(color_type)?;
    if !color_mode.allows(depth) {
      return Err(bad(HeaderField::BitDepth, bit_depth));
    }
    if compression_method != 0 {
      return Err(bad(HeaderField::CompressionMethod, compression_method));
    }
    if filter_method != 0 {
      return Err(bad(HeaderField::FilterMethod, filter_method));
    }
    let interlace = match interlace_method {
      0 => false,
      1 => true,
      other => return Err(bad(HeaderField::Interlace, other)),
    };
    Ok(Self {
      width,
      height,
      bit_depth: depth,
      color_mode,
      compression_method,
      filter_method,
      interlace,
    })
  }
}
