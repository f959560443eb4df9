use super::*;

use crate::bit_depth_changes::{channel_to_8, low_depth_to_8, unpack_samples};

/// Turns decompressed image data into the final pixel grid.
///
/// The `filtered` data must be exactly
/// [`decompressed_len`](ImageHeader::decompressed_len) bytes: `height`
/// scanlines, each a filter type byte followed by
/// [`bytes_per_scanline`](ImageHeader::bytes_per_scanline) bytes.
///
/// Rows are processed top to bottom. Each row is copied into a scratch buffer,
/// unfiltered against the previous reconstructed row, and then unpacked into
/// `width` pixels. Indexed color is looked up in `palette`.
///
/// ## Failure
/// * [`UnsupportedInterlace`](DecodeError::UnsupportedInterlace) for Adam7
///   data.
/// * [`MissingPalette`](DecodeError::MissingPalette) if the image is indexed
///   and there's no palette.
/// * [`TruncatedStream`](DecodeError::TruncatedStream) if `filtered` is the
///   wrong size.
/// * [`InvalidFilterType`](DecodeError::InvalidFilterType) or
///   [`PaletteIndexOutOfRange`](DecodeError::PaletteIndexOutOfRange) on the
///   first row where they happen.
pub fn reconstruct_image(
  header: &ImageHeader, palette: Option<&PaletteTable>, filtered: &[u8],
) -> Result<PixelGrid, DecodeError> {
  if header.interlace {
    return Err(DecodeError::UnsupportedInterlace);
  }
  let palette = match (header.color_mode, palette) {
    (ColorMode::Palette, None) => return Err(DecodeError::MissingPalette),
    (ColorMode::Palette, Some(p)) => Some(p),
    _ => None,
  };
  let expected = header.decompressed_len()?;
  if filtered.len() != expected {
    return Err(DecodeError::TruncatedStream {
      context: "decompressed image data",
      expected,
      actual: filtered.len(),
    });
  }
  let bytes_per_scanline = header.bytes_per_scanline()?;
  let unit = header.filter_unit();

  let mut grid = PixelGrid::with_capacity(header.width, header.height)?;
  // The previous line starts as all zero, which is what the filters expect
  // above the first line.
  let mut prev: Vec<u8> = Vec::new();
  prev.try_reserve_exact(bytes_per_scanline)?;
  prev.resize(bytes_per_scanline, 0);
  let mut current: Vec<u8> = Vec::new();
  current.try_reserve_exact(bytes_per_scanline)?;
  current.resize(bytes_per_scanline, 0);

  for (y, line) in filtered.chunks_exact(bytes_per_scanline + 1).enumerate() {
    let y = y as u32;
    // every line is the filter type byte and then the filtered data
    let filter = FilterType::try_from(line[0])
      .map_err(|filter| DecodeError::InvalidFilterType { row: y, filter })?;
    current.copy_from_slice(&line[1..]);
    reconstruct_row(filter, &mut current, &prev, unit);
    unpack_row(header, palette, &current, y, &mut grid)?;
    core::mem::swap(&mut prev, &mut current);
  }
  debug_assert!(grid.is_complete());
  Ok(grid)
}

/// Unpacks one reconstructed scanline into `width` pixels on the end of the
/// grid.
fn unpack_row(
  header: &ImageHeader, palette: Option<&PaletteTable>, row: &[u8], y: u32,
  grid: &mut PixelGrid,
) -> Result<(), DecodeError> {
  let width = header.width as usize;
  let depth = header.bit_depth.bits();
  let to_pixel: fn(&[u8], u32) -> Pixel = match header.color_mode {
    ColorMode::Palette => {
      let palette = palette.ok_or(DecodeError::MissingPalette)?;
      for (x, index) in unpack_samples(row, depth).take(width).enumerate() {
        let rgb = palette.get(index).ok_or(DecodeError::PaletteIndexOutOfRange {
          x: x as u32,
          y,
          index,
          palette_len: palette.len(),
        })?;
        grid.push(Pixel::RGB(rgb));
      }
      return Ok(());
    }
    ColorMode::Gray if depth < 8 => {
      for sample in unpack_samples(row, depth).take(width) {
        grid.push(Pixel::Y(Y8 { y: low_depth_to_8(depth, sample) }));
      }
      return Ok(());
    }
    ColorMode::Gray => |px, d| Pixel::Y(Y8 { y: channel_to_8(px, 0, d) }),
    ColorMode::GrayAlpha => {
      |px, d| Pixel::YA(YA8 { y: channel_to_8(px, 0, d), a: channel_to_8(px, 1, d) })
    }
    ColorMode::Truecolor => |px, d| {
      Pixel::RGB(RGB8 {
        r: channel_to_8(px, 0, d),
        g: channel_to_8(px, 1, d),
        b: channel_to_8(px, 2, d),
      })
    },
    ColorMode::TruecolorAlpha => |px, d| {
      Pixel::RGBA(RGBA8 {
        r: channel_to_8(px, 0, d),
        g: channel_to_8(px, 1, d),
        b: channel_to_8(px, 2, d),
        a: channel_to_8(px, 3, d),
      })
    },
  };
  // 8 and 16 bit samples are always whole bytes
  for px in row.chunks_exact(header.bits_per_pixel() / 8).take(width) {
    grid.push(to_pixel(px, depth));
  }
  Ok(())
}
