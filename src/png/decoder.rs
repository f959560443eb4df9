use super::*;

/// A fully decoded PNG.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PngImage {
  /// The image header.
  pub header: ImageHeader,
  /// The decoded pixels.
  pub pixels: PixelGrid,
  /// The palette, for indexed color images.
  pub palette: Option<PaletteTable>,
  /// Types of the chunks that were found but not interpreted, in file order.
  pub skipped: Vec<ChunkType>,
}
impl PngImage {
  #[inline]
  #[must_use]
  pub const fn width(&self) -> u32 {
    self.header.width
  }
  #[inline]
  #[must_use]
  pub const fn height(&self) -> u32 {
    self.header.height
  }
}

/// Decodes PNG bytes with no [`Limits`].
///
/// See [`decode_png_with`].
#[inline]
pub fn decode_png(bytes: &[u8]) -> Result<PngImage, DecodeError> {
  decode_png_with(bytes, &Limits::default())
}

/// Decodes PNG bytes into a pixel grid.
///
/// 1) The signature is checked, and the first chunk must be `IHDR`.
/// 2) The header is checked against the `limits`.
/// 3) Chunks are read up to `IEND`, collecting the palette and joining all of
///    the `IDAT` data. Every CRC is checked along the way.
/// 4) The joined data is decompressed to exactly the size the header implies.
/// 5) The scanlines are unfiltered and unpacked into pixels.
///
/// The first problem found stops the decode and is returned.
pub fn decode_png_with(bytes: &[u8], limits: &Limits) -> Result<PngImage, DecodeError> {
  let mut chunks = ChunkIter::new(bytes)?;

  let first = match chunks.next() {
    Some(result) => result?,
    None => {
      return Err(DecodeError::UnexpectedEof {
        offset: PNG_SIGNATURE.len(),
        needed: 12,
        available: 0,
      })
    }
  };
  if first.chunk_type() != ChunkType::IHDR {
    return Err(DecodeError::MissingHeader { found: first.chunk_type() });
  }
  let header = ImageHeader::try_from(first.data())?;
  debug!("{header:?}");
  limits.check(&header)?;
  if header.interlace {
    return Err(DecodeError::UnsupportedInterlace);
  }

  let mut palette: Option<PaletteTable> = None;
  let mut payload = CompressedPayload::new();
  let mut skipped = Vec::new();
  for result in chunks {
    let raw = result?;
    let offset = raw.offset();
    // placement is checked before the chunk data is parsed
    match raw.chunk_type() {
      ChunkType::IHDR => return Err(DecodeError::DuplicateHeader { offset }),
      ChunkType::PLTE if header.color_mode != ColorMode::Palette => {
        return Err(DecodeError::UnexpectedPalette { offset, color_mode: header.color_mode })
      }
      _ => (),
    }
    match PngChunk::try_from(raw)? {
      PngChunk::Header(_) => return Err(DecodeError::DuplicateHeader { offset }),
      PngChunk::Palette(plte) => {
        if palette.is_some() {
          warn!("ignoring extra PLTE chunk at offset {offset}");
        } else {
          palette = Some(plte);
        }
      }
      PngChunk::ImageData(data) => payload.push(data)?,
      PngChunk::End => break,
      PngChunk::Unknown(raw) => {
        debug!("skipping {} chunk at offset {offset}", raw.chunk_type());
        skipped.try_reserve(1)?;
        skipped.push(raw.chunk_type());
      }
    }
  }

  let filtered = inflate_image_data(&payload, header.decompressed_len()?)?;
  drop(payload);
  let pixels = reconstruct_image(&header, palette.as_ref(), &filtered)?;
  Ok(PngImage { header, pixels, palette, skipped })
}
