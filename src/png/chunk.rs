use super::*;

/// The four byte type tag of a chunk.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct ChunkType(pub [u8; 4]);
#[allow(nonstandard_style)]
impl ChunkType {
  pub const IHDR: Self = Self(*b"IHDR");
  pub const PLTE: Self = Self(*b"PLTE");
  pub const IDAT: Self = Self(*b"IDAT");
  pub const IEND: Self = Self(*b"IEND");

  /// Critical chunks have an uppercase first letter.
  ///
  /// Everything this decoder interprets is critical. Other chunks, critical or
  /// not, are handed back to the caller uninterpreted.
  #[inline]
  #[must_use]
  pub const fn is_critical(self) -> bool {
    (self.0[0] & 0x20) == 0
  }
}
impl Debug for ChunkType {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    write!(f, "ChunkType({self})")
  }
}
impl core::fmt::Display for ChunkType {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    for ch in self.0.iter().copied().map(|u| u as char) {
      f.write_char(ch)?;
    }
    Ok(())
  }
}

/// An unparsed chunk from a PNG.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawChunk<'b> {
  offset: usize,
  chunk_type: ChunkType,
  data: &'b [u8],
  declared_crc: u32,
}
impl Debug for RawChunk<'_> {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("RawChunk")
      .field("offset", &self.offset)
      .field("chunk_type", &self.chunk_type)
      .field("data", &(&self.data[..self.data.len().min(12)], self.data.len()))
      .field("declared_crc", &self.declared_crc)
      .finish()
  }
}
impl<'b> RawChunk<'b> {
  /// Offset of the chunk's length field from the start of the PNG bytes.
  #[inline]
  #[must_use]
  pub const fn offset(&self) -> usize {
    self.offset
  }
  #[inline]
  #[must_use]
  pub const fn chunk_type(&self) -> ChunkType {
    self.chunk_type
  }
  #[inline]
  #[must_use]
  pub const fn data(&self) -> &'b [u8] {
    self.data
  }
  #[inline]
  #[must_use]
  pub const fn declared_crc(&self) -> u32 {
    self.declared_crc
  }
  #[inline]
  #[must_use]
  pub fn compute_actual_crc(&self) -> u32 {
    png_crc(self.chunk_type.0.iter().copied().chain(self.data.iter().copied()))
  }
}

/// An iterator that produces successive CRC-checked chunks from PNG bytes.
///
/// * Construction checks the 8 byte PNG signature.
/// * Each chunk's declared length is checked against the remaining bytes
///   before anything is sliced, so a bogus length fails immediately.
/// * Every chunk's CRC is checked.
/// * Chunks of any type are produced, including types this crate doesn't know.
/// * The `IEND` chunk is the last item. Running out of bytes before `IEND` is
///   an error.
///
/// After the first error, or after `IEND`, the iterator only returns `None`.
#[derive(Debug, Clone)]
pub struct ChunkIter<'b> {
  reader: ByteReader<'b>,
  finished: bool,
}
impl<'b> ChunkIter<'b> {
  /// Pass the full PNG bytes, including the signature.
  pub fn new(bytes: &'b [u8]) -> Result<Self, DecodeError> {
    if !is_png_signature_correct(bytes) {
      return Err(DecodeError::FormatError);
    }
    let mut reader = ByteReader::new(bytes);
    reader.take(PNG_SIGNATURE.len())?;
    Ok(Self { reader, finished: false })
  }

  fn read_chunk(&mut self) -> Result<RawChunk<'b>, DecodeError> {
    let offset = self.reader.position();
    let len = self.reader.read_u32_be()?;
    let chunk_type = ChunkType(self.reader.read_array()?);
    let data = self.reader.take(len as usize)?;
    let declared_crc = self.reader.read_u32_be()?;
    let chunk = RawChunk { offset, chunk_type, data, declared_crc };
    let actual = chunk.compute_actual_crc();
    if actual != declared_crc {
      return Err(DecodeError::CorruptChunk {
        offset,
        chunk_type,
        declared: declared_crc,
        actual,
      });
    }
    trace!("chunk {chunk_type} at offset {offset}, {len} bytes");
    Ok(chunk)
  }
}
impl<'b> Iterator for ChunkIter<'b> {
  type Item = Result<RawChunk<'b>, DecodeError>;
  #[inline]
  fn next(&mut self) -> Option<Self::Item> {
    if self.finished {
      return None;
    }
    let result = self.read_chunk();
    match &result {
      Ok(chunk) if chunk.chunk_type == ChunkType::IEND => {
        self.finished = true;
        if !self.reader.is_empty() {
          debug!("ignoring {} bytes after IEND", self.reader.remaining());
        }
      }
      Ok(_) => (),
      Err(_) => self.finished = true,
    }
    Some(result)
  }
}
impl core::iter::FusedIterator for ChunkIter<'_> {}

/// A chunk, dispatched by type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PngChunk<'b> {
  /// Image Header
  Header(ImageHeader),
  /// Palette
  Palette(PaletteTable),
  /// Image Data, one piece of the compressed stream.
  ImageData(&'b [u8]),
  /// Image End
  End,
  /// Any other chunk, left as-is for the caller.
  Unknown(RawChunk<'b>),
}
impl<'b> TryFrom<RawChunk<'b>> for PngChunk<'b> {
  type Error = DecodeError;
  fn try_from(raw: RawChunk<'b>) -> Result<Self, Self::Error> {
    Ok(match raw.chunk_type {
      ChunkType::IHDR => PngChunk::Header(ImageHeader::try_from(raw.data)?),
      ChunkType::PLTE => PngChunk::Palette(PaletteTable::try_from(raw.data)?),
      ChunkType::IDAT => PngChunk::ImageData(raw.data),
      ChunkType::IEND => PngChunk::End,
      _ => PngChunk::Unknown(raw),
    })
  }
}
