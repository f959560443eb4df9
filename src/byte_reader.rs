#![forbid(unsafe_code)]

//! A cursor over a byte slice, with the big-endian reads PNG needs.

use crate::DecodeError;

/// Reads bytes off the front of a slice, tracking the absolute offset.
///
/// Reads never allocate. Asking for more bytes than remain is an
/// [`UnexpectedEof`](DecodeError::UnexpectedEof) error and leaves the cursor
/// where it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteReader<'b> {
  bytes: &'b [u8],
  pos: usize,
}
impl<'b> ByteReader<'b> {
  #[inline]
  #[must_use]
  pub const fn new(bytes: &'b [u8]) -> Self {
    Self { bytes, pos: 0 }
  }

  /// Offset of the next unread byte from the start of the slice.
  #[inline]
  #[must_use]
  pub const fn position(&self) -> usize {
    self.pos
  }

  #[inline]
  #[must_use]
  pub fn remaining(&self) -> usize {
    self.bytes.len() - self.pos
  }

  #[inline]
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.remaining() == 0
  }

  /// Takes the next `n` bytes.
  #[inline]
  pub fn take(&mut self, n: usize) -> Result<&'b [u8], DecodeError> {
    let available = self.remaining();
    if n > available {
      return Err(DecodeError::UnexpectedEof { offset: self.pos, needed: n, available });
    }
    let out = &self.bytes[self.pos..self.pos + n];
    self.pos += n;
    Ok(out)
  }

  #[inline]
  pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
    let mut out = [0_u8; N];
    out.copy_from_slice(self.take(N)?);
    Ok(out)
  }

  #[inline]
  pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
    self.read_array::<1>().map(|[b]| b)
  }

  #[inline]
  pub fn read_u16_be(&mut self) -> Result<u16, DecodeError> {
    self.read_array().map(u16::from_be_bytes)
  }

  #[inline]
  pub fn read_u32_be(&mut self) -> Result<u32, DecodeError> {
    self.read_array().map(u32::from_be_bytes)
  }
}
