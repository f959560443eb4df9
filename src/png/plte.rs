use super::*;

/// Palette data
///
/// Palette entries are always RGB, and the index of an entry is its position.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PaletteTable {
  entries: Vec<RGB8>,
}
impl PaletteTable {
  /// The most entries a palette can have.
  pub const MAX_ENTRIES: usize = 256;

  #[inline]
  #[must_use]
  pub fn get(&self, index: u8) -> Option<RGB8> {
    self.entries.get(usize::from(index)).copied()
  }

  #[inline]
  #[must_use]
  pub fn entries(&self) -> &[RGB8] {
    &self.entries
  }

  #[inline]
  #[must_use]
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  #[inline]
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}
impl Debug for PaletteTable {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    // currently prints no more than 4 palette entries
    f.debug_tuple("PaletteTable")
      .field(&&self.entries[..self.entries.len().min(4)])
      .field(&self.entries.len())
      .finish()
  }
}
impl TryFrom<&[u8]> for PaletteTable {
  type Error = DecodeError;
  /// Parses `PLTE` chunk data, which must be 1 to 256 whole RGB triples.
  fn try_from(data: &[u8]) -> Result<Self, Self::Error> {
    let entries: &[RGB8] = bytemuck::try_cast_slice(data)
      .map_err(|_| DecodeError::InvalidPaletteLength { len: data.len() })?;
    if entries.is_empty() || entries.len() > Self::MAX_ENTRIES {
      return Err(DecodeError::InvalidPaletteLength { len: data.len() });
    }
    let mut v = Vec::new();
    v.try_reserve_exact(entries.len())?;
    v.extend_from_slice(entries);
    Ok(Self { entries: v })
  }
}

#[test]
fn test_palette_parse() {
  let p = PaletteTable::try_from(&[10, 20, 30, 40, 50, 60][..]).unwrap();
  assert_eq!(p.len(), 2);
  assert_eq!(p.get(0), Some(RGB8::new(10, 20, 30)));
  assert_eq!(p.get(1), Some(RGB8::new(40, 50, 60)));
  assert_eq!(p.get(2), None);
}

#[test]
fn test_palette_bad_lengths() {
  for len in [0, 1, 2, 4, 5, 7, 769, 771] {
    let data = alloc::vec![0_u8; len];
    assert_eq!(
      PaletteTable::try_from(&data[..]),
      Err(DecodeError::InvalidPaletteLength { len }),
      "len {len}"
    );
  }
  assert!(PaletteTable::try_from(&[0_u8; 768][..]).is_ok());
}
