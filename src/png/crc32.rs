//! The CRC-32 used by PNG chunks (ISO 3309 / ITU-T V.42, same as zlib's).
//!
//! Bytes are processed least significant bit first, so the table is built from
//! the bit-reversed polynomial.

/// `0x04C1_1DB7`, bit-reversed.
const POLYNOMIAL: u32 = 0xEDB8_8320;

/// The CRC remainder of the single byte `n`, one bit at a time.
const fn table_entry(n: u8) -> u32 {
  let mut c = n as u32;
  let mut bit = 0;
  while bit < 8 {
    // all ones when the low bit is set, otherwise all zeroes
    let mask = (c & 1).wrapping_neg();
    c = (c >> 1) ^ (POLYNOMIAL & mask);
    bit += 1;
  }
  c
}

const TABLE: [u32; 256] = {
  let mut table = [0; 256];
  let mut i = 0;
  while i < table.len() {
    table[i] = table_entry(i as u8);
    i += 1;
  }
  table
};

/// Computes the CRC of all the bytes given.
///
/// For a chunk, that's the four chunk type bytes followed by the chunk data.
#[inline]
#[must_use]
pub fn png_crc(bytes: impl Iterator<Item = u8>) -> u32 {
  !bytes.fold(!0, |crc, byte| TABLE[usize::from(crc as u8 ^ byte)] ^ (crc >> 8))
}

#[test]
fn test_table_entries() {
  assert_eq!(TABLE[0], 0);
  assert_eq!(TABLE[1], 0x7707_3096);
  assert_eq!(TABLE[128], POLYNOMIAL);
  assert_eq!(TABLE[255], 0x2D02_EF8D);
}

#[test]
fn test_png_crc_known_values() {
  // the check value for CRC-32
  assert_eq!(png_crc(b"123456789".iter().copied()), 0xCBF4_3926);
  // every PNG ends with this exact IEND chunk
  assert_eq!(png_crc(b"IEND".iter().copied()), 0xAE42_6082);
  assert_eq!(png_crc(core::iter::empty()), 0);
}
