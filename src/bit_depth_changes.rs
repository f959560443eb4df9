//! Unpacking of stored samples, and making them 8 bits.
//!
//! PNG samples are 1, 2, 4, 8, or 16 bits.
//!
//! * Depths below 8 are packed several to a byte, with the leftmost sample in
//!   the high bits. Rows are padded out to a whole byte, so the last byte of a
//!   row can hold a few junk samples past the image width.
//! * 16-bit samples are two big-endian bytes.
//!
//! Going to 8 bits uses only integer operations:
//!
//! * To *increase* depth the current bit pattern becomes the top bits, and is
//!   copied down until all 8 bits are filled (so 1-bit `1` is 255, and 4-bit
//!   `0xA` is `0xAA`). Full black and full white stay that way.
//! * To *reduce* depth from 16 we keep the most significant byte. This is a
//!   truncation, not a rounding, so `0x12FF` becomes `0x12`.
//!
//! Palette indexes are never rescaled, they're only unpacked.

use bitfrob::u8_replicate_bits;

/// Iterates the samples packed within `row`, leftmost first.
///
/// Each sample is returned in the low bits of a byte. A `depth` of 8 gives the
/// bytes back unchanged. The iterator covers every sample in the bytes,
/// including trailing padding, so `take` the number you actually need.
///
/// ## Panics
/// * If `depth` is not 1, 2, 4, or 8.
#[inline]
pub fn unpack_samples(row: &[u8], depth: u32) -> impl Iterator<Item = u8> + '_ {
  assert!(matches!(depth, 1 | 2 | 4 | 8), "can't unpack a depth of {depth}");
  let per_byte = 8 / depth;
  let mask = ((1_u32 << depth) - 1) as u8;
  row.iter().copied().flat_map(move |byte| {
    (0..per_byte).map(move |i| (byte >> (8 - depth * (i + 1))) & mask)
  })
}

/// Makes a sample of less than 8 bits into an 8-bit value by bit replication.
///
/// A `depth` of 8 is a no-op.
#[inline]
#[must_use]
pub fn low_depth_to_8(depth: u32, sample: u8) -> u8 {
  if depth >= 8 {
    sample
  } else {
    u8_replicate_bits(depth, sample)
  }
}

/// Reduces a 16-bit sample to 8 bits by keeping the most significant byte.
#[inline]
#[must_use]
pub const fn u16_to_8(sample: u16) -> u8 {
  (sample >> 8) as u8
}

/// Gets channel `channel` of a pixel stored at 8 or 16 bits per channel, as
/// an 8-bit value.
#[inline]
#[must_use]
pub fn channel_to_8(pixel: &[u8], channel: usize, depth: u32) -> u8 {
  if depth == 16 {
    let i = channel * 2;
    u16_to_8(u16::from_be_bytes([pixel[i], pixel[i + 1]]))
  } else {
    pixel[channel]
  }
}

#[test]
fn test_unpack_samples_msb_first() {
  let row = [0b1011_0010];
  assert_eq!(
    unpack_samples(&row, 1).collect::<alloc::vec::Vec<_>>(),
    [1, 0, 1, 1, 0, 0, 1, 0]
  );
  assert_eq!(unpack_samples(&row, 2).collect::<alloc::vec::Vec<_>>(), [2, 3, 0, 2]);
  assert_eq!(unpack_samples(&row, 4).collect::<alloc::vec::Vec<_>>(), [0xB, 0x2]);
  assert_eq!(unpack_samples(&[0x01, 0xFF], 8).collect::<alloc::vec::Vec<_>>(), [1, 255]);
}

#[test]
fn test_low_depth_to_8() {
  assert_eq!(low_depth_to_8(1, 0), 0);
  assert_eq!(low_depth_to_8(1, 1), 255);
  assert_eq!(low_depth_to_8(2, 0b10), 0b1010_1010);
  assert_eq!(low_depth_to_8(2, 3), 255);
  assert_eq!(low_depth_to_8(4, 0xA), 0xAA);
  assert_eq!(low_depth_to_8(8, 0x42), 0x42);
}

#[test]
fn test_16_bit_keeps_the_high_byte() {
  assert_eq!(u16_to_8(0x12FF), 0x12);
  assert_eq!(u16_to_8(0x00FF), 0x00);
  assert_eq!(u16_to_8(0xFFFF), 0xFF);
  let px = [0xAB, 0xCD, 0x01, 0x02];
  assert_eq!(channel_to_8(&px, 0, 16), 0xAB);
  assert_eq!(channel_to_8(&px, 1, 16), 0x01);
  assert_eq!(channel_to_8(&px, 3, 8), 0x02);
}
