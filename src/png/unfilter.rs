//! From the PNG standard:
//!
//! > Filters are applied to **bytes**, not to pixels, regardless of the bit
//! > depth or color type of the image.
//!
//! Each filter predicts a byte from its already-known neighbors:
//!
//! ```text
//! c b
//! a x
//! ```
//!
//! * `a`: the byte one [`filter_unit`](ImageHeader::filter_unit) to the left.
//! * `b`: the byte directly above, in the previous scanline.
//! * `c`: the byte to the left of `b`.
//!
//! Neighbors outside of the image are 0, and all of the arithmetic wraps
//! modulo 256.

use super::*;

/// The per-scanline filter selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum FilterType {
  None = 0,
  Sub = 1,
  Up = 2,
  Average = 3,
  Paeth = 4,
}
impl FilterType {
  pub const ALL: [Self; 5] = [Self::None, Self::Sub, Self::Up, Self::Average, Self::Paeth];
}
impl TryFrom<u8> for FilterType {
  type Error = u8;
  #[inline]
  fn try_from(value: u8) -> Result<Self, Self::Error> {
    Ok(match value {
      0 => Self::None,
      1 => Self::Sub,
      2 => Self::Up,
      3 => Self::Average,
      4 => Self::Paeth,
      other => return Err(other),
    })
  }
}

/// Reconstruct Filter Type 3
///
/// The sum is done without overflow before the halving.
#[inline]
#[must_use]
const fn reconstruct_average(fx: u8, ra: u8, rb: u8) -> u8 {
  fx.wrapping_add(((ra as u16 + rb as u16) / 2) as u8)
}

/// The Paeth filter function computes a simple linear function of the three
/// neighboring bytes (left `a`, above `b`, upper left `c`).
///
/// The output is the neighbor closest to the computed value, with ties going
/// to `a`, then `b`, then `c`.
#[inline]
#[must_use]
pub const fn paeth_predictor(a: u8, b: u8, c: u8) -> u8 {
  // p ranges from -255 to 510, so the math is done in i32.
  let (wa, wb, wc) = (a as i32, b as i32, c as i32);
  let p = wa + wb - wc;
  let pa = (p - wa).abs();
  let pb = (p - wb).abs();
  let pc = (p - wc).abs();
  // tie order matters: a, then b, then c
  if pa <= pb && pa <= pc {
    a
  } else if pb <= pc {
    b
  } else {
    c
  }
}

/// Undoes one filter on one scanline, in place.
///
/// * `row` is the filtered scanline data, without the filter type byte.
/// * `prev` is the fully reconstructed previous scanline. For the first line
///   of the image pass all zeroes.
/// * `unit` is the image's [`filter_unit`](ImageHeader::filter_unit).
///
/// Bytes are reconstructed strictly left to right, since each one can depend
/// on the already-reconstructed bytes before it.
///
/// ## Panics
/// * If `row` and `prev` have different lengths, or `unit` is 0.
pub fn reconstruct_row(filter: FilterType, row: &mut [u8], prev: &[u8], unit: usize) {
  assert_eq!(row.len(), prev.len());
  assert!(unit > 0);
  let lead = unit.min(row.len());
  match filter {
    FilterType::None => (),
    FilterType::Sub => {
      // the first pixel has no left neighbor, so it's left as-is
      for i in lead..row.len() {
        row[i] = row[i].wrapping_add(row[i - unit]);
      }
    }
    FilterType::Up => {
      row.iter_mut().zip(prev.iter()).for_each(|(x, b)| *x = x.wrapping_add(*b));
    }
    FilterType::Average => {
      for i in 0..lead {
        row[i] = reconstruct_average(row[i], 0, prev[i]);
      }
      for i in lead..row.len() {
        row[i] = reconstruct_average(row[i], row[i - unit], prev[i]);
      }
    }
    FilterType::Paeth => {
      // with `a` and `c` both 0 the predictor always picks `b`
      for i in 0..lead {
        row[i] = row[i].wrapping_add(paeth_predictor(0, prev[i], 0));
      }
      for i in lead..row.len() {
        row[i] = row[i].wrapping_add(paeth_predictor(row[i - unit], prev[i], prev[i - unit]));
      }
    }
  }
}
