use crate::{png::ImageHeader, DecodeError};

/// Resource limits for decoding.
///
/// All fields default to `None` (no limit). Limits are checked right after the
/// header is read, before any large allocation happens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Limits {
  pub max_width: Option<u64>,
  pub max_height: Option<u64>,
  /// Maximum pixel count (width * height).
  pub max_pixels: Option<u64>,
  /// Maximum size of the decompressed (still filtered) image data.
  pub max_decompressed_bytes: Option<u64>,
}
impl Limits {
  /// Checks the header's dimensions against the limits.
  pub(crate) fn check(&self, header: &ImageHeader) -> Result<(), DecodeError> {
    fn check_one(what: &'static str, value: u64, limit: Option<u64>) -> Result<(), DecodeError> {
      match limit {
        Some(limit) if value > limit => Err(DecodeError::LimitExceeded { what, value, limit }),
        _ => Ok(()),
      }
    }
    check_one("width", u64::from(header.width), self.max_width)?;
    check_one("height", u64::from(header.height), self.max_height)?;
    check_one("pixel count", u64::from(header.width) * u64::from(header.height), self.max_pixels)?;
    check_one(
      "decompressed size",
      header.decompressed_len()? as u64,
      self.max_decompressed_bytes,
    )?;
    Ok(())
  }
}
