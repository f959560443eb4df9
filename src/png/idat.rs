//! Assembly and decompression of the `IDAT` data.
//!
//! * Image data is stored with Zlib compression applied.
//! * Images can have more than one IDAT chunk. Multiple chunks are treated as
//!   a single Zlib datastream, and a chunk boundary can fall anywhere within
//!   that stream, so the pieces are joined before anything is decompressed.

use super::*;

use miniz_oxide::inflate::{
  core::{
    decompress,
    inflate_flags::{
      TINFL_FLAG_COMPUTE_ADLER32, TINFL_FLAG_PARSE_ZLIB_HEADER,
      TINFL_FLAG_USING_NON_WRAPPING_OUTPUT_BUF,
    },
    DecompressorOxide,
  },
  TINFLStatus,
};

/// DEFLATE can't expand data by more than about this much.
const MAX_DEFLATE_RATIO: usize = 1032;

/// All of the `IDAT` payloads, joined in the order they appeared.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CompressedPayload {
  bytes: Vec<u8>,
}
impl CompressedPayload {
  #[inline]
  #[must_use]
  pub const fn new() -> Self {
    Self { bytes: Vec::new() }
  }

  /// Appends the data of one `IDAT` chunk.
  pub fn push(&mut self, idat: &[u8]) -> Result<(), DecodeError> {
    self.bytes.try_reserve(idat.len())?;
    self.bytes.extend_from_slice(idat);
    Ok(())
  }

  #[inline]
  #[must_use]
  pub fn as_bytes(&self) -> &[u8] {
    &self.bytes
  }

  #[inline]
  #[must_use]
  pub fn len(&self) -> usize {
    self.bytes.len()
  }

  #[inline]
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.bytes.is_empty()
  }
}
impl Debug for CompressedPayload {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_tuple("CompressedPayload")
      .field(&&self.bytes[..self.bytes.len().min(12)])
      .field(&self.bytes.len())
      .finish()
  }
}

/// Checks the two byte zlib header.
///
/// PNG only allows compression method 8 (DEFLATE) with a window of at most
/// 32K, and no preset dictionary.
fn check_zlib_header(cmf: u8, flg: u8) -> Result<(), DecodeError> {
  if (cmf & 0x0F) != 8 {
    return Err(DecodeError::InflateError { reason: "zlib compression method is not DEFLATE" });
  }
  if (cmf >> 4) > 7 {
    return Err(DecodeError::InflateError { reason: "zlib window size is too large" });
  }
  if ((u16::from(cmf) << 8) | u16::from(flg)) % 31 != 0 {
    return Err(DecodeError::InflateError { reason: "zlib header check bits are wrong" });
  }
  if (flg & 0x20) != 0 {
    return Err(DecodeError::InflateError { reason: "zlib preset dictionaries are not allowed" });
  }
  Ok(())
}

/// Decompresses the joined image data into a buffer of exactly `expected_len`
/// bytes.
///
/// The zlib header is checked up front, then the whole stream is inflated
/// with `miniz_oxide`, which also checks the Adler-32 trailer against the
/// output.
///
/// ## Failure
/// * [`TruncatedStream`](DecodeError::TruncatedStream) when the data runs out
///   early, decompresses to more or fewer bytes than `expected_len`, or is
///   missing its trailer.
/// * [`InflateError`](DecodeError::InflateError) for a bad header, invalid
///   DEFLATE data, or a checksum mismatch.
pub fn inflate_image_data(
  payload: &CompressedPayload, expected_len: usize,
) -> Result<Vec<u8>, DecodeError> {
  let zlib_data = payload.as_bytes();
  let (cmf, flg, deflate_data) = match zlib_data {
    [cmf, flg, rest @ ..] => (*cmf, *flg, rest),
    short => {
      return Err(DecodeError::TruncatedStream {
        context: "zlib header",
        expected: 2,
        actual: short.len(),
      })
    }
  };
  check_zlib_header(cmf, flg)?;

  // Don't allocate a huge buffer that the input can't possibly fill.
  let max_possible = deflate_data.len().saturating_mul(MAX_DEFLATE_RATIO).saturating_add(64);
  if expected_len > max_possible {
    return Err(DecodeError::TruncatedStream {
      context: "image data",
      expected: expected_len,
      actual: max_possible,
    });
  }

  let mut out = Vec::new();
  out.try_reserve_exact(expected_len)?;
  out.resize(expected_len, 0);

  let flags = TINFL_FLAG_PARSE_ZLIB_HEADER
    | TINFL_FLAG_COMPUTE_ADLER32
    | TINFL_FLAG_USING_NON_WRAPPING_OUTPUT_BUF;
  let mut state = alloc::boxed::Box::<DecompressorOxide>::default();
  let (status, consumed, written) = decompress(&mut state, zlib_data, &mut out, 0, flags);
  debug!("inflated {consumed} of {} bytes into {written} of {expected_len}", zlib_data.len());
  match status {
    TINFLStatus::Done => (),
    TINFLStatus::HasMoreOutput => {
      return Err(DecodeError::TruncatedStream {
        context: "image data (stream is too long)",
        expected: expected_len,
        actual: written,
      })
    }
    // the input ran out, possibly partway through the Adler-32 trailer
    TINFLStatus::NeedsMoreInput | TINFLStatus::FailedCannotMakeProgress => {
      return Err(DecodeError::TruncatedStream {
        context: "image data",
        expected: expected_len,
        actual: written,
      })
    }
    TINFLStatus::Adler32Mismatch => {
      return Err(DecodeError::InflateError { reason: "Adler-32 checksum mismatch" })
    }
    _ => return Err(DecodeError::InflateError { reason: "invalid DEFLATE data" }),
  }
  if written != expected_len {
    return Err(DecodeError::TruncatedStream {
      context: "image data",
      expected: expected_len,
      actual: written,
    });
  }
  if consumed < zlib_data.len() {
    warn!("ignoring {} bytes after the end of the zlib stream", zlib_data.len() - consumed);
  }
  Ok(out)
}
