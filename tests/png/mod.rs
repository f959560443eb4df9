use pngrid::{
  png::{reconstruct_row, ChunkIter, ChunkType, FilterType},
  decode_png, decode_png_with, DecodeError, Limits, Pixel, RGB8, RGBA8, Y8, YA8,
};

use encode::*;

/// Every legal (color type, bit depth) pair.
const FORMATS: &[(u8, &[u8])] = &[
  (0, &[1, 2, 4, 8, 16]),
  (2, &[8, 16]),
  (3, &[1, 2, 4, 8]),
  (4, &[8, 16]),
  (6, &[8, 16]),
];

fn rand_samples(count: usize, depth: u8) -> Vec<u16> {
  let mask = if depth == 16 { u16::MAX } else { (1_u16 << depth) - 1 };
  super::rand_bytes(count * 2)
    .chunks_exact(2)
    .map(|b| u16::from_be_bytes([b[0], b[1]]) & mask)
    .collect()
}

/// What the decoder should give for one pixel's worth of source samples.
fn expected_pixel(color_type: u8, depth: u8, px: &[u16], palette: &[u8]) -> Pixel {
  let to_8 = |s: u16| -> u8 {
    match depth {
      16 => (s >> 8) as u8,
      8 => s as u8,
      d => (u32::from(s) * 255 / ((1 << d) - 1)) as u8,
    }
  };
  match color_type {
    0 => Pixel::Y(Y8 { y: to_8(px[0]) }),
    2 => Pixel::RGB(RGB8::new(to_8(px[0]), to_8(px[1]), to_8(px[2]))),
    3 => {
      let i = usize::from(px[0]) * 3;
      Pixel::RGB(RGB8::new(palette[i], palette[i + 1], palette[i + 2]))
    }
    4 => Pixel::YA(YA8 { y: to_8(px[0]), a: to_8(px[1]) }),
    6 => Pixel::RGBA(RGBA8::new(to_8(px[0]), to_8(px[1]), to_8(px[2]), to_8(px[3]))),
    _ => unreachable!(),
  }
}

/// A small valid RGB image for the error tests to break.
fn sample_png() -> Vec<u8> {
  let samples = rand_samples(4 * 3 * 3, 8);
  let raw = filtered_data(4, 3, 8, 2, &samples, |y| (y % 5) as u8);
  build_png(&ihdr_data(4, 3, 8, 2, 0), None, &zlib(&raw), 16)
}

#[test]
fn test_every_format_decodes() {
  for &(color_type, depths) in FORMATS {
    for &depth in depths {
      for width in [1_u32, 3, 7, 8, 13] {
        let height = 6_u32;
        let channels = channels_of(color_type);
        let count = (width * height) as usize * channels;
        let samples = rand_samples(count, depth);
        let palette =
          if color_type == 3 { super::rand_bytes((1_usize << depth) * 3) } else { Vec::new() };
        let raw = filtered_data(width, height, depth, color_type, &samples, |y| (y % 5) as u8);
        let png = build_png(
          &ihdr_data(width, height, depth, color_type, 0),
          (color_type == 3).then_some(palette.as_slice()),
          &zlib(&raw),
          11,
        );
        let image = decode_png(&png).unwrap_or_else(|e| {
          panic!("color_type {color_type}, depth {depth}, width {width}: {e}")
        });
        assert_eq!(image.width(), width);
        assert_eq!(image.height(), height);
        assert_eq!(image.pixels.len(), (width * height) as usize);
        assert_eq!(image.skipped, [ChunkType(*b"tEXt")]);
        for y in 0..height {
          for x in 0..width {
            let i = (y * width + x) as usize * channels;
            let expected = expected_pixel(color_type, depth, &samples[i..i + channels], &palette);
            assert_eq!(
              image.pixels.get(x, y),
              Ok(expected),
              "color_type {color_type}, depth {depth}, width {width}, at ({x},{y})"
            );
          }
        }
        assert!(image.pixels.get(width, 0).is_err());
        assert!(image.pixels.get(0, height).is_err());
      }
    }
  }
}

#[test]
fn test_reconstruct_row_undoes_every_filter() {
  for filter in FilterType::ALL {
    for unit in 1..=8 {
      for _ in 0..20 {
        let len = unit * (1 + usize::from(super::rand_bytes(1)[0] % 16));
        let row = super::rand_bytes(len);
        let prev = super::rand_bytes(len);
        let mut data = filter_row(filter as u8, &row, &prev, unit);
        reconstruct_row(filter, &mut data, &prev, unit);
        assert_eq!(data, row, "{filter:?} with unit {unit}");
      }
    }
  }
}

#[test]
fn test_rgba_2x2() {
  let raw = [
    0, 255, 0, 0, 255, 0, 255, 0, 255, //
    0, 0, 0, 255, 255, 255, 255, 255, 255,
  ];
  let png = build_png(&ihdr_data(2, 2, 8, 6, 0), None, &zlib(&raw), 1000);
  let image = decode_png(&png).unwrap();
  assert_eq!(image.pixels.get(0, 0).unwrap().rgb(), RGB8::new(255, 0, 0));
  assert_eq!(image.pixels.get(1, 0).unwrap().rgb(), RGB8::new(0, 255, 0));
  assert_eq!(image.pixels.get(0, 1).unwrap().rgb(), RGB8::new(0, 0, 255));
  assert_eq!(image.pixels.get(1, 1), Ok(Pixel::RGBA(RGBA8::new(255, 255, 255, 255))));
}

#[test]
fn test_palette_4_bit() {
  let plte = [10, 20, 30, 40, 50, 60];
  let png = build_png(&ihdr_data(2, 1, 4, 3, 0), Some(&plte), &zlib(&[0, 0x01]), 1000);
  let image = decode_png(&png).unwrap();
  assert_eq!(image.pixels.get(0, 0), Ok(Pixel::RGB(RGB8::new(10, 20, 30))));
  assert_eq!(image.pixels.get(1, 0), Ok(Pixel::RGB(RGB8::new(40, 50, 60))));
  assert_eq!(image.palette.map(|p| p.len()), Some(2));
}

#[test]
fn test_16_bit_keeps_high_byte() {
  let raw = [0, 0x12, 0xFF, 0x80, 0x00];
  let png = build_png(&ihdr_data(2, 1, 16, 0, 0), None, &zlib(&raw), 1000);
  let image = decode_png(&png).unwrap();
  assert_eq!(image.pixels.get(0, 0), Ok(Pixel::Y(Y8 { y: 0x12 })));
  assert_eq!(image.pixels.get(1, 0), Ok(Pixel::Y(Y8 { y: 0x80 })));
}

#[test]
fn test_any_flipped_chunk_byte_is_corrupt() {
  let png = sample_png();
  let spans: Vec<(usize, usize)> = ChunkIter::new(&png)
    .unwrap()
    .map(|c| c.unwrap())
    .map(|c| (c.offset(), c.data().len()))
    .collect();
  for (offset, len) in spans {
    // type, data, and CRC bytes. The length field is left alone.
    for i in offset + 4..offset + 8 + len + 4 {
      let mut bad = png.clone();
      bad[i] ^= 0x20;
      match decode_png(&bad) {
        Err(DecodeError::CorruptChunk { offset: o, .. }) => assert_eq!(o, offset),
        other => panic!("flipping byte {i}: {other:?}"),
      }
    }
  }
}

#[test]
fn test_short_final_idat_is_truncated() {
  let samples = rand_samples(5 * 4, 8);
  let raw = filtered_data(5, 4, 8, 0, &samples, |_| 1);
  let compressed = zlib(&raw);
  let png = build_png(&ihdr_data(5, 4, 8, 0, 0), None, &compressed, 8);
  assert!(decode_png(&png).is_ok());
  // Same file, but the last IDAT is one byte short (with a correct CRC).
  let short = build_png(&ihdr_data(5, 4, 8, 0, 0), None, &compressed[..compressed.len() - 1], 8);
  assert!(matches!(decode_png(&short), Err(DecodeError::TruncatedStream { .. })));
}

fn with(chunks: &[(&[u8; 4], &[u8])]) -> Vec<u8> {
  let mut out = pngrid::png::PNG_SIGNATURE.to_vec();
  for (ty, data) in chunks {
    push_chunk(&mut out, ty, data);
  }
  out
}

#[test]
fn test_structure_errors() {
  let ihdr = ihdr_data(1, 1, 8, 0, 0);
  let idat = zlib(&[0, 7]);

  let good = with(&[(b"IHDR", &ihdr), (b"IDAT", &idat), (b"IEND", &[])]);
  assert_eq!(decode_png(&good).unwrap().pixels.get(0, 0), Ok(Pixel::Y(Y8 { y: 7 })));

  let mut not_png = good.clone();
  not_png[0] = b'X';
  assert_eq!(decode_png(&not_png), Err(DecodeError::FormatError));

  let no_header = with(&[(b"IDAT", &idat), (b"IEND", &[])]);
  assert_eq!(decode_png(&no_header), Err(DecodeError::MissingHeader { found: ChunkType::IDAT }));

  let two_headers = with(&[(b"IHDR", &ihdr), (b"IHDR", &ihdr), (b"IDAT", &idat), (b"IEND", &[])]);
  assert!(matches!(decode_png(&two_headers), Err(DecodeError::DuplicateHeader { offset: 33 })));

  let gray_palette =
    with(&[(b"IHDR", &ihdr), (b"PLTE", &[1, 2, 3]), (b"IDAT", &idat), (b"IEND", &[])]);
  assert!(matches!(decode_png(&gray_palette), Err(DecodeError::UnexpectedPalette { .. })));

  // a gray image rejects PLTE before its length is looked at
  let short_gray_palette =
    with(&[(b"IHDR", &ihdr), (b"PLTE", &[1, 2]), (b"IDAT", &idat), (b"IEND", &[])]);
  assert!(matches!(
    decode_png(&short_gray_palette),
    Err(DecodeError::UnexpectedPalette { offset: 33, .. })
  ));

  let indexed = ihdr_data(1, 1, 8, 3, 0);
  let no_palette = with(&[(b"IHDR", &indexed), (b"IDAT", &idat), (b"IEND", &[])]);
  assert_eq!(decode_png(&no_palette), Err(DecodeError::MissingPalette));

  let interlaced = with(&[(b"IHDR", &ihdr_data(1, 1, 8, 0, 1)), (b"IDAT", &idat), (b"IEND", &[])]);
  assert_eq!(decode_png(&interlaced), Err(DecodeError::UnsupportedInterlace));

  let no_end = with(&[(b"IHDR", &ihdr), (b"IDAT", &idat)]);
  assert!(matches!(decode_png(&no_end), Err(DecodeError::UnexpectedEof { .. })));

  let no_data = with(&[(b"IHDR", &ihdr), (b"IEND", &[])]);
  assert!(matches!(decode_png(&no_data), Err(DecodeError::TruncatedStream { .. })));

  // a valid zlib header, then a final block of the reserved type 3
  let reserved_block: [u8; 8] = [0x78, 0x9C, 0x07, 0, 0, 0, 0, 0];
  let bad_deflate = with(&[(b"IHDR", &ihdr), (b"IDAT", &reserved_block), (b"IEND", &[])]);
  assert_eq!(
    decode_png(&bad_deflate),
    Err(DecodeError::InflateError { reason: "invalid DEFLATE data" })
  );

  let zero_width = with(&[(b"IHDR", &ihdr_data(0, 1, 8, 0, 0)), (b"IDAT", &idat), (b"IEND", &[])]);
  assert!(matches!(decode_png(&zero_width), Err(DecodeError::InvalidDimensions { .. })));

  let bad_depth = with(&[(b"IHDR", &ihdr_data(1, 1, 16, 3, 0)), (b"IDAT", &idat), (b"IEND", &[])]);
  assert!(matches!(decode_png(&bad_depth), Err(DecodeError::InvalidHeaderField { .. })));
}

#[test]
fn test_ancillary_chunks_are_skipped() {
  let ihdr = ihdr_data(2, 1, 8, 0, 0);
  let idat = zlib(&[0, 1, 2]);
  let (first, second) = idat.split_at(3);
  let gama = 100_000_u32.to_be_bytes();
  let png = with(&[
    (b"IHDR", &ihdr),
    (b"gAMA", &gama),
    (b"IDAT", first),
    (b"zzZz", b"whatever"),
    (b"IDAT", second),
    (b"IEND", &[]),
  ]);
  let image = decode_png(&png).unwrap();
  assert_eq!(image.skipped, [ChunkType(*b"gAMA"), ChunkType(*b"zzZz")]);
  assert_eq!(image.pixels.to_rgba8_vec(), [RGBA8::new(1, 1, 1, 255), RGBA8::new(2, 2, 2, 255)]);
}

#[test]
fn test_limits() {
  let png = sample_png();
  assert!(decode_png_with(&png, &Limits::default()).is_ok());
  let tight = Limits { max_width: Some(3), ..Limits::default() };
  assert_eq!(
    decode_png_with(&png, &tight),
    Err(DecodeError::LimitExceeded { what: "width", value: 4, limit: 3 })
  );
  let tight = Limits { max_pixels: Some(11), ..Limits::default() };
  assert!(matches!(decode_png_with(&png, &tight), Err(DecodeError::LimitExceeded { .. })));
  let tight = Limits { max_decompressed_bytes: Some(38), ..Limits::default() };
  assert!(matches!(decode_png_with(&png, &tight), Err(DecodeError::LimitExceeded { .. })));
  let exact = Limits { max_decompressed_bytes: Some(39), ..Limits::default() };
  assert!(decode_png_with(&png, &exact).is_ok());
}

#[test]
fn test_huge_claimed_size_fails_cleanly() {
  let png = build_png(&ihdr_data(1 << 30, 1 << 30, 16, 6, 0), None, &zlib(&[0; 64]), 1000);
  assert!(decode_png(&png).is_err());
}

#[test]
fn test_decode_png_no_panics() {
  // random data should never panic the decoder
  for _ in 0..50 {
    let v = super::rand_bytes(1024);
    assert!(decode_png(&v).is_err());
  }
  // not even when it looks like it starts right
  let png = sample_png();
  for _ in 0..200 {
    let mut v = png.clone();
    let noise = super::rand_bytes(4);
    let at = usize::from(u16::from_be_bytes([noise[0], noise[1]])) % v.len();
    v[at] ^= noise[2] | 1;
    let _ = decode_png(&v);
    v.truncate(at);
    assert!(decode_png(&v).is_err());
  }
}
