#![no_std]
#![cfg_attr(docs_rs, feature(doc_cfg))]

//! A crate for decoding PNG data into a grid of pixels.
//!
//! ```no_run
//! let png: &[u8] = unimplemented!("data from somewhere");
//! let image = pngrid::decode_png(png)?;
//! let top_left = image.pixels.get(0, 0)?;
//! println!("{}x{}, first pixel {:?}", image.width(), image.height(), top_left.rgb());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Decoding is a single synchronous pass over bytes that are already in
//! memory. The crate never touches files, and never installs a logger: it
//! reports through the [`log`] facade, so hook up whatever logger you like.
//!
//! See the [`png`] module for the individual decoding stages.

extern crate alloc;

#[cfg(target_pointer_width = "16")]
compile_error!("this crate assumes 32-bit or bigger pointers!");

pub mod pixel_formats;
pub use pixel_formats::*;

pub mod bit_depth_changes;

pub mod byte_reader;

mod error;
pub use error::*;

mod image;
pub use image::*;

mod limits;
pub use limits::*;

pub mod png;
pub use png::{decode_png, decode_png_with, ImageHeader, PngImage};
