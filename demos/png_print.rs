use pngrid::png::{ChunkIter, PngChunk};

fn main() {
  let args: Vec<String> = std::env::args().collect();
  println!("ARGS: {args:?}");
  for file_arg in args[1..].iter() {
    let path = std::path::Path::new(file_arg);
    print!("Reading `{}`... ", path.display());
    let bytes = match std::fs::read(path) {
      Ok(bytes) => {
        println!("got {} bytes.", bytes.len());
        bytes
      }
      Err(e) => {
        println!("{e:?}");
        continue;
      }
    };
    match ChunkIter::new(&bytes) {
      Ok(chunks) => {
        for (n, raw) in chunks.enumerate() {
          let chunk_res = raw.and_then(PngChunk::try_from);
          println!("{n}: {chunk_res:?}");
        }
      }
      Err(e) => println!("not a PNG: {e}"),
    }
    match pngrid::decode_png(&bytes) {
      Ok(image) => {
        println!("{}x{}, {:?}", image.width(), image.height(), image.header.color_mode);
        match image.pixels.get(0, 0) {
          Ok(px) => println!("pixel (0,0): {px:?} = {:?}", px.to_rgba8()),
          Err(e) => println!("{e}"),
        }
        if !image.skipped.is_empty() {
          println!("skipped: {:?}", image.skipped);
        }
      }
      Err(e) => println!("decode error: {e}"),
    }
  }
}
