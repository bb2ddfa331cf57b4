//! Image decoding for classifier input.

mod decode;

pub use decode::{decode_image_bytes, decode_image_file};
