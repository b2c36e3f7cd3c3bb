//! Structures and utilities used for compressing data into the ruhuff format.

pub(crate) mod bit_writer;
mod frame_compressor;

pub use frame_compressor::*;

use std::io::Cursor;

/// Convenience function to compress some source into a new vec.
///
/// ```rust
/// use ruhuff::encoding::compress_to_vec;
/// let compressed = compress_to_vec(&[1, 2, 3, 4, 4, 4]);
/// assert!(!compressed.is_empty());
/// ```
pub fn compress_to_vec(source: &[u8]) -> Vec<u8> {
    let mut output = Vec::new();
    let mut compressor = HuffmanCompressor::new();
    compressor.set_source(Cursor::new(source));
    compressor.set_drain(&mut output);
    // in-memory sources and drains do not fail, and every counted symbol has a code
    match compressor.compress() {
        Ok(_) => output,
        Err(e) => unreachable!("compressing from memory failed: {e}"),
    }
}
