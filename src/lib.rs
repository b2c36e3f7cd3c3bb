//! A lossless file compressor built on static Huffman coding.
//!
//! The whole input is scanned once to build a byte histogram, a Huffman tree is
//! derived from it, and every input byte is then replaced by its code. The resulting
//! artifact is self describing: a fixed header, the tree in postorder, and the packed
//! payload.
//!
//! # Examples
//! ```
//! use ruhuff::decoding::decode_all_to_vec;
//! use ruhuff::encoding::compress_to_vec;
//!
//! let data = b"abracadabra";
//! let compressed = compress_to_vec(data);
//! let decompressed = decode_all_to_vec(&compressed).unwrap();
//! assert_eq!(&decompressed, data);
//! ```
#![deny(trivial_casts, trivial_numeric_casts, rust_2018_idioms)]

macro_rules! vprintln {
    ($($x:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::debug!($($x)*);
    }
}

pub mod common;
pub mod decoding;
pub mod encoding;
pub mod frame;
pub mod huff0;
pub mod io;
pub mod stats;
#[cfg(test)]
mod tests;

pub use decoding::StreamingDecoder;
pub use encoding::HuffmanCompressor;
pub use frame::FileHeader;
pub use stats::CodecStats;
