//! Structures and utilities used for decoding ruhuff formatted data

pub mod errors;
pub mod streaming_decoder;

pub(crate) mod bit_reader;

pub use errors::DecompressError;
pub use streaming_decoder::StreamingDecoder;

use crate::common::BLOCK_SIZE;
use crate::frame::FileHeader;
use crate::io::ByteWriter;
use crate::stats::{CodecStats, Direction};
use std::io::{Read, Write};

/// Decode a whole artifact from `source` into `drain`, in blocks.
///
/// Returns the header, so the caller can restore the recorded permissions, and the sizes
/// of both sides. Nothing is written to `drain` unless the header and the tree are valid.
pub fn decode_all<R: Read, W: Write>(
    source: R,
    drain: W,
) -> Result<(FileHeader, CodecStats), DecompressError> {
    let decoder = StreamingDecoder::new(source)?;
    decode_to_drain(decoder, drain)
}

/// Decode everything `decoder` has left into `drain`, in blocks.
///
/// Useful when the drain should only be created once the artifact is known to be valid:
/// construct the [`StreamingDecoder`] first, then open the drain.
pub fn decode_to_drain<R: Read, W: Write>(
    mut decoder: StreamingDecoder<R>,
    drain: W,
) -> Result<(FileHeader, CodecStats), DecompressError> {
    let mut drain = ByteWriter::new(drain);
    let mut block = vec![0u8; BLOCK_SIZE];
    loop {
        let decoded = decoder.decode_into(&mut block)?;
        if decoded == 0 {
            break;
        }
        drain.write_bytes(&block[..decoded])?;
    }
    drain.flush()?;

    let stats = CodecStats {
        direction: Direction::Decompress,
        uncompressed_size: drain.bytes_written(),
        compressed_size: decoder.bytes_read(),
    };
    vprintln!(
        uncompressed_size = stats.uncompressed_size,
        compressed_size = stats.compressed_size,
        "Decompression finished"
    );
    Ok((*decoder.header(), stats))
}

/// Convenience function to decode a whole artifact held in memory.
///
/// ```rust
/// use ruhuff::decoding::decode_all_to_vec;
/// use ruhuff::encoding::compress_to_vec;
/// let compressed = compress_to_vec(b"ababab");
/// assert_eq!(decode_all_to_vec(&compressed).unwrap(), b"ababab");
/// ```
pub fn decode_all_to_vec(source: &[u8]) -> Result<Vec<u8>, DecompressError> {
    let mut output = Vec::new();
    decode_all(source, &mut output)?;
    Ok(output)
}
