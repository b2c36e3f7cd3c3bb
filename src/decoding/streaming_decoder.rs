use super::bit_reader::BitReader;
use super::errors::DecompressError;
use crate::frame::{read_file_header, FileHeader};
use crate::huff0::HuffmanTree;
use crate::io::ByteReader;
use std::io::{Error, ErrorKind, Read};

/// High level decoder that implements a io::Read that can be used with
/// io::Read::read_to_end / io::Read::read_exact or passing this to another library / module
/// as a source for the decoded content.
///
/// Creating the decoder reads and validates the header and the tree, the payload is then
/// decoded on demand. Exactly `file_size` bytes are produced, padding bits at the end of the
/// payload are never decoded.
pub struct StreamingDecoder<R: Read> {
    header: FileHeader,
    tree: HuffmanTree,
    bits: BitReader<R>,
    decoded: u64,
}

impl<R: Read> StreamingDecoder<R> {
    pub fn new(source: R) -> Result<StreamingDecoder<R>, DecompressError> {
        let mut source = ByteReader::new(source);
        let header = read_file_header(&mut source)?;

        let expected = usize::from(header.tree_size);
        let mut serialized_tree = vec![0u8; expected];
        let got = source.read_bytes(&mut serialized_tree)?;
        if got < expected {
            return Err(DecompressError::TruncatedTree { got, expected });
        }
        let tree = HuffmanTree::rebuild(&serialized_tree)?;
        vprintln!(leaves = tree.leaf_count(), "Rebuilt huffman tree");

        Ok(StreamingDecoder {
            header,
            tree,
            bits: BitReader::new(source),
            decoded: 0,
        })
    }

    /// The header of the artifact being decoded
    pub fn header(&self) -> &FileHeader {
        &self.header
    }

    /// Amount of compressed bytes consumed so far, header and tree included
    pub fn bytes_read(&self) -> u64 {
        self.bits.bytes_read()
    }

    /// Amount of bytes decoded so far
    pub fn bytes_decoded(&self) -> u64 {
        self.decoded
    }

    /// True once all `file_size` bytes have been decoded
    pub fn is_finished(&self) -> bool {
        self.decoded == self.header.file_size
    }

    /// Decode up to `target.len()` bytes into `target`, returning how many were decoded.
    /// Returns 0 once the decoder is finished.
    pub fn decode_into(&mut self, target: &mut [u8]) -> Result<usize, DecompressError> {
        let remaining = self.header.file_size - self.decoded;
        let amount = target
            .len()
            .min(usize::try_from(remaining).unwrap_or(usize::MAX));
        for slot in target[..amount].iter_mut() {
            *slot = self.decode_symbol()?;
            self.decoded += 1;
        }
        Ok(amount)
    }

    /// Walk from the root, one bit per level, until a leaf is reached
    fn decode_symbol(&mut self) -> Result<u8, DecompressError> {
        let mut node = self.tree.root();
        loop {
            let bit = self
                .bits
                .read_bit()?
                .ok_or(DecompressError::UnexpectedEndOfPayload {
                    decoded: self.decoded,
                    expected: self.header.file_size,
                })?;
            node = node.child(bit).ok_or(DecompressError::DegenerateTree)?;
            if let Some(symbol) = node.symbol() {
                return Ok(symbol);
            }
        }
    }
}

impl<R: Read> Read for StreamingDecoder<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.decode_into(buf).map_err(|e| match e {
            DecompressError::IoError(e) => e,
            e @ DecompressError::UnexpectedEndOfPayload { .. } => {
                Error::new(ErrorKind::UnexpectedEof, e)
            }
            e => Error::new(ErrorKind::InvalidData, e),
        })
    }
}
