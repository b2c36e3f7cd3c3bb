//! Utilities and interfaces for compressing a whole input into one artifact.

use super::bit_writer::BitWriter;
use crate::common::BLOCK_SIZE;
use crate::frame::FileHeader;
use crate::huff0::{Histogram, HuffmanTree, TreeError};
use crate::io::{ByteReader, ByteWriter};
use crate::stats::{CodecStats, Direction};
use std::io::{Error, Read, Seek, Write};

/// Mode bits used when the caller does not provide any
pub const DEFAULT_PERMISSIONS: u16 = 0o644;

/// An interface for compressing arbitrary data with a static Huffman code.
///
/// The source is read twice: once to count symbols and once to emit their codes,
/// so it has to be seekable. Non-seekable input should be collected into a
/// [`std::io::Cursor`] first.
///
/// # Examples
/// ```
/// use ruhuff::encoding::HuffmanCompressor;
/// let mock_data: &[_] = &[0x1, 0x2, 0x3, 0x4];
/// let mut output = std::vec::Vec::new();
/// let mut compressor = HuffmanCompressor::new();
/// compressor.set_source(std::io::Cursor::new(mock_data));
/// compressor.set_drain(&mut output);
///
/// // `compress` writes the artifact into the provided drain.
/// let stats = compressor.compress().unwrap();
/// assert_eq!(stats.uncompressed_size, 4);
/// ```
pub struct HuffmanCompressor<R: Read + Seek, W: Write> {
    uncompressed_data: Option<R>,
    compressed_data: Option<W>,
    permissions: u16,
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CompressError {
    #[error("No source was set before compressing")]
    MissingSource,
    #[error("No drain was set before compressing")]
    MissingDrain,
    #[error(transparent)]
    IoError(#[from] Error),
    #[error(transparent)]
    TreeError(#[from] TreeError),
    #[error("Symbol 0x{0:02X} has no code in the code table")]
    MissingCode(u8),
    #[error("Source changed between passes. Counted {expected} bytes, then read {got} bytes")]
    SourceChanged { expected: u64, got: u64 },
}

impl<R: Read + Seek, W: Write> HuffmanCompressor<R, W> {
    /// Create a new `HuffmanCompressor`
    pub fn new() -> Self {
        Self {
            uncompressed_data: None,
            compressed_data: None,
            permissions: DEFAULT_PERMISSIONS,
        }
    }

    /// Before calling [HuffmanCompressor::compress] you need to set the source
    pub fn set_source(&mut self, uncompressed_data: R) -> Option<R> {
        self.uncompressed_data.replace(uncompressed_data)
    }

    /// Before calling [HuffmanCompressor::compress] you need to set the drain
    pub fn set_drain(&mut self, compressed_data: W) -> Option<W> {
        self.compressed_data.replace(compressed_data)
    }

    /// Mode bits recorded in the header, to be restored by the decompressor
    pub fn set_permissions(&mut self, permissions: u16) -> u16 {
        core::mem::replace(&mut self.permissions, permissions)
    }

    pub fn permissions(&self) -> u16 {
        self.permissions
    }

    /// Retrieve the source
    pub fn take_source(&mut self) -> Option<R> {
        self.uncompressed_data.take()
    }

    /// Retrieve the drain
    pub fn take_drain(&mut self) -> Option<W> {
        self.compressed_data.take()
    }

    /// Compress everything the source holds, starting from its beginning, and write the
    /// artifact to the drain.
    ///
    /// The artifact is the header, the serialized tree, and the payload in that order.
    pub fn compress(&mut self) -> Result<CodecStats, CompressError> {
        let source = self
            .uncompressed_data
            .as_mut()
            .ok_or(CompressError::MissingSource)?;
        let drain = self
            .compressed_data
            .as_mut()
            .ok_or(CompressError::MissingDrain)?;

        let mut source = ByteReader::new(source);
        source.rewind()?;

        let mut histogram = Histogram::from_reader(&mut source)?;
        // with these two the tree always has at least two leaves
        histogram.force_include(0);
        histogram.force_include(u8::MAX);

        let tree = HuffmanTree::build(&histogram)?;
        let table = tree.build_codes()?;
        let serialized_tree = tree.dump();

        let header = FileHeader {
            permissions: self.permissions,
            tree_size: serialized_tree.len() as u16,
            file_size: histogram.input_len(),
        };
        vprintln!(
            file_size = header.file_size,
            tree_size = header.tree_size,
            "Compressing"
        );

        let mut drain = ByteWriter::new(drain);
        header.write(&mut drain)?;
        drain.write_bytes(&serialized_tree)?;

        source.rewind()?;
        let mut bit_writer = BitWriter::new(&mut drain);
        let mut block = vec![0u8; BLOCK_SIZE];
        let mut encoded: u64 = 0;
        loop {
            let read = source.read_bytes(&mut block)?;
            if read == 0 {
                break;
            }
            for symbol in &block[..read] {
                let code = table
                    .get(*symbol)
                    .ok_or(CompressError::MissingCode(*symbol))?;
                bit_writer.write_code(code)?;
            }
            encoded += read as u64;
            if encoded > header.file_size {
                break;
            }
        }
        if encoded != header.file_size {
            return Err(CompressError::SourceChanged {
                expected: header.file_size,
                got: encoded,
            });
        }
        bit_writer.flush()?;
        drain.flush()?;

        let stats = CodecStats {
            direction: Direction::Compress,
            uncompressed_size: header.file_size,
            compressed_size: drain.bytes_written(),
        };
        vprintln!(
            uncompressed_size = stats.uncompressed_size,
            compressed_size = stats.compressed_size,
            "Compression finished"
        );
        Ok(stats)
    }
}

impl<R: Read + Seek, W: Write> Default for HuffmanCompressor<R, W> {
    fn default() -> Self {
        Self::new()
    }
}
