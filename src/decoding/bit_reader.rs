use crate::common::BLOCK_SIZE;
use crate::io::ByteReader;
use std::io::{Error, Read};

/// Hands out the bits of a byte source one at a time, least significant bit of each
/// byte first. The source is read one block at a time.
pub(crate) struct BitReader<R: Read> {
    source: ByteReader<R>,
    buffer: Vec<u8>,
    /// Amount of valid bytes in `buffer`
    filled: usize,
    /// index counts bits of the buffer already read
    idx: usize,
}

impl<R: Read> BitReader<R> {
    pub fn new(source: ByteReader<R>) -> Self {
        BitReader {
            source,
            buffer: vec![0; BLOCK_SIZE],
            filled: 0,
            idx: 0,
        }
    }

    /// Returns the next bit, or `None` once the source has no more bytes
    pub fn read_bit(&mut self) -> Result<Option<bool>, Error> {
        if self.idx == self.filled * 8 {
            self.filled = self.source.read_bytes(&mut self.buffer)?;
            self.idx = 0;
            if self.filled == 0 {
                return Ok(None);
            }
        }
        let bit = (self.buffer[self.idx / 8] >> (self.idx % 8)) & 1 == 1;
        self.idx += 1;
        Ok(Some(bit))
    }

    /// Total amount of bytes pulled from the source, including everything read before
    /// this reader took over
    pub fn bytes_read(&self) -> u64 {
        self.source.bytes_read()
    }
}
