use crate::common::BLOCK_SIZE;
use crate::huff0::BitSequence;
use crate::io::ByteWriter;
use std::io::{Error, Write};

/// Packs codes into a block sized buffer, least significant bit first, and hands
/// full blocks to the byte writer.
pub(crate) struct BitWriter<'w, W: Write> {
    drain: &'w mut ByteWriter<W>,
    /// Bytes of the current block. Bits that were not written yet are always 0.
    buffer: Vec<u8>,
    /// The index pointing to the next unoccupied bit
    bit_idx: usize,
}

impl<'w, W: Write> BitWriter<'w, W> {
    pub fn new(drain: &'w mut ByteWriter<W>) -> Self {
        Self {
            drain,
            buffer: vec![0; BLOCK_SIZE],
            bit_idx: 0,
        }
    }

    /// Append every bit of `code` to the stream
    pub fn write_code(&mut self, code: &BitSequence) -> Result<(), Error> {
        for bit in code.iter() {
            if bit {
                self.buffer[self.bit_idx / 8] |= 1 << (self.bit_idx % 8);
            }
            self.bit_idx += 1;
            if self.bit_idx == BLOCK_SIZE * 8 {
                self.drain.write_bytes(&self.buffer)?;
                self.buffer.fill(0);
                self.bit_idx = 0;
            }
        }
        Ok(())
    }

    /// Write out whatever is left in the buffer. The last byte is padded with zeros in
    /// its unused high bits.
    ///
    /// Must be called once after the last code was written.
    pub fn flush(&mut self) -> Result<(), Error> {
        let used_bytes = (self.bit_idx + 7) / 8;
        self.drain.write_bytes(&self.buffer[..used_bytes])?;
        self.buffer[..used_bytes].fill(0);
        self.bit_idx = 0;
        Ok(())
    }
}
