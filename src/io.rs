//! Byte oriented reading and writing that keeps retrying short transfers and counts
//! every byte that passes through.
use std::io::{Error, ErrorKind, Read, Seek, SeekFrom, Write};

/// Wraps a source and reads as many bytes as requested, unless the source runs dry.
pub struct ByteReader<R> {
    source: R,
    bytes_read: u64,
}

impl<R: Read> ByteReader<R> {
    pub fn new(source: R) -> Self {
        ByteReader {
            source,
            bytes_read: 0,
        }
    }

    /// Fill `buf` from the source, calling `read` until either `buf` is full or the source
    /// returns 0. Returns how many bytes were read, a short count means the end of the input
    /// was reached.
    pub fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.source.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        self.bytes_read += filled as u64;
        Ok(filled)
    }

    /// Total amount of bytes read through this reader
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.source
    }

    pub fn into_inner(self) -> R {
        self.source
    }
}

impl<R: Read + Seek> ByteReader<R> {
    /// Go back to the start of the source. The byte counter keeps running.
    pub fn rewind(&mut self) -> Result<(), Error> {
        self.source.seek(SeekFrom::Start(0))?;
        Ok(())
    }
}

/// Wraps a drain and writes every byte handed to it, or fails.
pub struct ByteWriter<W> {
    drain: W,
    bytes_written: u64,
}

impl<W: Write> ByteWriter<W> {
    pub fn new(drain: W) -> Self {
        ByteWriter {
            drain,
            bytes_written: 0,
        }
    }

    /// Write all of `buf`, calling `write` until everything is accepted. A drain that
    /// stops accepting bytes is an error, partial writes are never reported as success.
    pub fn write_bytes(&mut self, buf: &[u8]) -> Result<(), Error> {
        let mut written = 0;
        while written < buf.len() {
            match self.drain.write(&buf[written..]) {
                Ok(0) => {
                    self.bytes_written += written as u64;
                    return Err(Error::new(
                        ErrorKind::WriteZero,
                        "drain stopped accepting bytes",
                    ));
                }
                Ok(n) => written += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.bytes_written += written as u64;
                    return Err(e);
                }
            }
        }
        self.bytes_written += written as u64;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), Error> {
        self.drain.flush()
    }

    /// Total amount of bytes written through this writer
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.drain
    }

    pub fn into_inner(self) -> W {
        self.drain
    }
}
