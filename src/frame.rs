use crate::common::{HEADER_SIZE, MAGIC_NUM, MAX_TREE_SIZE, MIN_TREE_SIZE};
use crate::io::{ByteReader, ByteWriter};
use std::io::{Error, Read, Write};

/// The fixed size record at the start of every compressed artifact.
///
/// All fields are stored little-endian, in declaration order, right after the magic number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
    /// Mode bits of the original file
    pub permissions: u16,
    /// Length of the serialized tree in bytes, `3 * unique_symbols - 1`
    pub tree_size: u16,
    /// Length of the original file in bytes. The decoder stops after this many symbols,
    /// whatever padding bits remain.
    pub file_size: u64,
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ReadHeaderError {
    #[error("Error while reading the header: {0}")]
    HeaderReadError(#[source] Error),
    #[error("Header is truncated. Is: {got} bytes, Should be: {expected} bytes")]
    Truncated { got: usize, expected: usize },
    #[error("Read wrong magic number: 0x{0:X}")]
    BadMagicNumber(u32),
    #[error("Invalid tree_size: {got}, Should be 3 * n - 1 for n between 2 and 256")]
    InvalidTreeSize { got: u16 },
}

impl FileHeader {
    pub fn serialize(&self, output: &mut Vec<u8>) {
        output.extend_from_slice(&MAGIC_NUM.to_le_bytes());
        output.extend_from_slice(&self.permissions.to_le_bytes());
        output.extend_from_slice(&self.tree_size.to_le_bytes());
        output.extend_from_slice(&self.file_size.to_le_bytes());
    }

    pub fn write<W: Write>(&self, drain: &mut ByteWriter<W>) -> Result<(), Error> {
        let mut output = Vec::with_capacity(HEADER_SIZE);
        self.serialize(&mut output);
        drain.write_bytes(&output)
    }

    /// Number of distinct symbols the serialized tree holds
    pub fn unique_symbols(&self) -> usize {
        (usize::from(self.tree_size) + 1) / 3
    }
}

/// Read and validate a header. The magic number is checked before anything
/// else is read.
pub fn read_file_header<R: Read>(r: &mut ByteReader<R>) -> Result<FileHeader, ReadHeaderError> {
    use ReadHeaderError as err;

    let mut buf = [0u8; HEADER_SIZE];

    let got = r.read_bytes(&mut buf[..4]).map_err(err::HeaderReadError)?;
    if got < 4 {
        return Err(err::Truncated {
            got,
            expected: HEADER_SIZE,
        });
    }
    let magic_num = u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
    if magic_num != MAGIC_NUM {
        return Err(err::BadMagicNumber(magic_num));
    }

    let got = r.read_bytes(&mut buf[4..]).map_err(err::HeaderReadError)?;
    if got < HEADER_SIZE - 4 {
        return Err(err::Truncated {
            got: got + 4,
            expected: HEADER_SIZE,
        });
    }

    let header = FileHeader {
        permissions: u16::from_le_bytes([buf[4], buf[5]]),
        tree_size: u16::from_le_bytes([buf[6], buf[7]]),
        file_size: u64::from_le_bytes([
            buf[8], buf[9], buf[10], buf[11], buf[12], buf[13], buf[14], buf[15],
        ]),
    };

    let tree_size = header.tree_size;
    if !(MIN_TREE_SIZE..=MAX_TREE_SIZE).contains(&tree_size) || (tree_size + 1) % 3 != 0 {
        return Err(err::InvalidTreeSize { got: tree_size });
    }

    vprintln!(
        permissions = header.permissions,
        tree_size = header.tree_size,
        file_size = header.file_size,
        "Read file header"
    );
    Ok(header)
}

#[cfg(test)]
mod tests {
    use super::{read_file_header, FileHeader, ReadHeaderError};
    use crate::common::{HEADER_SIZE, MAGIC_NUM};
    use crate::io::ByteReader;

    fn header() -> FileHeader {
        FileHeader {
            permissions: 0o644,
            tree_size: 11,
            file_size: 4,
        }
    }

    #[test]
    fn header_layout() {
        let mut output = Vec::new();
        header().serialize(&mut output);
        assert_eq!(output.len(), HEADER_SIZE);
        assert!(output.starts_with(&MAGIC_NUM.to_le_bytes()));
        assert_eq!(&output[4..6], &0o644u16.to_le_bytes());
        assert_eq!(&output[6..8], &[11, 0]);
        assert_eq!(&output[8..], &[4, 0, 0, 0, 0, 0, 0, 0]);

        let mut source = ByteReader::new(output.as_slice());
        assert_eq!(read_file_header(&mut source).unwrap(), header());
        assert_eq!(header().unique_symbols(), 4);
    }

    #[test]
    fn bad_magic_stops_reading() {
        let mut output = Vec::new();
        header().serialize(&mut output);
        output[0] ^= 0xFF;
        let mut source = ByteReader::new(output.as_slice());
        assert!(matches!(
            read_file_header(&mut source),
            Err(ReadHeaderError::BadMagicNumber(_))
        ));
        // nothing past the magic number was consumed
        assert_eq!(source.bytes_read(), 4);
    }

    #[test]
    fn truncated_headers() {
        let mut output = Vec::new();
        header().serialize(&mut output);

        let mut source = ByteReader::new(&output[..2]);
        assert!(matches!(
            read_file_header(&mut source),
            Err(ReadHeaderError::Truncated { got: 2, expected: 16 })
        ));

        let mut source = ByteReader::new(&output[..10]);
        assert!(matches!(
            read_file_header(&mut source),
            Err(ReadHeaderError::Truncated { got: 10, expected: 16 })
        ));
    }

    #[test]
    fn implausible_tree_sizes() {
        for tree_size in [0u16, 2, 4, 6, 770, u16::MAX] {
            let mut output = Vec::new();
            FileHeader {
                tree_size,
                ..header()
            }
            .serialize(&mut output);
            let mut source = ByteReader::new(output.as_slice());
            assert!(
                matches!(
                    read_file_header(&mut source),
                    Err(ReadHeaderError::InvalidTreeSize { got }) if got == tree_size
                ),
                "tree_size {tree_size} was accepted"
            );
        }
    }
}
