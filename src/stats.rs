use core::fmt;

/// Which way the data went, decides the labels of the report
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Compress,
    Decompress,
}

/// Sizes of both sides of one compression or decompression run, taken from the
/// byte counters of the reader and writer involved.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CodecStats {
    pub direction: Direction,
    pub uncompressed_size: u64,
    pub compressed_size: u64,
}

impl CodecStats {
    /// Percentage of the uncompressed size that compression saved. Negative if the
    /// artifact is larger than the original, 0 for an empty original.
    pub fn space_saving(&self) -> f64 {
        if self.uncompressed_size == 0 {
            return 0.0;
        }
        (1.0 - self.compressed_size as f64 / self.uncompressed_size as f64) * 100.0
    }
}

impl fmt::Display for CodecStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            Direction::Compress => {
                writeln!(f, "Uncompressed file size: {} bytes", self.uncompressed_size)?;
                writeln!(f, "Compressed file size: {} bytes", self.compressed_size)?;
            }
            Direction::Decompress => {
                writeln!(f, "Compressed file size: {} bytes", self.compressed_size)?;
                writeln!(f, "Decompressed file size: {} bytes", self.uncompressed_size)?;
            }
        }
        write!(f, "Space saving: {:.2}%", self.space_saving())
    }
}
