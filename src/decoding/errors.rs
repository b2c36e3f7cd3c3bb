//! Errors that might occur while decompressing data.

use crate::frame::ReadHeaderError;
use crate::huff0::TreeRebuildError;
use std::io::Error;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DecompressError {
    #[error(transparent)]
    ReadHeaderError(#[from] ReadHeaderError),
    #[error("Serialized tree is truncated. Is: {got} bytes, Should be: {expected} bytes")]
    TruncatedTree { got: usize, expected: usize },
    #[error(transparent)]
    TreeRebuildError(#[from] TreeRebuildError),
    #[error("Tree has no internal node to descend through")]
    DegenerateTree,
    #[error("Payload ended after {decoded} of {expected} bytes were decoded")]
    UnexpectedEndOfPayload { decoded: u64, expected: u64 },
    #[error(transparent)]
    IoError(#[from] Error),
}
