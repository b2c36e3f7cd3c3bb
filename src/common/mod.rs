//! Values shared between the encoding side
//! and the decoding side.

// --- HEADER ---
/// This magic number is included at the start of every compressed artifact
pub const MAGIC_NUM: u32 = 0xBEEF_D00D;
/// magic (4) + permissions (2) + tree_size (2) + file_size (8)
pub const HEADER_SIZE: usize = 16;

// --- SYMBOLS ---
/// Symbols are single bytes
pub const ALPHABET_SIZE: usize = 256;
/// A Huffman code over N symbols never needs more than N - 1 bits.
pub const MAX_CODE_BITS: usize = ALPHABET_SIZE;

// --- TREE ---
/// Precedes the symbol byte of a leaf in the serialized tree
pub const LEAF_MARKER: u8 = b'L';
/// A single byte standing for an internal node in the serialized tree
pub const INTERNAL_MARKER: u8 = b'I';
/// Smallest legal tree: the two forced symbols and their parent
pub const MIN_TREE_SIZE: u16 = 3 * 2 - 1;
/// Largest legal tree: every byte value is present
pub const MAX_TREE_SIZE: u16 = 3 * ALPHABET_SIZE as u16 - 1;

// --- IO ---
/// Buffered reads and writes are done in chunks of this size
pub const BLOCK_SIZE: usize = 4096;
