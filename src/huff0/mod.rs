/// Huffman coding is a method of encoding where symbols are assigned a code,
/// and more commonly used symbols get shorter codes, and less commonly
/// used symbols get longer codes. Codes are prefix free, meaning no code
/// is the start of another code.
pub mod bit_sequence;
pub mod priority_queue;
pub mod tree;
pub mod tree_serializer;

pub use bit_sequence::*;
pub use priority_queue::*;
pub use tree::*;
pub use tree_serializer::*;
