//! The serialized form of a tree is its postorder walk: a leaf is written as
//! [`LEAF_MARKER`] followed by its symbol, an internal node as a lone [`INTERNAL_MARKER`]
//! after both of its subtrees.
use super::tree::{HuffmanTree, Node};
use crate::common::{INTERNAL_MARKER, LEAF_MARKER, MAX_TREE_SIZE};

/// Weight given to rebuilt leaves. Weights only matter while building a tree.
const REBUILT_WEIGHT: u64 = 1;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum TreeRebuildError {
    #[error("Serialized tree is empty")]
    Empty,
    #[error("Serialized tree is {got} bytes long, a tree over 256 symbols takes at most {max}")]
    TooLong { got: usize, max: usize },
    #[error("Unknown token 0x{byte:02X} at offset {offset} of the serialized tree")]
    UnknownToken { byte: u8, offset: usize },
    #[error("Leaf marker at offset {offset} is not followed by a symbol")]
    MissingLeafSymbol { offset: usize },
    #[error("Internal node at offset {offset} needs two subtrees but only {available} are available")]
    StackUnderflow { offset: usize, available: usize },
    #[error("Serialized tree should leave exactly one root, but left {got} nodes")]
    LeftoverNodes { got: usize },
}

impl HuffmanTree {
    /// Serialize the tree, see [`dump_tree`]
    pub fn dump(&self) -> Vec<u8> {
        let mut output = Vec::with_capacity(self.serialized_len());
        dump_tree(self.root(), &mut output);
        output
    }

    /// Reconstruct a tree from its serialized form, see [`rebuild_tree`]
    pub fn rebuild(source: &[u8]) -> Result<Self, TreeRebuildError> {
        rebuild_tree(source).map(HuffmanTree::from_root)
    }
}

/// Append the postorder serialization of `node` to `output`
pub fn dump_tree(node: &Node, output: &mut Vec<u8>) {
    match node {
        Node::Leaf { symbol, .. } => {
            output.push(LEAF_MARKER);
            output.push(*symbol);
        }
        Node::Internal { left, right, .. } => {
            dump_tree(left, output);
            dump_tree(right, output);
            output.push(INTERNAL_MARKER);
        }
    }
}

/// Replay a postorder serialization with a stack: leaves are pushed, internal
/// nodes pop their two children and push the merged node.
pub fn rebuild_tree(source: &[u8]) -> Result<Node, TreeRebuildError> {
    use TreeRebuildError as err;

    if source.is_empty() {
        return Err(err::Empty);
    }
    // bounds the depth of the rebuilt tree, everything on it recurses
    let max = usize::from(MAX_TREE_SIZE);
    if source.len() > max {
        return Err(err::TooLong {
            got: source.len(),
            max,
        });
    }

    let mut stack: Vec<Node> = Vec::with_capacity(source.len());
    let mut offset = 0;
    while offset < source.len() {
        match source[offset] {
            LEAF_MARKER => {
                let symbol = *source
                    .get(offset + 1)
                    .ok_or(err::MissingLeafSymbol { offset })?;
                stack.push(Node::leaf(symbol, REBUILT_WEIGHT));
                offset += 2;
            }
            INTERNAL_MARKER => {
                // the right subtree was dumped last so it sits on top
                let right = stack.pop().ok_or(err::StackUnderflow {
                    offset,
                    available: 0,
                })?;
                let left = stack.pop().ok_or(err::StackUnderflow {
                    offset,
                    available: 1,
                })?;
                stack.push(Node::join(left, right));
                offset += 1;
            }
            byte => return Err(err::UnknownToken { byte, offset }),
        }
    }

    if stack.len() != 1 {
        return Err(err::LeftoverNodes { got: stack.len() });
    }
    stack.pop().ok_or(err::LeftoverNodes { got: 0 })
}
