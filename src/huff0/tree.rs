use super::bit_sequence::{BitSequence, BitSequenceError};
use super::priority_queue::{PriorityQueue, PriorityQueueError, Weighted};
use crate::common::{ALPHABET_SIZE, BLOCK_SIZE};
use crate::io::ByteReader;
use std::io::Read;

/// Occurrence counts for every byte value of an input.
#[derive(Clone, PartialEq, Eq)]
pub struct Histogram {
    counts: [u64; ALPHABET_SIZE],
    input_len: u64,
}

impl Histogram {
    pub fn new() -> Self {
        Histogram {
            counts: [0; ALPHABET_SIZE],
            input_len: 0,
        }
    }

    pub fn from_bytes(data: &[u8]) -> Self {
        let mut histogram = Self::new();
        histogram.add_bytes(data);
        histogram
    }

    /// Count every byte the reader produces until it signals the end of input.
    pub fn from_reader<R: Read>(reader: &mut ByteReader<R>) -> std::io::Result<Self> {
        let mut histogram = Self::new();
        let mut block = vec![0u8; BLOCK_SIZE];
        loop {
            let read = reader.read_bytes(&mut block)?;
            if read == 0 {
                break;
            }
            histogram.add_bytes(&block[..read]);
        }
        Ok(histogram)
    }

    pub fn add_bytes(&mut self, data: &[u8]) {
        for byte in data {
            self.counts[*byte as usize] += 1;
        }
        self.input_len += data.len() as u64;
    }

    /// Make sure `symbol` ends up in the tree, even if it never occurs in the input.
    /// Does not change the input length.
    pub fn force_include(&mut self, symbol: u8) {
        let count = &mut self.counts[symbol as usize];
        if *count == 0 {
            *count = 1;
        }
    }

    pub fn count(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Number of symbols with a nonzero count
    pub fn unique_symbols(&self) -> usize {
        self.counts.iter().filter(|count| **count > 0).count()
    }

    /// Amount of input bytes counted, forced symbols excluded
    pub fn input_len(&self) -> u64 {
        self.input_len
    }
}

impl Default for Histogram {
    fn default() -> Self {
        Self::new()
    }
}

/// A node of a Huffman tree. Children are owned exclusively by their parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf {
        symbol: u8,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    pub fn leaf(symbol: u8, weight: u64) -> Self {
        Node::Leaf { symbol, weight }
    }

    /// Merge two subtrees under a new parent carrying their combined weight
    pub fn join(left: Node, right: Node) -> Self {
        Node::Internal {
            weight: left.weight().saturating_add(right.weight()),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    pub fn symbol(&self) -> Option<u8> {
        match self {
            Node::Leaf { symbol, .. } => Some(*symbol),
            Node::Internal { .. } => None,
        }
    }

    /// Descend one level: `false` goes left, `true` goes right. Leaves have no children.
    pub fn child(&self, bit: bool) -> Option<&Node> {
        match self {
            Node::Leaf { .. } => None,
            Node::Internal { left, right, .. } => Some(if bit { right } else { left }),
        }
    }

    fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }
}

impl Weighted for Node {
    fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => *weight,
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TreeError {
    #[error("A Huffman tree needs at least two symbols, histogram has {got}")]
    NotEnoughSymbols { got: usize },
    #[error(transparent)]
    PriorityQueueError(#[from] PriorityQueueError),
    #[error(transparent)]
    BitSequenceError(#[from] BitSequenceError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: Node,
}

impl HuffmanTree {
    /// Build the tree by repeatedly merging the two lightest nodes until only the root is left.
    ///
    /// The histogram must contain at least two symbols, otherwise the only symbol would
    /// be assigned an empty code.
    pub fn build(histogram: &Histogram) -> Result<Self, TreeError> {
        let unique = histogram.unique_symbols();
        if unique < 2 {
            return Err(TreeError::NotEnoughSymbols { got: unique });
        }

        let mut queue = PriorityQueue::new(ALPHABET_SIZE);
        for symbol in 0..=u8::MAX {
            let count = histogram.count(symbol);
            if count > 0 {
                queue.enqueue(Node::leaf(symbol, count))?;
            }
        }

        while queue.len() > 1 {
            let left = queue.dequeue()?;
            let right = queue.dequeue()?;
            queue.enqueue(Node::join(left, right))?;
        }
        let root = queue.dequeue()?;

        vprintln!(
            unique_symbols = unique,
            total_weight = root.weight(),
            "Built huffman tree"
        );
        Ok(HuffmanTree { root })
    }

    pub(crate) fn from_root(root: Node) -> Self {
        HuffmanTree { root }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    /// Size of the serialized tree in bytes: two per leaf, one per internal node
    pub fn serialized_len(&self) -> usize {
        3 * self.leaf_count() - 1
    }

    /// Derive the code of every leaf. Going left appends a 0, going right appends a 1.
    pub fn build_codes(&self) -> Result<CodeTable, TreeError> {
        let mut table = CodeTable::new();
        let mut code = BitSequence::new();
        assign_codes(&self.root, &mut code, &mut table)?;
        Ok(table)
    }
}

fn assign_codes(
    node: &Node,
    code: &mut BitSequence,
    table: &mut CodeTable,
) -> Result<(), BitSequenceError> {
    match node {
        Node::Leaf { symbol, .. } => {
            table.codes[*symbol as usize] = Some(*code);
        }
        Node::Internal { left, right, .. } => {
            code.push(false)?;
            assign_codes(left, code, table)?;
            code.pop()?;

            code.push(true)?;
            assign_codes(right, code, table)?;
            code.pop()?;
        }
    }
    Ok(())
}

/// Maps every symbol to its code. Symbols that are not part of the tree have no entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: Vec<Option<BitSequence>>,
}

impl CodeTable {
    fn new() -> Self {
        CodeTable {
            codes: vec![None; ALPHABET_SIZE],
        }
    }

    pub fn get(&self, symbol: u8) -> Option<&BitSequence> {
        self.codes[symbol as usize].as_ref()
    }

    /// Length of the code for `symbol`, 0 if the symbol has none
    pub fn code_len(&self, symbol: u8) -> usize {
        self.get(symbol).map_or(0, BitSequence::len)
    }
}

#[cfg(test)]
mod tests {
    use super::{HuffmanTree, Histogram, Node, TreeError};

    fn is_prefix(short: &[bool], long: &[bool]) -> bool {
        short.len() <= long.len() && long[..short.len()] == *short
    }

    fn assert_prefix_free(tree: &HuffmanTree) {
        let table = tree.build_codes().unwrap();
        let codes: Vec<Vec<bool>> = (0..=u8::MAX)
            .filter_map(|symbol| table.get(symbol))
            .map(|code| code.iter().collect())
            .collect();
        for (i, a) in codes.iter().enumerate() {
            assert!(!a.is_empty());
            for (j, b) in codes.iter().enumerate() {
                if i != j {
                    assert!(!is_prefix(a, b), "{a:?} is a prefix of {b:?}");
                }
            }
        }
    }

    #[test]
    fn forced_symbols_are_counted_once() {
        let mut histogram = Histogram::from_bytes(b"aaab");
        histogram.force_include(0);
        histogram.force_include(255);
        histogram.force_include(b'a');
        assert_eq!(histogram.unique_symbols(), 4);
        assert_eq!(histogram.count(b'a'), 3);
        assert_eq!(histogram.count(0), 1);
        assert_eq!(histogram.input_len(), 4);
    }

    #[test]
    fn aaab_tree() {
        let mut histogram = Histogram::from_bytes(b"aaab");
        histogram.force_include(0);
        histogram.force_include(255);
        let tree = HuffmanTree::build(&histogram).unwrap();
        assert_eq!(tree.leaf_count(), 4);
        assert_eq!(tree.serialized_len(), 11);

        let table = tree.build_codes().unwrap();
        assert!(table.code_len(b'a') < table.code_len(b'b'));
        assert_eq!(table.code_len(b'a'), 1);
        assert!(table.get(b'c').is_none());
        assert_prefix_free(&tree);
    }

    #[test]
    fn every_symbol_gets_a_code() {
        let data: Vec<u8> = (0..=u8::MAX).collect();
        let tree = HuffmanTree::build(&Histogram::from_bytes(&data)).unwrap();
        assert_eq!(tree.leaf_count(), 256);
        assert_eq!(tree.serialized_len(), 767);
        let table = tree.build_codes().unwrap();
        for symbol in 0..=u8::MAX {
            // equal weights over a power of two give a perfectly balanced tree
            assert_eq!(table.code_len(symbol), 8);
        }
        assert_prefix_free(&tree);
    }

    #[test]
    fn skewed_weights_give_deep_codes() {
        let mut data = Vec::new();
        let mut weight = 1usize;
        for symbol in 0..20u8 {
            data.extend(std::iter::repeat(symbol).take(weight));
            weight *= 2;
        }
        let tree = HuffmanTree::build(&Histogram::from_bytes(&data)).unwrap();
        let table = tree.build_codes().unwrap();
        assert_eq!(table.code_len(19), 1);
        assert_eq!(table.code_len(0), 19);
        assert_eq!(table.code_len(1), 19);
        assert_prefix_free(&tree);
    }

    #[test]
    fn single_symbol_is_rejected() {
        let histogram = Histogram::from_bytes(b"zzzz");
        assert!(matches!(
            HuffmanTree::build(&histogram),
            Err(TreeError::NotEnoughSymbols { got: 1 })
        ));
        assert!(matches!(
            HuffmanTree::build(&Histogram::new()),
            Err(TreeError::NotEnoughSymbols { got: 0 })
        ));
    }

    #[test]
    fn child_follows_bits() {
        let tree = HuffmanTree::from_root(Node::join(Node::leaf(7, 1), Node::leaf(9, 1)));
        let root = tree.root();
        assert!(!root.is_leaf());
        assert_eq!(root.child(false).and_then(Node::symbol), Some(7));
        assert_eq!(root.child(true).and_then(Node::symbol), Some(9));
        assert!(root.child(true).unwrap().child(false).is_none());
    }
}
