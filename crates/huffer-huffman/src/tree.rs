//! Huffman tree construction, prefix codes, and payload coding.
//!
//! Nodes live in a flat arena and refer to their children by index. Leaves
//! are pushed first, in table order, followed by internal nodes in the order
//! they are merged.
//!
//! ## Tie-breaking
//!
//! The build queue orders nodes by `(frequency sum, insertion sequence)`.
//! Leaves enter in table order and every merged node gets the next sequence
//! number, so equal sums are taken first-in first-out. Encoder and decoder
//! see the same table order and therefore build identical trees.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt;

use huffer_core::{Error, Result};
use tracing::debug;

use crate::bitstream::BitStream;
use crate::buffer::ByteBuffer;
use crate::table::{FrequencyTable, Symbol, ALPHABET_SIZE};

/// Index of a node in the tree arena.
pub type NodeId = usize;

/// A node in the Huffman tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Terminal node carrying one symbol.
    Leaf { symbol: Symbol },
    /// Branch node. `right` is only absent when the alphabet has one symbol.
    Internal {
        left: NodeId,
        right: Option<NodeId>,
        frequency_sum: u64,
    },
}

impl Node {
    /// Total frequency of this node and everything below it.
    pub fn frequency_sum(&self) -> u64 {
        match self {
            Node::Leaf { symbol } => symbol.frequency,
            Node::Internal { frequency_sum, .. } => *frequency_sum,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}

/// Prefix code: the path from the root, `'0'` for left and `'1'` for right.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Code(String);

impl Code {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Code length in bits.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Huffman tree with a per-byte code lookup.
#[derive(Debug, Clone)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: NodeId,
    codes: Vec<Option<Code>>,
}

impl HuffmanTree {
    /// Build the tree for `table` and derive every symbol's code.
    pub fn new(table: &FrequencyTable) -> Result<Self> {
        let (nodes, root) = build_nodes(table)?;
        let codes = generate_codes(&nodes, root);

        let tree = Self { nodes, root, codes };
        debug!(
            leaves = table.len(),
            nodes = tree.nodes.len(),
            depth = tree.depth(),
            total = tree.root_frequency_sum(),
            "built huffman tree"
        );
        Ok(tree)
    }

    /// Index of the root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Look up a node by index.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// All nodes in arena order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Total symbol count the tree represents: the decoded output length.
    pub fn root_frequency_sum(&self) -> u64 {
        self.nodes[self.root].frequency_sum()
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Length of the longest code.
    pub fn depth(&self) -> usize {
        self.codes.iter().flatten().map(Code::len).max().unwrap_or(0)
    }

    /// Code for a raw byte.
    #[inline]
    pub fn code(&self, byte: u8) -> Option<&Code> {
        self.codes[byte as usize].as_ref()
    }

    /// Code for a symbol.
    pub fn code_for(&self, symbol: &Symbol) -> Option<&Code> {
        self.code(symbol.value)
    }

    /// Leaf symbols with their codes, shortest code first.
    pub fn codes_by_length(&self) -> Vec<(Symbol, &Code)> {
        let mut entries: Vec<(Symbol, &Code)> = self
            .nodes
            .iter()
            .filter_map(|node| match node {
                Node::Leaf { symbol } => self.code_for(symbol).map(|code| (*symbol, code)),
                Node::Internal { .. } => None,
            })
            .collect();
        entries.sort_by_key(|(_, code)| code.len());
        entries
    }

    /// Encode `data` as a packed bit stream, trailing bits zero-filled.
    pub fn encode(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut bs = BitStream::new();
        for &byte in data {
            let code = self
                .code(byte)
                .ok_or(Error::SymbolNotInTable { symbol: byte })?;
            bs.append_bit_str(code.as_str());
        }
        Ok(bs.to_bytes())
    }

    /// Decode the payload that starts at `byte_offset` in `data`.
    ///
    /// Stops after [`root_frequency_sum`](Self::root_frequency_sum) symbols,
    /// so any zero padding after the last code is never read.
    pub fn decode(&self, data: &[u8], byte_offset: usize) -> Result<Vec<u8>> {
        let bs = BitStream::from(data);
        let expected = self.root_frequency_sum();
        let mut bit_offset = byte_offset.saturating_mul(8);

        // Every code is at least one bit, which bounds the output size.
        let available = bs.bit_count().saturating_sub(bit_offset);
        let capacity = usize::try_from(expected).unwrap_or(usize::MAX).min(available);
        let mut out = ByteBuffer::with_capacity(capacity);

        for decoded in 0..expected {
            let mut id = self.root;
            loop {
                match &self.nodes[id] {
                    Node::Leaf { symbol } => {
                        out.push(symbol.value);
                        break;
                    }
                    Node::Internal { left, right, .. } => {
                        let bit = bs
                            .read_bit(bit_offset)
                            .map_err(|_| Error::truncated(decoded, expected))?;
                        id = if bit == 1 {
                            right.ok_or(Error::InvalidCode { bit_offset })?
                        } else {
                            *left
                        };
                        bit_offset += 1;
                    }
                }
            }
        }

        Ok(out.into_vec())
    }
}

/// Run the two-smallest merge over `table`, returning the arena and root.
fn build_nodes(table: &FrequencyTable) -> Result<(Vec<Node>, NodeId)> {
    if table.is_empty() {
        return Err(Error::tree_build("empty frequency table"));
    }

    let mut nodes = Vec::with_capacity(table.len() * 2);
    let mut queue = BinaryHeap::with_capacity(table.len());
    let mut sequence = 0u64;

    for symbol in table {
        nodes.push(Node::Leaf { symbol: *symbol });
        queue.push(Reverse((symbol.frequency, sequence, nodes.len() - 1)));
        sequence += 1;
    }

    // A lone leaf still needs one edge so its code is non-empty.
    if nodes.len() == 1 {
        let frequency_sum = nodes[0].frequency_sum();
        nodes.push(Node::Internal {
            left: 0,
            right: None,
            frequency_sum,
        });
        return Ok((nodes, 1));
    }

    while let Some(Reverse((left_sum, _, left))) = queue.pop() {
        let Some(Reverse((right_sum, _, right))) = queue.pop() else {
            if nodes[left].is_leaf() {
                return Err(Error::tree_build(format!(
                    "leaf {:?} left unmerged",
                    nodes[left]
                )));
            }
            return Ok((nodes, left));
        };

        let frequency_sum = left_sum + right_sum;
        nodes.push(Node::Internal {
            left,
            right: Some(right),
            frequency_sum,
        });
        queue.push(Reverse((frequency_sum, sequence, nodes.len() - 1)));
        sequence += 1;
    }

    Err(Error::tree_build("merge queue drained without a root"))
}

/// Depth-first walk assigning each leaf its path from the root.
fn generate_codes(nodes: &[Node], root: NodeId) -> Vec<Option<Code>> {
    let mut codes = vec![None; ALPHABET_SIZE];
    let mut stack = vec![(root, String::new())];

    while let Some((id, path)) = stack.pop() {
        match &nodes[id] {
            Node::Leaf { symbol } => {
                codes[symbol.value as usize] = Some(Code(path));
            }
            Node::Internal { left, right, .. } => {
                if let Some(right) = right {
                    stack.push((*right, format!("{}1", path)));
                }
                stack.push((*left, format!("{}0", path)));
            }
        }
    }

    codes
}
