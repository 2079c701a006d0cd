use std::{cmp::{Ordering, Reverse}, collections::BinaryHeap};

use super::frequency::FrequencyTable;

pub type NodeId = usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Leaf(u16),
    Internal { left: NodeId, right: NodeId },
}

#[derive(Clone, Copy, Debug)]
pub struct Node {
    /// Sum of the leaf counts below; 0 for trees read back from a header.
    pub weight: u64,
    pub kind: NodeKind,
}

/// Entry of the merge queue. Ordered by weight, ties broken by the order in which
/// entries were created.
#[derive(Debug)]
struct HeapNode {
    weight: u64,
    seq: usize,
    id: NodeId,
}

impl Ord for HeapNode {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.weight == other.weight {
            return self.seq.cmp(&other.seq);
        }
        self.weight.cmp(&other.weight)
    }
}

impl PartialOrd for HeapNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Eq for HeapNode {}

impl PartialEq for HeapNode {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.seq == other.seq
    }
}

/// Huffman code tree stored as an arena of nodes. Children are addressed by index,
/// so nodes never move once pushed.
#[derive(Clone, Debug)]
pub struct CodeTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl CodeTree {
    /// Greedy Huffman merge over every symbol with a non-zero count.
    ///
    /// Leaves enter the queue in ascending symbol order and each merged node gets the
    /// next sequence number, so equal tables always give the same tree. The first node
    /// removed becomes the left child.
    pub fn from_frequencies(freqs: &FrequencyTable) -> Self {
        let mut nodes = Vec::with_capacity(2 * freqs.num_present());
        let mut freq_tree = BinaryHeap::new();

        for (seq, (symbol, count)) in freqs.present().enumerate() {
            nodes.push(Node { weight: count, kind: NodeKind::Leaf(symbol) });
            freq_tree.push(Reverse(HeapNode { weight: count, seq, id: nodes.len() - 1 }));
        }

        assert!(!nodes.is_empty(), "Cannot build a code tree without leaves");

        let mut seq = nodes.len();

        let root = loop {
            let Some(Reverse(node1)) = freq_tree.pop() else {
                unreachable!("queue never empties while merging");
            };
            let Some(Reverse(node2)) = freq_tree.pop() else {
                break node1.id;
            };

            let weight = node1.weight + node2.weight;
            nodes.push(Node { weight, kind: NodeKind::Internal { left: node1.id, right: node2.id } });
            freq_tree.push(Reverse(HeapNode { weight, seq, id: nodes.len() - 1 }));
            seq += 1;
        };

        Self { nodes, root }
    }

    #[inline(always)]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline(always)]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// The child reached by `bit` from `id`, or `None` if `id` is a leaf.
    #[inline(always)]
    pub fn child(&self, id: NodeId, bit: u32) -> Option<NodeId> {
        match self.nodes[id].kind {
            NodeKind::Internal { left, right } => Some(if bit == 0 { left } else { right }),
            NodeKind::Leaf(_) => None,
        }
    }

    #[inline(always)]
    pub fn symbol(&self, id: NodeId) -> Option<u16> {
        match self.nodes[id].kind {
            NodeKind::Leaf(symbol) => Some(symbol),
            NodeKind::Internal { .. } => None,
        }
    }

    pub fn weight(&self) -> u64 {
        self.nodes[self.root].weight
    }

    pub fn preorder(&self) -> Preorder<'_> {
        Preorder { tree: self, stack: vec![self.root] }
    }

    /// Leaf symbols, left to right.
    pub fn leaves(&self) -> impl Iterator<Item = u16> + '_ {
        self.preorder().filter_map(|(_, node)| match node.kind {
            NodeKind::Leaf(symbol) => Some(symbol),
            NodeKind::Internal { .. } => None,
        })
    }

    pub fn num_leaves(&self) -> usize {
        self.leaves().count()
    }

    pub fn contains_symbol(&self, symbol: u16) -> bool {
        self.leaves().any(|s| s == symbol)
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(self.root, 0)];

        while let Some((id, depth)) = stack.pop() {
            match self.nodes[id].kind {
                NodeKind::Leaf(_) => max_depth = max_depth.max(depth),
                NodeKind::Internal { left, right } => {
                    stack.push((right, depth + 1));
                    stack.push((left, depth + 1));
                }
            }
        }

        max_depth
    }
}

/// Trees are equal when they have the same shape and the same leaf symbols; weights
/// are ignored since a header does not carry them.
impl PartialEq for CodeTree {
    fn eq(&self, other: &Self) -> bool {
        self.preorder()
            .map(|(id, _)| self.symbol(id))
            .eq(other.preorder().map(|(id, _)| other.symbol(id)))
    }
}

impl Eq for CodeTree {}

/// Incremental construction used when a tree is read back bottom-up.
#[derive(Default)]
pub struct CodeTreeBuilder {
    nodes: Vec<Node>,
}

impl CodeTreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_leaf(&mut self, symbol: u16) -> NodeId {
        self.nodes.push(Node { weight: 0, kind: NodeKind::Leaf(symbol) });
        self.nodes.len() - 1
    }

    pub fn push_internal(&mut self, left: NodeId, right: NodeId) -> NodeId {
        let weight = self.nodes[left].weight + self.nodes[right].weight;
        self.nodes.push(Node { weight, kind: NodeKind::Internal { left, right } });
        self.nodes.len() - 1
    }

    pub fn build(self, root: NodeId) -> CodeTree {
        assert!(root < self.nodes.len(), "Root {root} is not a node of the tree");
        CodeTree { nodes: self.nodes, root }
    }
}

/// Node-before-children traversal, left subtree first.
pub struct Preorder<'a> {
    tree: &'a CodeTree,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let tree = self.tree;
        let node = &tree.nodes[id];

        if let NodeKind::Internal { left, right } = node.kind {
            self.stack.push(right);
            self.stack.push(left);
        }

        Some((id, node))
    }
}
