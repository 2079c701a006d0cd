//! Self-describing tree header.
//!
//! After the 32-bit `HUFF_TREE` magic the tree is written in preorder: a `0` bit for an
//! internal node followed by its left and right subtrees, or a `1` bit followed by the
//! leaf symbol in `BITS_PER_SYMBOL` bits.

use std::io;

use crate::{error::{HuffError, Result}, BitSink, BitSource, BITS_PER_INT, BITS_PER_SYMBOL, HUFF_TREE, PSEUDO_EOF};

use super::tree::{CodeTree, CodeTreeBuilder, NodeId, NodeKind};

pub fn write_tree<S: BitSink>(tree: &CodeTree, sink: &mut S) -> io::Result<()> {
    for (_, node) in tree.preorder() {
        match node.kind {
            NodeKind::Internal { .. } => sink.write_bits(1, 0)?,
            NodeKind::Leaf(symbol) => {
                sink.write_bits(1, 1)?;
                sink.write_bits(BITS_PER_SYMBOL, symbol as u32)?;
            }
        }
    }
    Ok(())
}

/// Rebuilds a tree written by [`write_tree`].
///
/// Uses an explicit stack of internal nodes still waiting for children, so a long run
/// of `0` bits in a corrupt file cannot overflow the call stack.
pub fn read_tree<S: BitSource>(source: &mut S) -> Result<CodeTree> {
    let mut builder = CodeTreeBuilder::new();
    // Left child of each open internal node, once it is complete.
    let mut pending: Vec<Option<NodeId>> = Vec::new();

    loop {
        let bit = source.read_bits(1)?.ok_or_else(|| HuffError::truncated("tree header"))?;

        if bit == 0 {
            pending.push(None);
            continue;
        }

        let value = source
            .read_bits(BITS_PER_SYMBOL)?
            .ok_or_else(|| HuffError::truncated("tree header"))?;

        if value > PSEUDO_EOF as u32 {
            return Err(HuffError::InvalidSymbol { value });
        }

        let mut finished = builder.push_leaf(value as u16);

        loop {
            match pending.last().copied() {
                None => return Ok(builder.build(finished)),
                Some(None) => {
                    if let Some(slot) = pending.last_mut() {
                        *slot = Some(finished);
                    }
                    break;
                }
                Some(Some(left)) => {
                    pending.pop();
                    finished = builder.push_internal(left, finished);
                }
            }
        }
    }
}

pub fn write_header<S: BitSink>(tree: &CodeTree, sink: &mut S) -> io::Result<()> {
    sink.write_bits(BITS_PER_INT, HUFF_TREE)?;
    write_tree(tree, sink)
}

/// Checks the magic, then reads the tree. Fails before touching the tree if the
/// magic is wrong.
pub fn read_header<S: BitSource>(source: &mut S) -> Result<CodeTree> {
    let magic = source
        .read_bits(BITS_PER_INT)?
        .ok_or_else(|| HuffError::truncated("magic"))?;

    if magic != HUFF_TREE {
        return Err(HuffError::BadMagicHeader { found: magic });
    }

    read_tree(source)
}

/// Number of bits `write_tree` emits for `tree`.
pub fn tree_bits(tree: &CodeTree) -> usize {
    tree.preorder()
        .map(|(_, node)| match node.kind {
            NodeKind::Internal { .. } => 1,
            NodeKind::Leaf(_) => 1 + BITS_PER_SYMBOL as usize,
        })
        .sum()
}
