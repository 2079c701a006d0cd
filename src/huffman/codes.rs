use std::fmt;

use crate::{error::{HuffError, Result}, ALPH_SIZE};

use super::tree::{CodeTree, NodeKind};

/// Longest code a `Code` can hold.
pub const MAX_CODE_LEN: usize = u128::BITS as usize;

/// A path from the root to a leaf: `len` bits, stored right-aligned in `bits`, first
/// step most significant. 0 is a left branch, 1 a right one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Code {
    pub bits: u128,
    pub len: usize,
}

impl Code {
    #[inline(always)]
    fn push(self, bit: u128) -> Self {
        Code { bits: (self.bits << 1) | bit, len: self.len + 1 }
    }

    /// True if `self` is a proper or improper prefix of `other`.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        if self.len > other.len {
            return false;
        }
        if self.len == 0 {
            return true;
        }
        other.bits >> (other.len - self.len) == self.bits
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in (0..self.len).rev() {
            write!(f, "{}", (self.bits >> i) & 1)?;
        }
        Ok(())
    }
}

/// Code of every leaf symbol of a tree, indexed by symbol.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeTable {
    codes: Box<[Option<Code>]>,
}

impl CodeTable {
    /// Walks the tree carrying the path so far. A root that is itself a leaf gets the
    /// empty code.
    pub fn from_tree(tree: &CodeTree) -> Result<Self> {
        let mut codes = vec![None; ALPH_SIZE + 1].into_boxed_slice();
        let mut stack = vec![(tree.root(), Code::default())];

        while let Some((id, code)) = stack.pop() {
            match tree.node(id).kind {
                NodeKind::Leaf(symbol) => {
                    if code.len > MAX_CODE_LEN {
                        return Err(HuffError::CodeTooLong { symbol, length: code.len, max: MAX_CODE_LEN });
                    }
                    let slot = codes
                        .get_mut(symbol as usize)
                        .ok_or(HuffError::InvalidSymbol { value: symbol as u32 })?;
                    *slot = Some(code);
                }
                NodeKind::Internal { left, right } => {
                    stack.push((right, code.push(1)));
                    stack.push((left, code.push(0)));
                }
            }
        }

        Ok(Self { codes })
    }

    #[inline(always)]
    pub fn get(&self, symbol: u16) -> Option<Code> {
        self.codes.get(symbol as usize).copied().flatten()
    }

    /// `(symbol, code)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u16, Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.map(|c| (symbol as u16, c)))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
