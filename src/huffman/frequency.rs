use std::io;

use crate::{BitSource, ALPH_SIZE, BITS_PER_WORD, PSEUDO_EOF};

/// Occurrence count of every symbol, `PSEUDO_EOF` included.
///
/// The end-of-stream count is pinned to 1 by every constructor, so a table always
/// yields at least one leaf.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: Box<[u64]>,
}

impl Default for FrequencyTable {
    fn default() -> Self {
        let mut counts = vec![0u64; ALPH_SIZE + 1].into_boxed_slice();
        counts[PSEUDO_EOF as usize] = 1;
        Self { counts }
    }
}

impl FrequencyTable {
    /// Scans `source` 8 bits at a time until it runs dry. The source is left at its
    /// end; callers rewind it before a second pass.
    pub fn from_source<S: BitSource>(source: &mut S) -> io::Result<Self> {
        let mut table = Self::default();

        while let Some(byte) = source.read_bits(BITS_PER_WORD)? {
            table.counts[byte as usize] += 1;
        }

        table.counts[PSEUDO_EOF as usize] = 1;
        Ok(table)
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut table = Self::default();

        for &byte in bytes {
            table.counts[byte as usize] += 1;
        }

        table
    }

    #[inline(always)]
    pub fn count(&self, symbol: u16) -> u64 {
        self.counts.get(symbol as usize).copied().unwrap_or(0)
    }

    /// Symbols with a non-zero count, in ascending symbol order.
    pub fn present(&self) -> impl Iterator<Item = (u16, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(symbol, &count)| (symbol as u16, count))
    }

    pub fn num_present(&self) -> usize {
        self.present().count()
    }

    /// Number of input bytes counted, the end-of-stream marker excluded.
    pub fn total_bytes(&self) -> u64 {
        self.counts[..ALPH_SIZE].iter().sum()
    }
}
