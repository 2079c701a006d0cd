use crate::{error::{HuffError, Result}, BitSink, BitSource, BITS_PER_WORD, PSEUDO_EOF};

use super::tree::CodeTree;

/// Walks `tree` one bit at a time, writing a byte each time an ordinary leaf is
/// reached and stopping at the `PSEUDO_EOF` leaf. Any bits after it are left unread.
/// Returns the number of bytes decoded.
pub fn decode_stream<R: BitSource, W: BitSink>(tree: &CodeTree, source: &mut R, sink: &mut W) -> Result<u64> {
    if !tree.contains_symbol(PSEUDO_EOF) {
        return Err(HuffError::MissingEndOfStream);
    }

    let root = tree.root();
    // A lone leaf can only be the end-of-stream marker here: empty input, empty code.
    if tree.symbol(root).is_some() {
        return Ok(0);
    }

    let mut current = root;
    let mut decoded = 0;

    loop {
        let bit = source
            .read_bits(1)?
            .ok_or_else(|| HuffError::truncated("symbol stream"))?;

        current = match tree.child(current, bit) {
            Some(next) => next,
            None => unreachable!("the walk restarts at the root after every leaf"),
        };

        if let Some(symbol) = tree.symbol(current) {
            if symbol == PSEUDO_EOF {
                return Ok(decoded);
            }

            sink.write_bits(BITS_PER_WORD, symbol as u32)?;
            decoded += 1;
            current = root;
        }
    }
}
