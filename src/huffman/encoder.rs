use std::io;

use crate::{error::{HuffError, Result}, BitSink, BitSource, BITS_PER_INT, BITS_PER_WORD, PSEUDO_EOF};

use super::codes::{Code, CodeTable};

/// Emits `code` most significant bit first, in pieces of at most 32 bits.
#[inline(always)]
pub fn write_code<S: BitSink>(code: Code, sink: &mut S) -> io::Result<()> {
    let mut remaining = code.len;

    while remaining > 0 {
        let n = remaining.min(BITS_PER_INT as usize);
        remaining -= n;
        sink.write_bits(n as u32, (code.bits >> remaining) as u32)?;
    }

    Ok(())
}

/// Replaces every byte of `source` by its code and terminates the stream with the
/// code of `PSEUDO_EOF`. Returns the number of bytes encoded.
pub fn encode_stream<R: BitSource, W: BitSink>(source: &mut R, table: &CodeTable, sink: &mut W) -> Result<u64> {
    let mut encoded = 0;

    while let Some(byte) = source.read_bits(BITS_PER_WORD)? {
        let symbol = byte as u16;
        let code = table.get(symbol).ok_or(HuffError::UnknownSymbol { symbol })?;
        write_code(code, sink)?;
        encoded += 1;
    }

    let eof = table.get(PSEUDO_EOF).ok_or(HuffError::UnknownSymbol { symbol: PSEUDO_EOF })?;
    write_code(eof, sink)?;

    Ok(encoded)
}
