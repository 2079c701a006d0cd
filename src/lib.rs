pub mod bitstreams;
pub mod error;
pub mod huffman;
pub mod properties;
pub mod utils;

pub use error::{HuffError, Result};
pub use huffman::processor::{CompressionStats, DecompressionStats, HuffProcessor};
pub use properties::Properties;

pub const BITS_PER_WORD: u32 = 8;
pub const BITS_PER_INT: u32 = 32;
/// Width of a leaf symbol inside the serialized tree: 8 data bits plus one so that
/// `PSEUDO_EOF` fits.
pub const BITS_PER_SYMBOL: u32 = BITS_PER_WORD + 1;
pub const ALPH_SIZE: usize = 1 << BITS_PER_WORD;
pub const PSEUDO_EOF: u16 = ALPH_SIZE as u16;
/// Magic of the frequency-count header style. Not produced by this crate.
pub const HUFF_NUMBER: u32 = 0xface8200;
/// Magic of the tree header style.
pub const HUFF_TREE: u32 = HUFF_NUMBER | 1;

/// A source of bits, read most-significant bit first.
pub trait BitSource {
    /// Reads `n` bits (`1..=32`) as an unsigned integer. `Ok(None)` means fewer than
    /// `n` bits were left in the stream.
    fn read_bits(&mut self, n: u32) -> std::io::Result<Option<u32>>;
    /// Rewinds the source to its first bit.
    fn reset(&mut self) -> std::io::Result<()>;
    fn bits_read(&self) -> usize;
}

/// A sink of bits, written most-significant bit first.
pub trait BitSink {
    /// Writes the low `n` bits (`1..=32`) of `value`.
    fn write_bits(&mut self, n: u32, value: u32) -> std::io::Result<()>;
    /// Pads the last partial byte with zeros and flushes. Closing twice is a no-op.
    fn close(&mut self) -> std::io::Result<()>;
    fn bits_written(&self) -> usize;
}
