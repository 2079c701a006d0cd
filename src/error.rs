//! Error types for compression and decompression.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, HuffError>;

#[derive(Debug, Error)]
pub enum HuffError {
    /// The leading 32 bits are not the tree header magic.
    #[error("illegal header starts with 0x{found:08x}")]
    BadMagicHeader { found: u32 },

    /// The bit source ran dry where more structure or data was expected.
    #[error("stream ended before the {context} was complete")]
    TruncatedStream { context: &'static str },

    /// A tree leaf holds a value outside the symbol range.
    #[error("tree leaf holds invalid symbol {value}")]
    InvalidSymbol { value: u32 },

    /// The decoded tree cannot terminate a stream.
    #[error("tree has no end-of-stream leaf")]
    MissingEndOfStream,

    /// The input holds a byte the code table was not built for, i.e. it changed
    /// between the counting pass and the encoding pass.
    #[error("symbol {symbol} has no code")]
    UnknownSymbol { symbol: u16 },

    #[error("code for symbol {symbol} is {length} bits long, at most {max} are supported")]
    CodeTooLong { symbol: u16, length: usize, max: usize },

    #[error("invalid property {key}: {reason}")]
    InvalidProperty { key: &'static str, reason: String },

    #[error("properties file error: {0}")]
    Properties(#[from] java_properties::PropertiesError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HuffError {
    pub fn truncated(context: &'static str) -> Self {
        HuffError::TruncatedStream { context }
    }
}
