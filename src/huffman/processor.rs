use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{
    bitstreams::{BinaryReader, BinaryWriter},
    error::Result,
    BitSink, BitSource, BITS_PER_INT,
};

use super::{
    codes::CodeTable,
    decoder::decode_stream,
    encoder::encode_stream,
    frequency::FrequencyTable,
    header::{read_header, tree_bits, write_header},
    tree::CodeTree,
};

pub const DEBUG_LOW: u32 = 1;
pub const DEBUG_HIGH: u32 = 4;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressionStats {
    pub original_bytes: u64,
    pub leaves: usize,
    /// Magic plus serialized tree.
    pub header_bits: usize,
    pub payload_bits: usize,
    pub total_bits: usize,
}

impl CompressionStats {
    pub fn compressed_bytes(&self) -> usize {
        self.total_bits.div_ceil(8)
    }

    /// Compressed size over original size; 0 for empty input.
    pub fn ratio(&self) -> f64 {
        if self.original_bytes == 0 {
            return 0.0;
        }
        self.compressed_bytes() as f64 / self.original_bytes as f64
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecompressionStats {
    pub compressed_bits_read: usize,
    pub decoded_bytes: u64,
}

/// Drives the two pipelines: count, build, tabulate, write header, encode for
/// compression; read header, decode for decompression.
///
/// Both entry points close the output on every path, errors included. What was
/// written before an error is left for the caller to discard.
#[derive(Clone, Copy, Debug, Default)]
pub struct HuffProcessor {
    debug_level: u32,
}

impl HuffProcessor {
    pub fn new(debug_level: u32) -> Self {
        Self { debug_level }
    }

    pub fn debug_level(&self) -> u32 {
        self.debug_level
    }

    /// Compresses `input`, which is read twice and rewound in between.
    pub fn compress<R: BitSource, W: BitSink>(&self, input: &mut R, output: &mut W) -> Result<CompressionStats> {
        let result = self.write_compressed(input, output);
        let closed = output.close();
        let stats = result?;
        closed?;
        Ok(stats)
    }

    fn write_compressed<R: BitSource, W: BitSink>(&self, input: &mut R, output: &mut W) -> Result<CompressionStats> {
        let freqs = FrequencyTable::from_source(input)?;
        let tree = CodeTree::from_frequencies(&freqs);
        let table = CodeTable::from_tree(&tree)?;

        if self.debug_level >= DEBUG_LOW {
            debug!(
                bytes = freqs.total_bytes(),
                leaves = tree.num_leaves(),
                depth = tree.depth(),
                "built code tree"
            );
        }
        if self.debug_level >= DEBUG_HIGH {
            for (symbol, code) in table.iter() {
                trace!(symbol, count = freqs.count(symbol), code = %code, "code table entry");
            }
        }

        input.reset()?;

        let start = output.bits_written();
        write_header(&tree, output)?;
        let header_bits = output.bits_written() - start;
        debug_assert_eq!(header_bits, BITS_PER_INT as usize + tree_bits(&tree));

        let original_bytes = encode_stream(input, &table, output)?;
        let total_bits = output.bits_written() - start;

        let stats = CompressionStats {
            original_bytes,
            leaves: table.len(),
            header_bits,
            payload_bits: total_bits - header_bits,
            total_bits,
        };

        if self.debug_level >= DEBUG_LOW {
            debug!(
                header_bits = stats.header_bits,
                payload_bits = stats.payload_bits,
                total_bits = stats.total_bits,
                "compressed stream written"
            );
        }

        Ok(stats)
    }

    pub fn decompress<R: BitSource, W: BitSink>(&self, input: &mut R, output: &mut W) -> Result<DecompressionStats> {
        let result = self.read_compressed(input, output);
        let closed = output.close();
        let stats = result?;
        closed?;
        Ok(stats)
    }

    fn read_compressed<R: BitSource, W: BitSink>(&self, input: &mut R, output: &mut W) -> Result<DecompressionStats> {
        let start = input.bits_read();
        let tree = read_header(input)?;

        if self.debug_level >= DEBUG_LOW {
            debug!(
                leaves = tree.num_leaves(),
                header_bits = input.bits_read() - start,
                "read code tree"
            );
        }
        if self.debug_level >= DEBUG_HIGH {
            for symbol in tree.leaves() {
                trace!(symbol, "tree leaf");
            }
        }

        let decoded_bytes = decode_stream(&tree, input, output)?;

        let stats = DecompressionStats {
            compressed_bits_read: input.bits_read() - start,
            decoded_bytes,
        };

        if self.debug_level >= DEBUG_LOW {
            debug!(
                bits_read = stats.compressed_bits_read,
                bytes = stats.decoded_bytes,
                "decompressed stream"
            );
        }

        Ok(stats)
    }

    pub fn compress_bytes(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut reader = BinaryReader::from_bytes(data);
        let mut writer = BinaryWriter::default();
        self.compress(&mut reader, &mut writer)?;
        Ok(writer.into_inner()?)
    }

    pub fn decompress_bytes(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut reader = BinaryReader::from_bytes(data);
        let mut writer = BinaryWriter::default();
        self.decompress(&mut reader, &mut writer)?;
        Ok(writer.into_inner()?)
    }
}
