use std::{collections::HashMap, fs::{self, File}, io::BufReader, path::Path};

use serde::{Deserialize, Serialize};

use crate::{error::{HuffError, Result}, huffman::processor::CompressionStats, HUFF_TREE};

/// Summary stored next to a compressed file as `<name>.properties`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Properties {
    pub magic: u32,
    pub original_bytes: u64,
    pub leaves: usize,
    pub header_bits: usize,
    pub payload_bits: usize,
    pub total_bits: usize,
}

impl From<CompressionStats> for Properties {
    fn from(stats: CompressionStats) -> Self {
        Self {
            magic: HUFF_TREE,
            original_bytes: stats.original_bytes,
            leaves: stats.leaves,
            header_bits: stats.header_bits,
            payload_bits: stats.payload_bits,
            total_bits: stats.total_bits,
        }
    }
}

fn parse_key<T: std::str::FromStr>(map: &HashMap<String, String>, key: &'static str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    let raw = map
        .get(key)
        .ok_or_else(|| HuffError::InvalidProperty { key, reason: "missing".to_string() })?;

    raw.trim()
        .parse()
        .map_err(|e: T::Err| HuffError::InvalidProperty { key, reason: e.to_string() })
}

impl TryFrom<HashMap<String, String>> for Properties {
    type Error = HuffError;

    fn try_from(value: HashMap<String, String>) -> Result<Self> {
        let magic: String = parse_key(&value, "magic")?;
        let magic = u32::from_str_radix(magic.trim_start_matches("0x"), 16)
            .map_err(|e| HuffError::InvalidProperty { key: "magic", reason: e.to_string() })?;

        Ok(Properties {
            magic,
            original_bytes: parse_key(&value, "originalbytes")?,
            leaves: parse_key(&value, "leaves")?,
            header_bits: parse_key(&value, "headerbits")?,
            payload_bits: parse_key(&value, "payloadbits")?,
            total_bits: parse_key(&value, "totalbits")?,
        })
    }
}

impl From<&Properties> for String {
    fn from(val: &Properties) -> Self {
        let mut s = String::new();

        s.push_str("#Huffman tree-header file properties\n");
        s.push_str(&format!("magic=0x{:08x}\n", val.magic));
        s.push_str(&format!("originalbytes={}\n", val.original_bytes));
        s.push_str(&format!("leaves={}\n", val.leaves));
        s.push_str(&format!("headerbits={}\n", val.header_bits));
        s.push_str(&format!("payloadbits={}\n", val.payload_bits));
        s.push_str(&format!("totalbits={}\n", val.total_bits));

        s
    }
}

impl Properties {
    /// Writes `<basename>.properties`.
    pub fn store(&self, basename: &str) -> Result<()> {
        fs::write(format!("{}.properties", basename), String::from(self))?;
        Ok(())
    }

    /// Reads `<basename>.properties`.
    pub fn load(basename: &str) -> Result<Self> {
        Self::load_path(format!("{}.properties", basename))
    }

    pub fn load_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let map = java_properties::read(BufReader::new(file))?;
        Self::try_from(map)
    }

    pub fn compressed_bytes(&self) -> usize {
        self.total_bits.div_ceil(8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Properties {
        Properties {
            magic: HUFF_TREE,
            original_bytes: 3,
            leaves: 3,
            header_bits: 64,
            payload_bits: 6,
            total_bits: 70,
        }
    }

    #[test]
    fn test_properties_text() {
        let text = String::from(&sample());

        assert!(text.starts_with('#'));
        assert!(text.contains("magic=0xface8201\n"));
        assert!(text.contains("totalbits=70\n"));
    }

    #[test]
    fn test_store_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let basename = dir.path().join("file.hf");
        let basename = basename.to_str().unwrap();

        sample().store(basename).unwrap();

        let loaded = Properties::load(basename).unwrap();
        assert_eq!(loaded, sample());
        assert_eq!(loaded.compressed_bytes(), 9);
    }

    #[test]
    fn test_missing_key() {
        let mut map = HashMap::new();
        map.insert("magic".to_string(), "0xface8201".to_string());

        match Properties::try_from(map) {
            Err(HuffError::InvalidProperty { key, reason }) => {
                assert_eq!(key, "originalbytes");
                assert_eq!(reason, "missing");
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_malformed_number() {
        let text = String::from(&sample()).replace("leaves=3", "leaves=three");
        let map = java_properties::read(text.as_bytes()).unwrap();

        assert!(matches!(
            Properties::try_from(map),
            Err(HuffError::InvalidProperty { key: "leaves", .. })
        ));
    }

    #[test]
    fn test_from_stats() {
        let stats = CompressionStats {
            original_bytes: 3,
            leaves: 3,
            header_bits: 64,
            payload_bits: 6,
            total_bits: 70,
        };

        assert_eq!(Properties::from(stats), sample());
    }
}
