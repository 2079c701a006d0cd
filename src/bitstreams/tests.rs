use std::io::{self, Cursor, Read, Seek, SeekFrom};

use crate::{BitSink, BitSource};

use super::{BinaryReader, BinaryWriter};

fn write_all(values: &[(u32, u32)]) -> Vec<u8> {
    let mut writer = BinaryWriter::default();
    for &(n, value) in values {
        writer.write_bits(n, value).unwrap();
    }
    writer.into_inner().unwrap()
}

#[test]
fn test_write_single_bits() {
    let bytes = write_all(&[(1, 1), (1, 0), (1, 1), (1, 1)]);

    assert_eq!(bytes, vec![0b1011_0000]);
}

#[test]
fn test_write_only_low_bits_are_kept() {
    let bytes = write_all(&[(4, 0xFFFF_FFF5)]);

    assert_eq!(bytes, vec![0b0101_0000]);
}

#[test]
fn test_write_across_byte_boundaries() {
    let bytes = write_all(&[(3, 0b101), (9, 0b1_0000_0001), (4, 0b1111)]);

    assert_eq!(bytes, vec![0b1011_0000, 0b0001_1111]);
}

#[test]
fn test_write_full_int() {
    let bytes = write_all(&[(32, 0xface8201)]);

    assert_eq!(bytes, vec![0xfa, 0xce, 0x82, 0x01]);
}

#[test]
fn test_bits_written_excludes_padding() {
    let mut writer = BinaryWriter::default();
    writer.write_bits(5, 3).unwrap();
    writer.write_bits(9, 256).unwrap();

    assert_eq!(writer.bits_written(), 14);
    assert_eq!(writer.into_inner().unwrap().len(), 2);
}

#[test]
fn test_close_is_idempotent_and_blocks_writes() {
    let mut writer = BinaryWriter::default();
    writer.write_bits(3, 0b111).unwrap();
    writer.close().unwrap();
    writer.close().unwrap();

    assert!(writer.write_bits(1, 1).is_err());
    assert_eq!(writer.into_inner().unwrap(), vec![0b1110_0000]);
}

#[test]
fn test_drop_flushes_pending_bits() {
    let mut out = Vec::new();
    {
        let mut writer = BinaryWriter::new(&mut out);
        writer.write_bits(12, 0xABC).unwrap();
    }

    assert_eq!(out, vec![0xAB, 0xC0]);
}

#[test]
fn test_large_output_crosses_buffer() {
    let mut writer = BinaryWriter::default();
    for i in 0..20_000u32 {
        writer.write_bits(8, i).unwrap();
    }
    let bytes = writer.into_inner().unwrap();

    assert_eq!(bytes.len(), 20_000);
    assert!(bytes.iter().enumerate().all(|(i, &b)| b == i as u8));
}

#[test]
fn test_read_mixed_widths() {
    let bytes = write_all(&[(1, 0), (9, 256), (32, 0xdeadbeef), (7, 42)]);
    let mut reader = BinaryReader::from_bytes(bytes);

    assert_eq!(reader.read_bits(1).unwrap(), Some(0));
    assert_eq!(reader.read_bits(9).unwrap(), Some(256));
    assert_eq!(reader.read_bits(32).unwrap(), Some(0xdeadbeef));
    assert_eq!(reader.read_bits(7).unwrap(), Some(42));
    assert_eq!(reader.bits_read(), 49);
}

#[test]
fn test_read_zero_is_not_end_of_stream() {
    let mut reader = BinaryReader::from_bytes(vec![0u8; 2]);

    assert_eq!(reader.read_bits(8).unwrap(), Some(0));
    assert_eq!(reader.read_bits(8).unwrap(), Some(0));
    assert_eq!(reader.read_bits(8).unwrap(), None);
}

#[test]
fn test_read_past_end() {
    let mut reader = BinaryReader::from_bytes(vec![0xFF]);

    assert_eq!(reader.read_bits(9).unwrap(), None);
}

#[test]
fn test_empty_source() {
    let mut reader = BinaryReader::from_bytes(Vec::new());

    assert_eq!(reader.read_bits(1).unwrap(), None);
    assert_eq!(reader.bits_read(), 0);
}

#[test]
fn test_reset_rewinds_to_start() {
    let mut reader = BinaryReader::from_bytes(vec![0x12, 0x34, 0x56]);

    assert_eq!(reader.read_bits(12).unwrap(), Some(0x123));
    reader.reset().unwrap();
    assert_eq!(reader.bits_read(), 0);
    assert_eq!(reader.read_bits(24).unwrap(), Some(0x123456));
    assert_eq!(reader.read_bits(1).unwrap(), None);
}

#[test]
fn test_read_large_input_crosses_buffer() {
    let bytes: Vec<u8> = (0..30_000u32).map(|i| (i * 7) as u8).collect();
    let mut reader = BinaryReader::from_bytes(bytes.clone());

    for &b in bytes.iter() {
        assert_eq!(reader.read_bits(8).unwrap(), Some(b as u32));
    }
    assert_eq!(reader.read_bits(8).unwrap(), None);
}

struct FailingReader;

impl Read for FailingReader {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "nope"))
    }
}

impl Seek for FailingReader {
    fn seek(&mut self, _pos: SeekFrom) -> io::Result<u64> {
        Ok(0)
    }
}

#[test]
fn test_read_errors_are_propagated() {
    let mut reader = BinaryReader::new(FailingReader);

    let err = reader.read_bits(8).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
}

#[test]
fn test_reader_over_cursor_of_vec() {
    let mut reader = BinaryReader::new(Cursor::new(vec![0b1010_0000]));

    assert_eq!(reader.read_bits(3).unwrap(), Some(0b101));
}
