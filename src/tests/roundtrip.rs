use crate::common::{HEADER_SIZE, MAGIC_NUM};
use crate::decoding::{decode_all, decode_all_to_vec, DecompressError};
use crate::encoding::{compress_to_vec, HuffmanCompressor};
use crate::frame::ReadHeaderError;
use crate::huff0::{Histogram, HuffmanTree};
use crate::stats::Direction;
use rand::{Rng, SeedableRng};
use std::io::Cursor;

fn assert_roundtrip(data: &[u8]) -> Vec<u8> {
    let compressed = compress_to_vec(data);
    let decoded = decode_all_to_vec(&compressed).unwrap();
    assert_eq!(decoded, data, "roundtrip of {} bytes failed", data.len());
    compressed
}

#[test]
fn empty_input() {
    let compressed = assert_roundtrip(&[]);
    // header and the tree of the two forced symbols, no payload
    assert_eq!(compressed.len(), HEADER_SIZE + 5);
}

#[test]
fn single_byte_inputs() {
    for byte in [0u8, 1, b'a', 254, 255] {
        assert_roundtrip(&[byte]);
    }
}

#[test]
fn all_symbols() {
    let data: Vec<u8> = (0..=u8::MAX).collect();
    let compressed = assert_roundtrip(&data);
    assert_eq!(&compressed[6..8], &767u16.to_le_bytes());

    let mut shuffled = data.repeat(7);
    shuffled.reverse();
    assert_roundtrip(&shuffled);
}

#[test]
fn identical_bytes() {
    for byte in [0u8, b'q', 255] {
        let data = vec![byte; 10_000];
        let compressed = assert_roundtrip(&data);
        // one bit per byte
        assert!(compressed.len() < 10_000 / 8 + 64);
    }
}

#[test]
fn aaab() {
    let compressed = assert_roundtrip(b"aaab");
    assert!(compressed.starts_with(&MAGIC_NUM.to_le_bytes()));
    assert_eq!(&compressed[6..8], &11u16.to_le_bytes());
}

#[test]
fn random_inputs() {
    let mut rng = rand::rngs::SmallRng::seed_from_u64(0xDEADBEEF);
    for _ in 0..50 {
        let len = rng.gen_range(0..20_000);
        let alphabet = rng.gen_range(1..=256u32);
        let data: Vec<u8> = (0..len)
            .map(|_| rng.gen_range(0..alphabet) as u8)
            .collect();
        assert_roundtrip(&data);
    }
}

#[test]
fn skewed_input_compresses() {
    let mut rng = rand::rngs::SmallRng::seed_from_u64(7);
    let data: Vec<u8> = (0..50_000)
        .map(|_| if rng.gen_bool(0.9) { b'e' } else { rng.gen() })
        .collect();
    let compressed = assert_roundtrip(&data);
    assert!(compressed.len() < data.len() / 2);
}

#[test]
fn inputs_spanning_many_blocks() {
    let data: Vec<u8> = (0..100_000u32).map(|x| (x * 31 % 251) as u8).collect();
    assert_roundtrip(&data);
}

#[test]
fn rebuilt_tree_has_same_code_lengths() {
    let mut rng = rand::rngs::SmallRng::seed_from_u64(42);
    for _ in 0..20 {
        let data: Vec<u8> = (0..2_000).map(|_| rng.gen_range(0..64u8) * 3).collect();
        let mut histogram = Histogram::from_bytes(&data);
        histogram.force_include(0);
        histogram.force_include(255);
        let tree = HuffmanTree::build(&histogram).unwrap();
        let dumped = tree.dump();
        assert_eq!(dumped.len(), 3 * histogram.unique_symbols() - 1);

        let rebuilt = HuffmanTree::rebuild(&dumped).unwrap();
        let (codes, rebuilt_codes) = (tree.build_codes().unwrap(), rebuilt.build_codes().unwrap());
        for symbol in 0..=u8::MAX {
            assert_eq!(codes.code_len(symbol), rebuilt_codes.code_len(symbol));
            assert_eq!(codes.code_len(symbol) > 0, histogram.count(symbol) > 0);
        }
    }
}

#[test]
fn stats_on_both_sides() {
    let data = b"so much repetition, so much repetition, so much repetition".repeat(20);
    let mut compressed = Vec::new();
    let mut compressor = HuffmanCompressor::new();
    compressor.set_source(Cursor::new(&data));
    compressor.set_drain(&mut compressed);
    compressor.set_permissions(0o751);
    let encode_stats = compressor.compress().unwrap();
    assert_eq!(encode_stats.uncompressed_size, data.len() as u64);
    assert_eq!(encode_stats.compressed_size, compressed.len() as u64);
    assert!(encode_stats.space_saving() > 0.0);

    let mut decoded = Vec::new();
    let (header, decode_stats) = decode_all(compressed.as_slice(), &mut decoded).unwrap();
    assert_eq!(decoded, data);
    assert_eq!(header.permissions, 0o751);
    assert_eq!(decode_stats.direction, Direction::Decompress);
    assert_eq!(decode_stats.uncompressed_size, encode_stats.uncompressed_size);
    assert_eq!(decode_stats.compressed_size, encode_stats.compressed_size);
}

#[test]
fn foreign_data_is_rejected() {
    let mut compressed = compress_to_vec(b"some data");
    compressed[3] = 0;
    assert!(matches!(
        decode_all_to_vec(&compressed),
        Err(DecompressError::ReadHeaderError(ReadHeaderError::BadMagicNumber(_)))
    ));
    assert!(matches!(
        decode_all_to_vec(b"PK\x03\x04 definitely not ours"),
        Err(DecompressError::ReadHeaderError(ReadHeaderError::BadMagicNumber(_)))
    ));
}

#[test]
fn trailing_padding_is_not_decoded() {
    // three one bit codes, followed by five bits of padding
    let data = vec![b'x'; 3];
    let compressed = compress_to_vec(&data);
    let decoded = decode_all_to_vec(&compressed).unwrap();
    assert_eq!(decoded.len(), 3);
}
