//! End-to-end integration tests for rlekit.
//!
//! Tests compression, decompression and persistence with synthetic data.

use std::io::Cursor;
use std::process::Command;

use rlekit::{
    compress, compressed_size, decompress, load, read_from, save, verify, write_to, BlockKind,
    Codec, CodecConfig, CompressedData, Error, ParallelCodec, SingleThreadedCodec, MAX_BLOCK_LEN,
};

// ============================================================================
// Test Data Generators
// ============================================================================

/// Generate random data using a simple PRNG
fn generate_random_data(size: usize, seed: u64) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);
    let mut state = seed;
    for _ in 0..size {
        // Simple xorshift PRNG
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        data.push((state & 0xFF) as u8);
    }
    data
}

/// Generate data made of runs with pseudo-random lengths (1-300) and values
fn generate_run_data(size: usize, seed: u64) -> Vec<u8> {
    let lengths = generate_random_data(size, seed);
    let values = generate_random_data(size, seed.wrapping_mul(31).wrapping_add(7));
    let mut data = Vec::with_capacity(size);
    let mut i = 0;
    while data.len() < size {
        let run = 1 + (lengths[i % size] as usize * 300) / 256;
        data.extend(std::iter::repeat(values[i % size]).take(run));
        i += 1;
    }
    data.truncate(size);
    data
}

/// Generate data with mixed patterns
fn generate_mixed_data(size: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);
    let patterns = [
        b"ACGTACGTACGTACGT".as_slice(),
        b"NNNNNNNNNNNNNNNN".as_slice(),
        b"ATATATATATATATAT".as_slice(),
    ];

    let mut pattern_idx = 0;
    while data.len() < size {
        let pattern = patterns[pattern_idx % patterns.len()];
        let remaining = size - data.len();
        let chunk_size = remaining.min(pattern.len());
        data.extend_from_slice(&pattern[..chunk_size]);
        pattern_idx += 1;
    }
    data
}

/// The text used by the reference demo program
fn demo_text() -> Vec<u8> {
    let mut text = b"ababbbbbb".to_vec();
    text.extend(std::iter::repeat(b'c').take(136));
    text.extend_from_slice(b"adddeeffff");
    text
}

fn kinds_and_lengths(data: &CompressedData) -> Vec<(BlockKind, usize)> {
    data.iter().map(|b| (b.kind(), b.length())).collect()
}

fn parallel_codec(num_threads: usize) -> ParallelCodec {
    ParallelCodec::new(CodecConfig { num_threads, min_chunk_size: 1024, ..Default::default() })
}

// ============================================================================
// Round-Trip Tests
// ============================================================================

#[test]
fn test_roundtrip_small_inputs() {
    let inputs: [&[u8]; 7] =
        [b"a", b"aa", b"ab", b"aab", b"abb", b"Hello, World!", b"\x00\x00\x00\xff\xff\x00"];
    for input in inputs {
        let data = compress(input).unwrap();
        assert_eq!(decompress(&data).unwrap(), input, "input {:?}", input);
    }
}

#[test]
fn test_roundtrip_random() {
    for seed in [1, 12345, 99999] {
        let input = generate_random_data(50_000, seed);
        let data = compress(&input).unwrap();
        assert_eq!(decompress(&data).unwrap(), input);
    }
}

#[test]
fn test_roundtrip_runs() {
    let input = generate_run_data(100_000, 42);
    let data = compress(&input).unwrap();
    assert_eq!(decompress(&data).unwrap(), input);
    assert!(compressed_size(&data) < input.len());
}

#[test]
fn test_roundtrip_mixed() {
    let input = generate_mixed_data(30_000);
    let data = compress(&input).unwrap();
    assert_eq!(decompress(&data).unwrap(), input);
}

#[test]
fn test_block_lengths_bounded() {
    for input in [generate_random_data(20_000, 7), generate_run_data(20_000, 7)] {
        let data = compress(&input).unwrap();
        for block in &data {
            assert!((1..=MAX_BLOCK_LEN).contains(&block.length()));
            match block.kind() {
                BlockKind::Literal => assert_eq!(block.payload().len(), block.length()),
                BlockKind::Repeat => assert_eq!(block.payload().len(), 1),
            }
        }
    }
}

// ============================================================================
// Block Sequence Tests
// ============================================================================

#[test]
fn test_pair_is_single_repeat() {
    let data = compress(b"aa").unwrap();
    assert_eq!(kinds_and_lengths(&data), vec![(BlockKind::Repeat, 2)]);
}

#[test]
fn test_run_of_128() {
    let data = compress(&[b'x'; 128]).unwrap();
    assert_eq!(kinds_and_lengths(&data), vec![(BlockKind::Repeat, 128)]);
}

#[test]
fn test_run_of_129() {
    let data = compress(&[b'x'; 129]).unwrap();
    assert_eq!(kinds_and_lengths(&data), vec![(BlockKind::Repeat, 128), (BlockKind::Repeat, 1)]);
}

#[test]
fn test_demo_text() {
    let text = demo_text();
    assert_eq!(text.len(), 155);

    let data = compress(&text).unwrap();
    assert_eq!(
        kinds_and_lengths(&data),
        vec![
            (BlockKind::Literal, 3),
            (BlockKind::Repeat, 6),
            (BlockKind::Repeat, 128),
            (BlockKind::Repeat, 8),
            (BlockKind::Literal, 1),
            (BlockKind::Repeat, 3),
            (BlockKind::Repeat, 2),
            (BlockKind::Repeat, 4),
        ]
    );
    assert_eq!(compressed_size(&data), 18);
    assert_eq!(data.blocks()[0].payload(), b"aba");

    // Deterministic across runs
    for _ in 0..5 {
        assert_eq!(compress(&text).unwrap(), data);
    }
}

#[test]
fn test_compressed_size_matches_written_bytes() {
    for input in [demo_text(), generate_random_data(10_000, 3), generate_run_data(10_000, 3)] {
        let data = compress(&input).unwrap();
        let mut buf = Vec::new();
        let written = write_to(&data, &mut buf).unwrap();
        assert_eq!(written as usize, buf.len());
        assert_eq!(buf.len() - 4, compressed_size(&data));
    }
}

// ============================================================================
// Failure Tests
// ============================================================================

#[test]
fn test_compress_empty() {
    assert!(matches!(compress(&[]), Err(Error::InvalidInput(_))));
    assert!(matches!(parallel_codec(4).compress(&[]), Err(Error::InvalidInput(_))));
}

#[test]
fn test_decompress_empty() {
    assert!(matches!(decompress(&CompressedData::new()), Err(Error::InvalidInput(_))));
}

#[test]
fn test_load_nonexistent() {
    assert!(matches!(load("/nonexistent/rlekit/test.rle"), Err(Error::Io(_))));
}

#[test]
fn test_load_malformed_count() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.rle");
    std::fs::write(&path, (-1i32).to_le_bytes()).unwrap();
    assert!(matches!(load(&path), Err(Error::MalformedCount(-1))));
}

#[test]
fn test_load_truncated_file() {
    let data = compress(&demo_text()).unwrap();
    let mut buf = Vec::new();
    write_to(&data, &mut buf).unwrap();

    for cut in [3, 5, buf.len() - 1] {
        let result = read_from(Cursor::new(&buf[..cut]));
        assert!(matches!(result, Err(Error::UnexpectedEof)), "cut at {}", cut);
    }
}

// ============================================================================
// Persistence Tests
// ============================================================================

#[test]
fn test_save_load_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.rle");

    let text = demo_text();
    let data = compress(&text).unwrap();
    save(&data, &path).unwrap();

    let file_len = std::fs::metadata(&path).unwrap().len() as usize;
    assert_eq!(file_len, 4 + compressed_size(&data));

    let loaded = load(&path).unwrap();
    assert_eq!(loaded, data);
    assert_eq!(decompress(&loaded).unwrap(), text);
}

#[test]
fn test_save_load_large() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("large.rle");

    let input = generate_run_data(500_000, 2024);
    let data = compress(&input).unwrap();
    save(&data, &path).unwrap();

    let loaded = load(&path).unwrap();
    assert_eq!(decompress(&loaded).unwrap(), input);
}

#[test]
fn test_save_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("over.rle");

    save(&compress(&generate_random_data(5000, 1)).unwrap(), &path).unwrap();
    let small = compress(b"zz").unwrap();
    save(&small, &path).unwrap();

    assert_eq!(std::fs::read(&path).unwrap(), vec![0x01, 0x00, 0x00, 0x00, 0x03, b'z']);
    assert_eq!(load(&path).unwrap(), small);
}

#[test]
fn test_file_layout_is_little_endian() {
    let input = generate_random_data(300 * MAX_BLOCK_LEN, 5);
    let data = compress(&input).unwrap();
    let mut buf = Vec::new();
    write_to(&data, &mut buf).unwrap();

    let count = i32::from_le_bytes(buf[0..4].try_into().unwrap());
    assert_eq!(count as usize, data.block_count());
    assert!(data.block_count() > 255);
}

// ============================================================================
// Parallel Codec Tests
// ============================================================================

#[test]
fn test_parallel_matches_single() {
    let single = SingleThreadedCodec::new();
    for input in [
        generate_run_data(200_000, 11),
        generate_random_data(200_000, 11),
        generate_mixed_data(200_000),
    ] {
        let expected = single.compress(&input).unwrap();
        for threads in [2, 3, 8] {
            let codec = parallel_codec(threads);
            let data = codec.compress(&input).unwrap();
            assert_eq!(data, expected, "{} threads", threads);
            assert_eq!(codec.decompress(&data).unwrap(), input);
        }
    }
}

#[test]
fn test_parallel_single_thread_delegates() {
    let input = generate_run_data(50_000, 9);
    let codec = parallel_codec(1);
    let data = codec.compress(&input).unwrap();
    assert_eq!(data, compress(&input).unwrap());
    assert_eq!(codec.decompress(&data).unwrap(), input);
}

#[test]
fn test_codec_for_config() {
    let input = generate_run_data(100_000, 77);
    for num_threads in [0, 1, 4] {
        let config = CodecConfig { num_threads, min_chunk_size: 4096, ..Default::default() };
        let codec = rlekit::codec_for(&config);
        let data = codec.compress(&input).unwrap();
        assert_eq!(codec.decompress(&data).unwrap(), input);
    }
}

// ============================================================================
// Verification Tests
// ============================================================================

#[test]
fn test_verify_roundtrip() {
    let input = generate_mixed_data(10_000);
    let data = compress(&input).unwrap();
    verify(&input, &data).unwrap();

    let other = compress(&generate_mixed_data(10_001)).unwrap();
    assert!(matches!(verify(&input, &other), Err(Error::SizeMismatch { .. })));
}

// ============================================================================
// Binary CLI Tests (if binary is built)
// ============================================================================

#[test]
#[ignore] // Run with --ignored flag when binary is available
fn test_cli_compress_verify() {
    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("input.txt");
    let rle_path = dir.path().join("input.rle");
    std::fs::write(&input_path, demo_text()).unwrap();

    let output = Command::new("cargo")
        .args(["run", "--bin", "rlekit", "--", "compress", "-i"])
        .arg(&input_path)
        .arg("-o")
        .arg(&rle_path)
        .output()
        .expect("Failed to run CLI");
    assert!(output.status.success(), "compress should succeed");

    let output = Command::new("cargo")
        .args(["run", "--bin", "rlekit", "--", "verify", "-i"])
        .arg(&input_path)
        .arg("-c")
        .arg(&rle_path)
        .output()
        .expect("Failed to run CLI");
    assert!(output.status.success(), "verify should return 0");
}
