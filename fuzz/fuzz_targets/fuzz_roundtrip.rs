#![no_main]

use libfuzzer_sys::fuzz_target;
use rlekit::{compress, decompress, Codec, CodecConfig, ParallelCodec};

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        assert!(compress(data).is_err());
        return;
    }

    let compressed = compress(data).expect("non-empty input must compress");
    assert_eq!(decompress(&compressed).expect("decompress"), data);

    // Parallel scan must produce the same block sequence
    let codec = ParallelCodec::new(CodecConfig { num_threads: 4, min_chunk_size: 16, ..Default::default() });
    assert_eq!(codec.compress(data).expect("parallel compress"), compressed);
});
