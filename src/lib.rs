pub mod block;
pub mod codec;
pub mod error;
pub mod format;

pub use block::{Block, BlockKind, CompressedData, CompressionStats, ControlByte, MAX_BLOCK_LEN};
pub use codec::{verify, ParallelCodec, SingleThreadedCodec};
pub use error::{Error, Result};
pub use format::{load, read_from, save, write_to};

/// Configuration for the codec
#[derive(Clone, Debug)]
pub struct CodecConfig {
    /// Number of threads for parallel compression/decompression (0 = auto, 1 = single-threaded)
    pub num_threads: usize,
    /// Smallest input (or decoded output) handed to a single worker
    pub min_chunk_size: usize,
    /// Buffer size for I/O operations
    pub buffer_size: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            num_threads: 0,
            min_chunk_size: 256 * 1024,
            buffer_size: format::DEFAULT_BUFFER_SIZE,
        }
    }
}

/// Trait for the compress/decompress pair
pub trait Codec {
    /// Compress a non-empty byte slice into blocks
    fn compress(&self, input: &[u8]) -> Result<CompressedData>;

    /// Expand blocks back into the original bytes
    fn decompress(&self, data: &CompressedData) -> Result<Vec<u8>>;
}

/// Create the codec matching `config.num_threads`
pub fn codec_for(config: &CodecConfig) -> Box<dyn Codec> {
    if config.num_threads == 1 {
        Box::new(SingleThreadedCodec::new())
    } else {
        Box::new(ParallelCodec::new(config.clone()))
    }
}

/// Compress `input` on the current thread
pub fn compress(input: &[u8]) -> Result<CompressedData> {
    SingleThreadedCodec.compress(input)
}

/// Decompress `data` on the current thread
pub fn decompress(data: &CompressedData) -> Result<Vec<u8>> {
    SingleThreadedCodec.decompress(data)
}

/// Bytes `data` occupies on disk, excluding the 4-byte block count
pub fn compressed_size(data: &CompressedData) -> usize {
    data.compressed_size()
}
