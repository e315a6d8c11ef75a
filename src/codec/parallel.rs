//! Parallel codec built on crossbeam scoped threads.
//!
//! Compression:
//! - Input is cut into chunks at safe boundaries (see [`scanner::safe_boundary`])
//! - Each chunk is scanned on its own thread
//! - Chunk results are concatenated in input order, giving exactly the
//!   block sequence of a sequential scan
//!
//! Decompression:
//! - Blocks are grouped into runs of roughly equal decoded size
//! - The output buffer is split into one disjoint slice per group
//! - Each group is expanded into its slice on its own thread

use std::ops::Range;

use log::debug;

use super::single::SingleThreadedCodec;
use super::{decode, scanner};
use crate::block::{Block, CompressedData};
use crate::error::{Error, Result};
use crate::{Codec, CodecConfig};

/// A contiguous run of blocks and the number of bytes it decodes to
struct BlockGroup {
    range: Range<usize>,
    output_len: usize,
}

/// Parallel codec implementation
pub struct ParallelCodec {
    config: CodecConfig,
}

impl ParallelCodec {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    fn effective_threads(&self) -> usize {
        match self.config.num_threads {
            0 => num_cpus::get().clamp(1, 32),
            n => n.clamp(1, 32),
        }
    }

    /// Inputs below this size are handled on the current thread
    fn parallel_threshold(&self) -> usize {
        self.config.min_chunk_size.saturating_mul(2)
    }

    fn chunk_size(&self, total: usize, num_threads: usize) -> usize {
        (total / num_threads).max(self.config.min_chunk_size).max(1)
    }

    /// Cut `input` into chunk ranges that start at safe boundaries
    fn split_input(&self, input: &[u8], num_threads: usize) -> Vec<Range<usize>> {
        let chunk = self.chunk_size(input.len(), num_threads);
        let mut ranges = Vec::with_capacity(num_threads);
        let mut start = 0;

        while start + chunk < input.len() {
            match scanner::safe_boundary(input, start + chunk) {
                Some(boundary) => {
                    ranges.push(start..boundary);
                    start = boundary;
                }
                None => break,
            }
        }
        ranges.push(start..input.len());
        ranges
    }

    /// Group blocks so each group decodes to roughly `target` bytes
    fn group_blocks(blocks: &[Block], target: usize) -> Vec<BlockGroup> {
        let mut groups = Vec::new();
        let mut start = 0;
        let mut output_len = 0;

        for (i, block) in blocks.iter().enumerate() {
            output_len += block.length();
            if output_len >= target {
                groups.push(BlockGroup { range: start..i + 1, output_len });
                start = i + 1;
                output_len = 0;
            }
        }
        if start < blocks.len() {
            groups.push(BlockGroup { range: start..blocks.len(), output_len });
        }
        groups
    }

    fn compress_parallel(&self, input: &[u8], ranges: &[Range<usize>]) -> Result<CompressedData> {
        let result = crossbeam::scope(|scope| -> Result<CompressedData> {
            let handles: Vec<_> = ranges
                .iter()
                .map(|range| {
                    let chunk = &input[range.clone()];
                    scope.spawn(move |_| scanner::scan(chunk))
                })
                .collect();

            // Join in input order so blocks stay in sequence
            let mut data = CompressedData::new();
            for handle in handles {
                let mut part = handle
                    .join()
                    .map_err(|_| Error::Internal("Worker thread panicked".to_string()))??;
                data.append(&mut part)?;
            }
            Ok(data)
        });

        result.map_err(|_| Error::Internal("Thread panicked".to_string()))?
    }

    fn decompress_parallel(
        &self,
        data: &CompressedData,
        groups: &[BlockGroup],
    ) -> Result<Vec<u8>> {
        let mut out = decode::allocate_output(data)?;
        let blocks = data.blocks();

        crossbeam::scope(|scope| {
            let mut rest: &mut [u8] = &mut out;
            for group in groups {
                let (head, tail) = std::mem::take(&mut rest).split_at_mut(group.output_len);
                rest = tail;
                let group_blocks = &blocks[group.range.clone()];
                scope.spawn(move |_| decode::expand_blocks(group_blocks, head));
            }
        })
        .map_err(|_| Error::Internal("Thread panicked".to_string()))?;

        Ok(out)
    }
}

impl Codec for ParallelCodec {
    fn compress(&self, input: &[u8]) -> Result<CompressedData> {
        let num_threads = self.effective_threads();

        // For single thread or small inputs, delegate to the sequential scan
        if num_threads == 1 || input.len() < self.parallel_threshold() {
            return SingleThreadedCodec.compress(input);
        }

        let ranges = self.split_input(input, num_threads);
        if ranges.len() == 1 {
            debug!("no safe boundary found, compressing {} bytes sequentially", input.len());
            return SingleThreadedCodec.compress(input);
        }

        debug!("compressing {} bytes in {} chunks", input.len(), ranges.len());
        self.compress_parallel(input, &ranges)
    }

    fn decompress(&self, data: &CompressedData) -> Result<Vec<u8>> {
        decode::ensure_not_empty(data)?;

        let num_threads = self.effective_threads();
        let total = data.decompressed_size();
        if num_threads == 1 || total < self.parallel_threshold() {
            return SingleThreadedCodec.decompress(data);
        }

        let groups = Self::group_blocks(data.blocks(), self.chunk_size(total, num_threads));
        debug!("decompressing {} blocks in {} groups", data.block_count(), groups.len());
        self.decompress_parallel(data, &groups)
    }
}
