use super::control::BlockKind;
use super::model::Block;
use crate::error::{Error, Result};
use crate::format::COUNT_SIZE;

/// Summary of a compressed representation
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompressionStats {
    /// Bytes represented by all blocks (the original input size)
    pub input_bytes: u64,
    /// Serialized block bytes, excluding the block count header
    pub compressed_bytes: u64,
    pub literal_blocks: u64,
    pub repeat_blocks: u64,
}

impl CompressionStats {
    /// Compressed size relative to the input (lower is better)
    pub fn ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            return 0.0;
        }
        self.compressed_bytes as f64 / self.input_bytes as f64
    }

    pub fn total_blocks(&self) -> u64 {
        self.literal_blocks + self.repeat_blocks
    }
}

/// Compressed form of a byte sequence: an ordered list of blocks whose
/// expansions, concatenated, reproduce the original input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompressedData {
    blocks: Vec<Block>,
}

impl CompressedData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing block sequence
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    /// Append a block, failing if the block list cannot grow
    pub fn push(&mut self, block: Block) -> Result<()> {
        self.blocks.try_reserve(1)?;
        self.blocks.push(block);
        Ok(())
    }

    /// Append all blocks of `other`, preserving order
    pub fn append(&mut self, other: &mut CompressedData) -> Result<()> {
        self.blocks.try_reserve(other.blocks.len())?;
        self.blocks.append(&mut other.blocks);
        Ok(())
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }

    /// Bytes the blocks would occupy on disk, excluding the count header
    pub fn compressed_size(&self) -> usize {
        self.blocks.iter().map(Block::encoded_size).sum()
    }

    /// Full serialized size, including the 4-byte block count
    pub fn serialized_size(&self) -> usize {
        COUNT_SIZE + self.compressed_size()
    }

    /// Total number of bytes the blocks expand to
    pub fn decompressed_size(&self) -> usize {
        self.blocks.iter().map(Block::length).sum()
    }

    /// Block count as stored in the file header
    pub(crate) fn stored_count(&self) -> Result<i32> {
        i32::try_from(self.blocks.len())
            .map_err(|_| Error::InvalidInput("too many blocks for a 32-bit block count"))
    }

    pub fn stats(&self) -> CompressionStats {
        let mut stats = CompressionStats::default();
        for block in &self.blocks {
            stats.input_bytes += block.length() as u64;
            stats.compressed_bytes += block.encoded_size() as u64;
            match block.kind() {
                BlockKind::Literal => stats.literal_blocks += 1,
                BlockKind::Repeat => stats.repeat_blocks += 1,
            }
        }
        stats
    }
}

impl<'a> IntoIterator for &'a CompressedData {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}
