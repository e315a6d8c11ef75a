use std::io::Write;

use crate::block::{Block, CompressedData};
use crate::error::Result;

/// Writes blocks in the on-disk layout
pub struct BlockWriter<W: Write> {
    writer: W,
    bytes_written: u64,
}

impl<W: Write> BlockWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, bytes_written: 0 }
    }

    /// Write the block count header (i32 LE)
    pub fn write_count(&mut self, count: i32) -> Result<()> {
        self.writer.write_all(&count.to_le_bytes())?;
        self.bytes_written += 4;
        Ok(())
    }

    /// Write one block: control byte, then its payload
    pub fn write_block(&mut self, block: &Block) -> Result<()> {
        self.writer.write_all(&[block.control_byte().raw()])?;
        self.writer.write_all(block.payload())?;
        self.bytes_written += block.encoded_size() as u64;
        Ok(())
    }

    /// Write the count header followed by every block
    pub fn write_all(&mut self, data: &CompressedData) -> Result<()> {
        self.write_count(data.stored_count()?)?;
        for block in data {
            self.write_block(block)?;
        }
        Ok(())
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Flush and finish writing
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }

    /// Get a reference to the inner writer
    pub fn get_ref(&self) -> &W {
        &self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_layout() {
        let data = CompressedData::from_blocks(vec![
            Block::literal(b"ab").unwrap(),
            Block::repeat(b'c', 5).unwrap(),
        ]);

        let mut writer = BlockWriter::new(Vec::new());
        writer.write_all(&data).unwrap();
        assert_eq!(writer.bytes_written(), 4 + 3 + 2);
        let output = writer.finish().unwrap();

        assert_eq!(
            output,
            vec![
                0x02, 0x00, 0x00, 0x00, // block count = 2
                0x02, b'a', b'b', // literal, length 2
                0x09, b'c', // repeat, length 5
            ]
        );
    }

    #[test]
    fn test_bytes_written_matches_compressed_size() {
        let data = CompressedData::from_blocks(vec![
            Block::repeat(0, 128).unwrap(),
            Block::literal(&[1, 2, 3, 4, 5, 6, 7]).unwrap(),
            Block::repeat(0, 1).unwrap(),
        ]);

        let mut writer = BlockWriter::new(Vec::new());
        writer.write_all(&data).unwrap();
        assert_eq!(writer.get_ref().len() as u64, writer.bytes_written());
        assert_eq!(writer.bytes_written() as usize, 4 + data.compressed_size());
    }
}
