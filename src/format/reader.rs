use std::io::{self, Read};

use log::trace;

use super::constants::*;
use crate::block::{Block, CompressedData, ControlByte};
use crate::error::{Error, Result};

/// Reads blocks from the on-disk layout
pub struct BlockReader<R: Read> {
    reader: R,
    bytes_read: u64,
}

impl<R: Read> BlockReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, bytes_read: 0 }
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        match self.reader.read_exact(buf) {
            Ok(()) => {
                self.bytes_read += buf.len() as u64;
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Err(Error::UnexpectedEof),
            Err(e) => Err(Error::Io(e)),
        }
    }

    /// Read the block count header; non-positive counts are rejected
    pub fn read_count(&mut self) -> Result<usize> {
        let mut buf = [0u8; COUNT_SIZE];
        self.read_exact(&mut buf)?;

        let count = i32::from_le_bytes(buf);
        if count <= 0 {
            return Err(Error::MalformedCount(count));
        }
        Ok(count as usize)
    }

    /// Read one block: control byte, then 1 or `length` payload bytes
    pub fn read_block(&mut self) -> Result<Block> {
        let mut control = [0u8; 1];
        self.read_exact(&mut control)?;
        let control = ControlByte::from_raw(control[0]);

        let mut payload = Vec::new();
        payload.try_reserve_exact(control.payload_len())?;
        payload.resize(control.payload_len(), 0);
        self.read_exact(&mut payload)?;

        Block::from_control(control, payload)
    }

    /// Read a complete block list: the count header, then that many blocks.
    ///
    /// Bytes after the last block are left unread.
    pub fn read_all(&mut self) -> Result<CompressedData> {
        let count = self.read_count()?;
        trace!("reading {} blocks", count);

        let mut blocks = Vec::new();
        blocks.try_reserve_exact(count.min(MAX_PREALLOCATED_BLOCKS))?;
        for _ in 0..count {
            let block = self.read_block()?;
            blocks.try_reserve(1)?;
            blocks.push(block);
        }

        Ok(CompressedData::from_blocks(blocks))
    }

    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}
