//! On-disk layout for compressed block lists.
//!
//! Format (no magic, version or checksum):
//! - Block count: i32 (little-endian), must be positive
//! - For each block:
//!   - Control byte: bit 0 = kind, bits 1-7 = length - 1
//!   - Literal: `length` raw bytes
//!   - Repeat: 1 byte, the repeated value

pub mod constants;
pub mod reader;
pub mod writer;

pub use constants::*;
pub use reader::BlockReader;
pub use writer::BlockWriter;

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use log::{debug, warn};

use crate::block::CompressedData;
use crate::error::{Error, Result};

/// Serialize `data` to `writer`, returning the number of bytes written
pub fn write_to<W: Write>(data: &CompressedData, writer: W) -> Result<u64> {
    if data.is_empty() {
        return Err(Error::InvalidInput("compressed data contains no blocks"));
    }

    let mut block_writer = BlockWriter::new(writer);
    block_writer.write_all(data)?;
    let written = block_writer.bytes_written();
    block_writer.finish()?;
    Ok(written)
}

/// Deserialize a block list from `reader`
pub fn read_from<R: Read>(reader: R) -> Result<CompressedData> {
    BlockReader::new(reader).read_all()
}

/// Save `data` to the file at `path`, replacing any existing file
pub fn save<P: AsRef<Path>>(data: &CompressedData, path: P) -> Result<()> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(Error::InvalidInput("empty file path"));
    }
    if data.is_empty() {
        return Err(Error::InvalidInput("compressed data contains no blocks"));
    }

    let file = File::create(path)?;
    let written =
        write_or_remove(data, BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, file), path)?;
    debug!("saved {} blocks ({} bytes) to {}", data.block_count(), written, path.display());
    Ok(())
}

/// Write `data` to `writer`, which targets the file at `path`; a failed
/// write removes the partial file
fn write_or_remove<W: Write>(data: &CompressedData, writer: W, path: &Path) -> Result<u64> {
    match write_to(data, writer) {
        Ok(written) => Ok(written),
        Err(e) => {
            if let Err(remove_err) = std::fs::remove_file(path) {
                warn!("could not remove partial file {}: {}", path.display(), remove_err);
            }
            Err(e)
        }
    }
}

/// Load a block list from the file at `path`
pub fn load<P: AsRef<Path>>(path: P) -> Result<CompressedData> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let data = read_from(BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file))?;
    debug!("loaded {} blocks from {}", data.block_count(), path.display());
    Ok(data)
}
