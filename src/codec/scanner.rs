//! Greedy run scanner.
//!
//! Walks the input left to right and cuts it into blocks:
//! - two or more equal adjacent bytes form a run, emitted as repeat blocks
//!   of at most 128 bytes each
//! - everything else is gathered into literal blocks, stopping right before
//!   the next run or after 128 bytes
//!
//! The scan is memoryless: the block emitted at a position depends only on
//! the bytes from that position onwards. The parallel codec relies on this
//! to split the input at [`safe_boundary`] positions.

use log::trace;

use crate::block::{Block, CompressedData, MAX_BLOCK_LEN};
use crate::error::Result;

/// Length of the run of bytes equal to `input[start]`, starting at `start`
fn run_length(input: &[u8], start: usize) -> usize {
    let value = input[start];
    input[start..].iter().take_while(|&&b| b == value).count()
}

/// Length of the literal span starting at `start`, capped at [`MAX_BLOCK_LEN`]
fn literal_length(input: &[u8], start: usize) -> usize {
    let limit = (start + MAX_BLOCK_LEN).min(input.len());
    let mut end = start;
    while end < limit {
        if end + 1 < input.len() && input[end] == input[end + 1] {
            break;
        }
        end += 1;
    }
    end - start
}

/// Scan `input` and append its blocks to `out`
pub fn scan_into(input: &[u8], out: &mut CompressedData) -> Result<()> {
    let mut pos = 0;

    while pos < input.len() {
        let run = run_length(input, pos);

        if run >= 2 {
            let value = input[pos];
            let mut remaining = run;
            while remaining > 0 {
                let length = remaining.min(MAX_BLOCK_LEN);
                out.push(Block::repeat(value, length)?)?;
                remaining -= length;
            }
            trace!("repeat run of {} x 0x{:02x} at {}", run, value, pos);
            pos += run;
        } else {
            let length = literal_length(input, pos);
            out.push(Block::literal(&input[pos..pos + length])?)?;
            trace!("literal span of {} at {}", length, pos);
            pos += length;
        }
    }

    Ok(())
}

/// Scan `input` into a fresh block list
pub fn scan(input: &[u8]) -> Result<CompressedData> {
    let mut data = CompressedData::new();
    scan_into(input, &mut data)?;
    Ok(data)
}

/// Find the first position `p >= from` where the scan is guaranteed to
/// start a new block no matter where scanning began.
///
/// Such a position directly follows the end of a run of two or more bytes
/// (`input[p-2] == input[p-1] != input[p]`). Runs are always emitted whole
/// from their first byte, so a block boundary falls exactly at `p`.
pub fn safe_boundary(input: &[u8], from: usize) -> Option<usize> {
    let start = from.max(2);
    (start..input.len()).find(|&p| input[p - 2] == input[p - 1] && input[p - 1] != input[p])
}
