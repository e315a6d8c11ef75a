use crate::block::{Block, CompressedData};
use crate::error::{Error, Result};

/// Reject an empty block list before decoding
pub(crate) fn ensure_not_empty(data: &CompressedData) -> Result<()> {
    if data.is_empty() {
        return Err(Error::InvalidInput("compressed data contains no blocks"));
    }
    Ok(())
}

/// Allocate a zeroed output buffer sized exactly to the decoded length
pub(crate) fn allocate_output(data: &CompressedData) -> Result<Vec<u8>> {
    let total = data.decompressed_size();
    let mut out = Vec::new();
    out.try_reserve_exact(total)?;
    out.resize(total, 0);
    Ok(out)
}

/// Expand `blocks` back to back into `out`, whose length must equal the
/// sum of the block lengths
pub(crate) fn expand_blocks(blocks: &[Block], out: &mut [u8]) {
    let mut pos = 0;
    for block in blocks {
        let end = pos + block.length();
        block.expand_into(&mut out[pos..end]);
        pos = end;
    }
    debug_assert_eq!(pos, out.len());
}

/// Decode all blocks sequentially
pub fn expand(data: &CompressedData) -> Result<Vec<u8>> {
    ensure_not_empty(data)?;
    let mut out = allocate_output(data)?;
    expand_blocks(data.blocks(), &mut out);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand() {
        let data = CompressedData::from_blocks(vec![
            Block::literal(b"ab").unwrap(),
            Block::repeat(b'c', 4).unwrap(),
            Block::literal(b"d").unwrap(),
        ]);
        assert_eq!(expand(&data).unwrap(), b"abccccd");
    }

    #[test]
    fn test_expand_empty_fails() {
        let result = expand(&CompressedData::new());
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }
}
