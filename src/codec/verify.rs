use super::decode;
use crate::block::CompressedData;
use crate::error::{Error, Result};

/// Check that `data` decodes back to `original`.
///
/// Sizes are compared first (no decoding needed), then the CRC32 of the
/// decoded bytes against the CRC32 of the original.
pub fn verify(original: &[u8], data: &CompressedData) -> Result<()> {
    let expected_size = original.len() as u64;
    let found_size = data.decompressed_size() as u64;
    if expected_size != found_size {
        return Err(Error::SizeMismatch { expected: expected_size, found: found_size });
    }

    let decoded = decode::expand(data)?;
    let expected = crc32fast::hash(original);
    let found = crc32fast::hash(&decoded);
    if expected != found {
        return Err(Error::Crc32Mismatch { expected, found });
    }

    Ok(())
}
