use log::debug;

use super::{decode, scanner};
use crate::block::CompressedData;
use crate::error::{Error, Result};
use crate::Codec;

/// Single-threaded codec implementation
#[derive(Clone, Copy, Debug, Default)]
pub struct SingleThreadedCodec;

impl SingleThreadedCodec {
    pub fn new() -> Self {
        Self
    }
}

impl Codec for SingleThreadedCodec {
    fn compress(&self, input: &[u8]) -> Result<CompressedData> {
        if input.is_empty() {
            return Err(Error::InvalidInput("cannot compress empty input"));
        }

        let data = scanner::scan(input)?;
        debug!(
            "compressed {} bytes into {} blocks ({} bytes)",
            input.len(),
            data.block_count(),
            data.compressed_size()
        );
        Ok(data)
    }

    fn decompress(&self, data: &CompressedData) -> Result<Vec<u8>> {
        let out = decode::expand(data)?;
        debug!("decompressed {} blocks into {} bytes", data.block_count(), out.len());
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockKind;

    #[test]
    fn test_empty_input() {
        let codec = SingleThreadedCodec::new();
        assert!(matches!(codec.compress(&[]), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_roundtrip() {
        let codec = SingleThreadedCodec::new();
        let input = b"Hello, Woooooorld!!";
        let data = codec.compress(input).unwrap();
        assert_eq!(codec.decompress(&data).unwrap(), input);
    }

    #[test]
    fn test_repeat_preference() {
        let data = SingleThreadedCodec.compress(b"aa").unwrap();
        assert_eq!(data.block_count(), 1);
        assert_eq!(data.blocks()[0].kind(), BlockKind::Repeat);
        assert_eq!(data.blocks()[0].length(), 2);
    }
}
