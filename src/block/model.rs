use std::fmt;

use super::constants::*;
use super::control::{BlockKind, ControlByte};
use crate::error::{Error, Result};

/// A single unit of the compressed stream.
///
/// Blocks can only be built through the validating constructors, so the
/// payload always agrees with the kind and length: one byte for a repeat,
/// `length` bytes for a literal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    kind: BlockKind,
    length: u8,
    payload: Vec<u8>,
}

impl Block {
    /// Create a literal block from 1-128 raw bytes
    pub fn literal(bytes: &[u8]) -> Result<Self> {
        Self::check_length(bytes.len())?;
        let mut payload = Vec::new();
        payload.try_reserve_exact(bytes.len())?;
        payload.extend_from_slice(bytes);
        Ok(Self { kind: BlockKind::Literal, length: bytes.len() as u8, payload })
    }

    /// Create a repeat block of `value` repeated `length` (1-128) times
    pub fn repeat(value: u8, length: usize) -> Result<Self> {
        Self::check_length(length)?;
        Ok(Self { kind: BlockKind::Repeat, length: length as u8, payload: vec![value] })
    }

    /// Rebuild a block from a decoded control byte and its payload
    pub fn from_control(control: ControlByte, payload: Vec<u8>) -> Result<Self> {
        if payload.len() != control.payload_len() {
            return Err(Error::Internal(format!(
                "payload of {} bytes does not match control byte 0x{:02x}",
                payload.len(),
                control.raw()
            )));
        }
        Ok(Self { kind: control.kind(), length: control.length() as u8, payload })
    }

    fn check_length(length: usize) -> Result<()> {
        if length == 0 || length > MAX_BLOCK_LEN {
            return Err(Error::InvalidBlockLength(length));
        }
        Ok(())
    }

    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    /// Number of source bytes this block represents (1-128)
    pub fn length(&self) -> usize {
        self.length as usize
    }

    /// Stored bytes: the literal run, or the single repeated value
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn is_repeat(&self) -> bool {
        self.kind == BlockKind::Repeat
    }

    /// The packed control byte written ahead of the payload
    pub fn control_byte(&self) -> ControlByte {
        // length is validated on construction
        ControlByte::from_raw(((self.length - 1) << LENGTH_SHIFT) | self.kind as u8)
    }

    /// Serialized size: control byte plus payload
    pub fn encoded_size(&self) -> usize {
        match self.kind {
            BlockKind::Literal => CONTROL_SIZE + self.length(),
            BlockKind::Repeat => REPEAT_ENCODED_SIZE,
        }
    }

    /// Write this block's expansion into `out`, which must be exactly `length()` bytes
    pub fn expand_into(&self, out: &mut [u8]) {
        match self.kind {
            BlockKind::Literal => out.copy_from_slice(&self.payload),
            BlockKind::Repeat => out.fill(self.payload[0]),
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            BlockKind::Literal => write!(
                f,
                "RAW block of {} bytes '{}'",
                self.length(),
                self.payload.escape_ascii()
            ),
            BlockKind::Repeat => write!(
                f,
                "RLE block of {} copies of '{}'",
                self.length(),
                [self.payload[0]].escape_ascii()
            ),
        }
    }
}
