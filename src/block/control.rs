//! Control byte packing.
//!
//! Each block starts with one control byte:
//! - bit 0: kind (0 = literal, 1 = repeat)
//! - bits 1-7: `length - 1`, so the stored range 0-127 covers lengths 1-128
//!
//! All 256 byte values decode to a valid kind/length pair.

use super::constants::*;
use crate::error::{Error, Result};

/// Kind of data a block carries
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BlockKind {
    /// Raw bytes stored verbatim
    Literal = 0,
    /// One byte value repeated `length` times
    Repeat = 1,
}

impl BlockKind {
    fn from_bit(bit: u8) -> Self {
        if bit & KIND_MASK == 0 {
            Self::Literal
        } else {
            Self::Repeat
        }
    }
}

/// A packed control byte
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControlByte(u8);

impl ControlByte {
    /// Pack a kind and a length (1-128) into a control byte
    pub fn new(kind: BlockKind, length: usize) -> Result<Self> {
        if length == 0 || length > MAX_BLOCK_LEN {
            return Err(Error::InvalidBlockLength(length));
        }
        let stored = ((length - 1) as u8) << LENGTH_SHIFT;
        Ok(Self(stored | kind as u8))
    }

    /// Wrap a raw byte read from a stream
    pub fn from_raw(raw: u8) -> Self {
        Self(raw)
    }

    /// The raw packed value
    pub fn raw(&self) -> u8 {
        self.0
    }

    pub fn kind(&self) -> BlockKind {
        BlockKind::from_bit(self.0)
    }

    /// Number of source bytes the block represents (1-128)
    pub fn length(&self) -> usize {
        ((self.0 >> LENGTH_SHIFT) as usize) + 1
    }

    /// Number of payload bytes following the control byte
    pub fn payload_len(&self) -> usize {
        match self.kind() {
            BlockKind::Literal => self.length(),
            BlockKind::Repeat => 1,
        }
    }
}
