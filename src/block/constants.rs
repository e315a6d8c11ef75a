/// Maximum number of source bytes a single block can represent
pub const MAX_BLOCK_LEN: usize = 128;

/// Kind bit in the control byte (bit 0)
pub const KIND_MASK: u8 = 0x01;

/// Shift applied to `length - 1` in the control byte (bits 1-7)
pub const LENGTH_SHIFT: u32 = 1;

/// Serialized size of the control byte
pub const CONTROL_SIZE: usize = 1;

/// Serialized size of a repeat block (control byte + repeated value)
pub const REPEAT_ENCODED_SIZE: usize = CONTROL_SIZE + 1;
