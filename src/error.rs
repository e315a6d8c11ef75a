use std::collections::TryReserveError;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Input errors
    #[error("Invalid input: {0}")]
    InvalidInput(&'static str),

    #[error("Invalid block length: {0} (must be 1-128)")]
    InvalidBlockLength(usize),

    // Allocation errors
    #[error("Allocation failure: {0}")]
    AllocationFailure(#[from] TryReserveError),

    // File format errors
    #[error("Malformed block count: {0} (must be positive)")]
    MalformedCount(i32),

    #[error("Unexpected end of input")]
    UnexpectedEof,

    // Verification errors
    #[error("CRC32 mismatch: expected 0x{expected:08x}, got 0x{found:08x}")]
    Crc32Mismatch { expected: u32, found: u32 },

    #[error("Size mismatch: expected {expected} bytes, got {found}")]
    SizeMismatch { expected: u64, found: u64 },

    // Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;
