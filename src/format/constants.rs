/// Size of the block count header (i32, little-endian)
pub const COUNT_SIZE: usize = 4;

/// Upper bound on blocks reserved up front when loading; larger files grow
/// the block list as blocks are actually read
pub const MAX_PREALLOCATED_BLOCKS: usize = 1 << 16;

/// Default buffer size for file I/O
pub const DEFAULT_BUFFER_SIZE: usize = 128 * 1024;
