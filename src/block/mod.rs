pub mod constants;
pub mod control;
pub mod data;
pub mod model;

pub use constants::*;
pub use control::{BlockKind, ControlByte};
pub use data::{CompressedData, CompressionStats};
pub use model::Block;
