pub mod decode;
pub mod parallel;
pub mod scanner;
pub mod single;
pub mod verify;

pub use parallel::ParallelCodec;
pub use single::SingleThreadedCodec;
pub use verify::verify;
