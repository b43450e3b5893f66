mod byte_slice;
mod read;

pub use byte_slice::*;
pub use read::*;
