pub mod bitstream;
pub mod codec;
pub mod ec;
pub mod error;
pub mod iter;
pub mod mask;
pub mod matrix;
pub mod metadata;
