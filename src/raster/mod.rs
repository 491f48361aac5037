//! Coordinator-owned output raster and its file writer.

pub mod bitmap;
pub mod buffer;

pub use bitmap::write_bitmap;
pub use buffer::{ImageBuffer, RowsMut};
