//! Row-range arithmetic shared by the scheduling policies.
//!
//! - [`cursor`]: `ChunkCursor`, the dynamic policy's claim pointer.
//! - [`partition`]: the static policy's per-rank ranges and receive capacity.

pub mod cursor;
pub mod partition;

pub use cursor::ChunkCursor;
pub use partition::{static_capacity, static_range};
