pub mod traits;
pub mod types;

pub use traits::RowKernel;
pub use types::{ResultChunk, Rgb, WorkAssignment};
