//! julia-farm: Julia set rendering by row farming over message-passing ranks
//!
//! This crate splits the rows of a raster among a fixed pool of ranks and
//! reassembles the results on rank 0. Two distribution policies are provided:
//! a pull-based dynamic scheduler that balances load across workers of unequal
//! speed, and a static partition that needs no negotiation at all. A serial
//! renderer serves as the reference both are checked against.

pub mod parallel;

pub mod config;
pub mod core;
pub mod error;
pub mod kernel;
pub mod launch;
pub mod policy;
pub mod raster;
pub mod schedule;

// Re-exports for convenience
pub use config::*;
pub use self::core::*;
pub use error::*;
pub use kernel::*;
pub use policy::*;
pub use raster::*;
pub use schedule::*;
