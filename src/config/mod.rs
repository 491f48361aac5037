//! Run configuration: raster dimensions, scheduling policy and kernel constants.
//!
//! Modules:
//! - [`options`]: `Dimensions` and `Policy`, validated against the communicator size.
//! - [`kernel_params`]: `KernelParams`, the named constants of the Julia kernel.

pub mod kernel_params;
pub mod options;

pub use kernel_params::KernelParams;
pub use options::{Dimensions, Policy};
