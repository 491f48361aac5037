//! Numeric kernels that turn a row index into pixel intensities.

pub mod julia;

pub use julia::JuliaKernel;
