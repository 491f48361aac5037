//! Named constants of the Julia kernel.

use num_traits::Float;

/// Viewport, fixed complex constant and iteration limits for `z ← z² + c`.
///
/// Column `x` of row `y` maps to
/// `(x_min + x·x_span/width) + (y_min + y·y_span/height)·i`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KernelParams<T> {
    pub x_min: T,
    pub x_span: T,
    pub y_min: T,
    pub y_span: T,
    /// Real part of `c`.
    pub c_re: T,
    /// Imaginary part of `c`.
    pub c_im: T,
    /// Iteration stops once `|z|` reaches this value.
    pub escape_radius: T,
    pub max_iter: u32,
}

macro_rules! default_params {
    ($t:ty) => {
        impl Default for KernelParams<$t> {
            fn default() -> Self {
                Self {
                    x_min: -1.5,
                    x_span: 3.0,
                    y_min: -1.0,
                    y_span: 2.0,
                    c_re: -0.7,
                    c_im: 0.26,
                    escape_radius: 4.0,
                    max_iter: 1000,
                }
            }
        }
    };
}

default_params!(f32);
default_params!(f64);

impl<T: Float> KernelParams<T> {
    /// Same viewport and constant, different iteration cap.
    pub fn with_max_iter(self, max_iter: u32) -> Self {
        Self { max_iter, ..self }
    }
}
