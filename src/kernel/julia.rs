//! Escape-time Julia set kernel.
//!
//! Each column `x` of row `y` is mapped into the viewport of [`KernelParams`] and
//! iterated under `z ← z² + c` until `|z|` reaches the escape radius or the
//! iteration cap is hit. The iteration count `t` becomes a gray intensity
//! `floor(255·t/max_iter)`.
//!
//! Arithmetic runs in `T` (single precision by default). The kernel holds no
//! state besides its parameters, so every rank produces bit-identical rows.

use num_traits::{AsPrimitive, Float};

use crate::config::KernelParams;
use crate::core::traits::RowKernel;
use crate::core::types::Rgb;

/// Julia set renderer over floating point type `T`.
#[derive(Clone, Copy, Debug)]
pub struct JuliaKernel<T = f32> {
    pub params: KernelParams<T>,
}

impl<T> JuliaKernel<T>
where
    T: Float + 'static,
    usize: AsPrimitive<T>,
{
    pub fn new(params: KernelParams<T>) -> Self {
        Self { params }
    }

    /// Starting point `z0` of pixel `(x, y)`.
    pub fn point(&self, x: usize, y: usize, width: usize, height: usize) -> (T, T) {
        let p = &self.params;
        let dx = p.x_span / width.as_();
        let dy = p.y_span / height.as_();
        (p.x_min + x.as_() * dx, p.y_min + y.as_() * dy)
    }

    /// Iterations until `z0 = (re, im)` escapes, capped at `max_iter`.
    pub fn escape_time(&self, re: T, im: T) -> u32 {
        let p = &self.params;
        let two = T::one() + T::one();
        let (mut zr, mut zi) = (re, im);
        let mut t = 0;
        while zr.hypot(zi) < p.escape_radius && t < p.max_iter {
            let next_re = zr * zr - zi * zi + p.c_re;
            zi = two * zr * zi + p.c_im;
            zr = next_re;
            t += 1;
        }
        t
    }

    /// Gray level of an escape time: `floor(255·t/max_iter)`.
    pub fn intensity(&self, t: u32) -> u8 {
        if self.params.max_iter == 0 {
            return 0;
        }
        (255 * u64::from(t) / u64::from(self.params.max_iter)) as u8
    }
}

impl Default for JuliaKernel<f32> {
    fn default() -> Self {
        Self::new(KernelParams::default())
    }
}

impl Default for JuliaKernel<f64> {
    fn default() -> Self {
        Self::new(KernelParams::default())
    }
}

impl<T> RowKernel for JuliaKernel<T>
where
    T: Float + 'static,
    usize: AsPrimitive<T>,
{
    fn render_row(&self, y: usize, width: usize, height: usize, out: &mut [Rgb]) {
        debug_assert_eq!(out.len(), width);
        for (x, px) in out.iter_mut().enumerate() {
            let (re, im) = self.point(x, y, width, height);
            *px = Rgb::gray(self.intensity(self.escape_time(re, im)));
        }
    }
}
