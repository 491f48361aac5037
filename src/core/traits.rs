//! Core rendering traits for julia-farm.

use super::types::Rgb;

/// Row renderer: fills one raster row with pixel intensities.
///
/// Implementations must be pure: the same `(y, width, height)` always yields
/// the same pixels, whichever rank or policy calls it.
pub trait RowKernel {
    /// Render row `y` of a `width`×`height` raster into `out` (`out.len() == width`).
    fn render_row(&self, y: usize, width: usize, height: usize, out: &mut [Rgb]);

    /// Render rows `start..end` back to back into a fresh buffer.
    fn render_rows(&self, start: usize, end: usize, width: usize, height: usize) -> Vec<Rgb> {
        let mut pixels = vec![Rgb::default(); width * end.saturating_sub(start)];
        for (y, row) in (start..end).zip(pixels.chunks_mut(width.max(1))) {
            self.render_row(y, width, height, row);
        }
        pixels
    }
}

impl<K: RowKernel + ?Sized> RowKernel for &K {
    fn render_row(&self, y: usize, width: usize, height: usize, out: &mut [Rgb]) {
        (**self).render_row(y, width, height, out)
    }
}
