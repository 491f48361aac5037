//! Single-process reference renderer.
//!
//! Produces the same raster as the distributed policies without any message
//! passing. With `threads > 1` (and the `rayon` feature) rows are rendered on
//! a dedicated rayon pool; `threads == 0` means one thread per CPU.

use log::info;

use crate::core::traits::RowKernel;
use crate::core::types::{ResultChunk, Rgb};
use crate::error::FarmError;
use crate::raster::ImageBuffer;

#[cfg(feature = "rayon")]
fn render_pooled<K: RowKernel + Sync + ?Sized>(
    kernel: &K,
    width: usize,
    height: usize,
    pixels: &mut [Rgb],
    threads: usize,
) -> Result<(), FarmError> {
    use rayon::prelude::*;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| FarmError::Transport(e.to_string()))?;
    pool.install(|| {
        pixels
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| kernel.render_row(y, width, height, row));
    });
    Ok(())
}

#[cfg(not(feature = "rayon"))]
fn render_pooled<K: RowKernel + Sync + ?Sized>(
    kernel: &K,
    width: usize,
    height: usize,
    pixels: &mut [Rgb],
    _threads: usize,
) -> Result<(), FarmError> {
    render_sequential(kernel, width, height, pixels);
    Ok(())
}

/// Render the whole `width`×`height` raster in this process.
pub fn render_serial<K>(
    kernel: &K,
    width: usize,
    height: usize,
    threads: usize,
) -> Result<ImageBuffer, FarmError>
where
    K: RowKernel + Sync + ?Sized,
{
    if width == 0 || height == 0 {
        return Err(FarmError::InvalidDimensions { width, height });
    }
    let threads = if threads == 0 { num_cpus::get() } else { threads };
    info!("serial: {}x{} on {} thread(s)", width, height, threads);

    let mut pixels = vec![Rgb::default(); width * height];
    if threads > 1 {
        render_pooled(kernel, width, height, &mut pixels, threads)?;
    } else {
        render_sequential(kernel, width, height, &mut pixels);
    }

    let mut image = ImageBuffer::new(width, height);
    image.write_chunk(&ResultChunk::new(0, height, pixels))?;
    Ok(image)
}

fn render_sequential<K: RowKernel + ?Sized>(
    kernel: &K,
    width: usize,
    height: usize,
    pixels: &mut [Rgb],
) {
    for (y, row) in pixels.chunks_mut(width).enumerate() {
        kernel.render_row(y, width, height, row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::JuliaKernel;

    #[test]
    fn pooled_matches_sequential() {
        let k = JuliaKernel::<f32>::default();
        let one = render_serial(&k, 24, 17, 1).unwrap();
        let many = render_serial(&k, 24, 17, 4).unwrap();
        assert!(one.is_complete());
        assert_eq!(one.pixels(), many.pixels());
    }

    #[test]
    fn zero_size_rejected() {
        let k = JuliaKernel::<f32>::default();
        assert!(render_serial(&k, 0, 3, 1).is_err());
    }
}
