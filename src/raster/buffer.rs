//! Row-addressed image buffer.
//!
//! `ImageBuffer` stores `height` rows of `width` pixels plus a per-row written
//! flag. Rows are placed by the start row carried in each result, never by
//! arrival order, and each row may be written only once. `split_at_row` hands
//! out two disjoint mutable views so a coordinator can render its own share
//! while another task places incoming results.

use crate::core::types::{ResultChunk, Rgb};
use crate::error::FarmError;

#[derive(Clone, Debug)]
pub struct ImageBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
    written: Vec<bool>,
}

impl ImageBuffer {
    /// Reserve an empty `width`×`height` raster.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb::default(); width * height],
            written: vec![false; height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of rows written so far.
    pub fn rows_written(&self) -> usize {
        self.written.iter().filter(|&&w| w).count()
    }

    pub fn is_row_written(&self, y: usize) -> bool {
        self.written.get(y).copied().unwrap_or(false)
    }

    pub fn is_complete(&self) -> bool {
        self.written.iter().all(|&w| w)
    }

    /// Error unless every row has been written.
    pub fn ensure_complete(&self) -> Result<(), FarmError> {
        if self.is_complete() {
            Ok(())
        } else {
            Err(FarmError::Incomplete {
                written: self.rows_written(),
                height: self.height,
            })
        }
    }

    /// Place a result chunk at its start row.
    pub fn write_chunk(&mut self, chunk: &ResultChunk) -> Result<(), FarmError> {
        self.view_mut().write_chunk(chunk)
    }

    /// Mutable view over the whole raster.
    pub fn view_mut(&mut self) -> RowsMut<'_> {
        RowsMut {
            width: self.width,
            first_row: 0,
            pixels: &mut self.pixels,
            written: &mut self.written,
        }
    }

    /// Split into views over rows `0..row` and `row..height`.
    pub fn split_at_row(&mut self, row: usize) -> (RowsMut<'_>, RowsMut<'_>) {
        let row = row.min(self.height);
        let (top_px, bottom_px) = self.pixels.split_at_mut(row * self.width);
        let (top_w, bottom_w) = self.written.split_at_mut(row);
        (
            RowsMut {
                width: self.width,
                first_row: 0,
                pixels: top_px,
                written: top_w,
            },
            RowsMut {
                width: self.width,
                first_row: row,
                pixels: bottom_px,
                written: bottom_w,
            },
        )
    }

    pub fn row(&self, y: usize) -> Option<&[Rgb]> {
        if y >= self.height {
            return None;
        }
        Some(&self.pixels[y * self.width..(y + 1) * self.width])
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Row-major `r, g, b` bytes, top row first.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| [p.r, p.g, p.b]).collect()
    }
}

/// Mutable window over rows `first_row..first_row + len` of an [`ImageBuffer`].
#[derive(Debug)]
pub struct RowsMut<'a> {
    width: usize,
    first_row: usize,
    pixels: &'a mut [Rgb],
    written: &'a mut [bool],
}

impl RowsMut<'_> {
    pub fn first_row(&self) -> usize {
        self.first_row
    }

    /// One past the last row of this view.
    pub fn end_row(&self) -> usize {
        self.first_row + self.written.len()
    }

    /// Check `start..end` lies in the view and is still unwritten; returns local offsets.
    fn claim(&self, start: usize, end: usize) -> Result<(usize, usize), FarmError> {
        if start < self.first_row || end > self.end_row() || start > end {
            return Err(FarmError::RowOutOfRange {
                start,
                end,
                first: self.first_row,
                limit: self.end_row(),
            });
        }
        let (lo, hi) = (start - self.first_row, end - self.first_row);
        if let Some(dup) = self.written[lo..hi].iter().position(|&w| w) {
            return Err(FarmError::RowAlreadyWritten(start + dup));
        }
        Ok((lo, hi))
    }

    /// Copy a result chunk into place, using its reported row count.
    pub fn write_chunk(&mut self, chunk: &ResultChunk) -> Result<(), FarmError> {
        let expected = chunk.row_count * self.width;
        if chunk.pixels.len() != expected {
            return Err(FarmError::RaggedChunk {
                start_row: chunk.start_row,
                pixels: chunk.pixels.len(),
                expected,
            });
        }
        let (lo, hi) = self.claim(chunk.start_row, chunk.end_row())?;
        self.pixels[lo * self.width..hi * self.width].copy_from_slice(&chunk.pixels);
        self.written[lo..hi].fill(true);
        Ok(())
    }

    /// Render rows `start..end` in place, one row at a time, with `f(y, row)`.
    pub fn fill_rows<F>(&mut self, start: usize, end: usize, mut f: F) -> Result<(), FarmError>
    where
        F: FnMut(usize, &mut [Rgb]),
    {
        let (lo, hi) = self.claim(start, end)?;
        for local in lo..hi {
            let row = &mut self.pixels[local * self.width..(local + 1) * self.width];
            f(self.first_row + local, row);
            self.written[local] = true;
        }
        Ok(())
    }
}
