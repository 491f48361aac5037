//! Plain data exchanged between ranks.

use std::ops::Range;

/// One 24-bit pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Same intensity on all three channels.
    pub const fn gray(v: u8) -> Self {
        Self { r: v, g: v, b: v }
    }
}

/// Half-open row interval owned by exactly one rank while it is computed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorkAssignment {
    pub start_row: usize,
    pub end_row: usize,
}

impl WorkAssignment {
    /// Dynamic-policy assignment starting at `start_row`: `chunk_size` rows clamped
    /// to `height`. `None` when `start_row` is the sentinel (`>= height`).
    pub fn dynamic(start_row: usize, chunk_size: usize, height: usize) -> Option<Self> {
        if start_row >= height {
            return None;
        }
        Some(Self {
            start_row,
            end_row: start_row.saturating_add(chunk_size).min(height),
        })
    }

    pub fn rows(&self) -> usize {
        self.end_row - self.start_row
    }

    pub fn is_empty(&self) -> bool {
        self.end_row <= self.start_row
    }

    pub fn range(&self) -> Range<usize> {
        self.start_row..self.end_row
    }
}

/// Rendered rows returned by a worker: `row_count` rows of pixels starting at `start_row`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultChunk {
    pub start_row: usize,
    pub row_count: usize,
    pub pixels: Vec<Rgb>,
}

impl ResultChunk {
    pub fn new(start_row: usize, row_count: usize, pixels: Vec<Rgb>) -> Self {
        Self {
            start_row,
            row_count,
            pixels,
        }
    }

    pub fn end_row(&self) -> usize {
        self.start_row + self.row_count
    }
}
