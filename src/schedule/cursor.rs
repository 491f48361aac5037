//! Dynamic dispatch cursor.

use crate::core::types::WorkAssignment;

/// Hands out consecutive `chunk_size`-row assignments until `height` is covered.
///
/// Every row in `0..height` is claimed exactly once. Once exhausted the cursor
/// stays at `height`, which is also the sentinel start row sent to workers.
#[derive(Clone, Debug)]
pub struct ChunkCursor {
    next_start: usize,
    chunk_size: usize,
    height: usize,
    issued: usize,
}

impl ChunkCursor {
    pub fn new(height: usize, chunk_size: usize) -> Self {
        Self {
            next_start: 0,
            chunk_size: chunk_size.max(1),
            height,
            issued: 0,
        }
    }

    /// Claim the next unclaimed chunk.
    pub fn next_assignment(&mut self) -> Option<WorkAssignment> {
        let assignment = WorkAssignment::dynamic(self.next_start, self.chunk_size, self.height)?;
        self.next_start = assignment.end_row;
        self.issued += 1;
        Some(assignment)
    }

    /// Start row of the next claim; `height` once exhausted.
    pub fn next_start(&self) -> usize {
        self.next_start
    }

    /// Number of chunks a full run dispatches: `ceil(height / chunk_size)`.
    pub fn chunk_count(&self) -> usize {
        self.height.div_ceil(self.chunk_size)
    }

    /// Chunks claimed so far.
    pub fn issued(&self) -> usize {
        self.issued
    }

    pub fn is_exhausted(&self) -> bool {
        self.next_start >= self.height
    }

    pub fn height(&self) -> usize {
        self.height
    }
}

impl Iterator for ChunkCursor {
    type Item = WorkAssignment;

    fn next(&mut self) -> Option<WorkAssignment> {
        self.next_assignment()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_chunk_is_short() {
        let ranges: Vec<_> = ChunkCursor::new(5, 2).map(|a| a.range()).collect();
        assert_eq!(ranges, vec![0..2, 2..4, 4..5]);
    }

    #[test]
    fn chunk_count_is_ceiling() {
        assert_eq!(ChunkCursor::new(5, 2).chunk_count(), 3);
        assert_eq!(ChunkCursor::new(4, 2).chunk_count(), 2);
        assert_eq!(ChunkCursor::new(7, 7).chunk_count(), 1);
        assert_eq!(ChunkCursor::new(7, 1).chunk_count(), 7);
    }

    #[test]
    fn exhausted_cursor_stays_at_height() {
        let mut c = ChunkCursor::new(3, 2);
        assert!(c.next_assignment().is_some());
        assert!(c.next_assignment().is_some());
        assert!(c.is_exhausted());
        assert_eq!(c.next_assignment(), None);
        assert_eq!(c.next_start(), 3);
        assert_eq!(c.issued(), c.chunk_count());
    }

    #[test]
    fn covers_every_row_once() {
        for height in 1..40 {
            for chunk in 1..=height {
                let mut seen = vec![0u8; height];
                for a in ChunkCursor::new(height, chunk) {
                    assert!(a.rows() <= chunk);
                    for y in a.range() {
                        seen[y] += 1;
                    }
                }
                assert!(seen.iter().all(|&s| s == 1), "height {height} chunk {chunk}");
            }
        }
    }
}
