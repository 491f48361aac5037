//! Static row partitioning.
//!
//! Rank `r` of `p` owns `floor(r·n/p)..floor((r+1)·n/p)`. The bounds are
//! computed in widened integer arithmetic, so consecutive ranks meet exactly
//! and the last range ends at `n`.

use crate::core::types::WorkAssignment;

/// Row range owned by `rank` out of `size` ranks over `height` rows.
pub fn static_range(rank: usize, size: usize, height: usize) -> WorkAssignment {
    let bound = |r: usize| -> usize {
        if size == 0 {
            return 0;
        }
        (r as u128 * height as u128 / size as u128) as usize
    };
    WorkAssignment {
        start_row: bound(rank),
        end_row: bound(rank + 1),
    }
}

/// Largest range any rank can own: `ceil(height / size)`.
///
/// The coordinator rejects any static result chunk larger than this.
pub fn static_capacity(size: usize, height: usize) -> usize {
    height.div_ceil(size.max(1))
}
