//! Command-line or API options for a render run.
//!
//! `Dimensions` fixes the raster size for the whole run; `Policy` selects how
//! rows are distributed across ranks. Both are validated on every rank before
//! any message is exchanged, so an invalid run fails everywhere without
//! touching the transport.

use crate::error::FarmError;

/// Rank that owns the image buffer and drives the schedule.
pub const COORDINATOR: usize = 0;

/// Raster size, `width` columns by `height` rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions {
    pub width: usize,
    pub height: usize,
}

impl Dimensions {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn validate(&self) -> Result<(), FarmError> {
        if self.width == 0 || self.height == 0 {
            return Err(FarmError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Total pixel count.
    pub fn pixels(&self) -> usize {
        self.width * self.height
    }
}

/// Work distribution policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Policy {
    /// Pull-based: rank 0 hands out `chunk_size` rows at a time to ranks `1..size`.
    Dynamic { chunk_size: usize },
    /// Fixed split: every rank, rank 0 included, renders `floor(r·n/p)..floor((r+1)·n/p)`.
    Static,
}

impl Policy {
    /// Smallest communicator this policy can run on.
    pub fn min_ranks(&self) -> usize {
        match self {
            Policy::Dynamic { .. } => 2,
            Policy::Static => 1,
        }
    }

    /// Check the policy against the raster and the communicator size.
    pub fn validate(&self, dims: &Dimensions, size: usize) -> Result<(), FarmError> {
        dims.validate()?;
        if let Policy::Dynamic { chunk_size } = *self {
            if chunk_size == 0 || chunk_size > dims.height {
                return Err(FarmError::InvalidChunkSize {
                    chunk_size,
                    height: dims.height,
                });
            }
        }
        let required = self.min_ranks();
        if size < required {
            return Err(FarmError::InsufficientRanks { size, required });
        }
        Ok(())
    }

    pub fn name(&self) -> &'static str {
        match self {
            Policy::Dynamic { .. } => "dynamic",
            Policy::Static => "static",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_dimension_rejected() {
        assert!(matches!(
            Dimensions::new(0, 4).validate(),
            Err(FarmError::InvalidDimensions { width: 0, height: 4 })
        ));
        assert!(Dimensions::new(4, 0).validate().is_err());
        assert!(Dimensions::new(1, 1).validate().is_ok());
    }

    #[test]
    fn chunk_size_bounded_by_height() {
        let dims = Dimensions::new(8, 5);
        assert!(Policy::Dynamic { chunk_size: 5 }.validate(&dims, 2).is_ok());
        assert!(matches!(
            Policy::Dynamic { chunk_size: 6 }.validate(&dims, 2),
            Err(FarmError::InvalidChunkSize { chunk_size: 6, height: 5 })
        ));
        assert!(Policy::Dynamic { chunk_size: 0 }.validate(&dims, 2).is_err());
    }

    #[test]
    fn dynamic_needs_a_worker() {
        let dims = Dimensions::new(4, 4);
        assert!(matches!(
            Policy::Dynamic { chunk_size: 2 }.validate(&dims, 1),
            Err(FarmError::InsufficientRanks { size: 1, required: 2 })
        ));
        assert!(Policy::Static.validate(&dims, 1).is_ok());
    }
}
