//! Scheduling policies.
//!
//! - [`dynamic`]: pull-based dispatch; rank 0 coordinates, ranks `1..size` compute.
//! - [`static_split`]: fixed per-rank ranges, one result message per non-coordinator rank.
//! - [`serial`]: single-process reference renderer, no messages.
//!
//! [`run_rank`] is the common entry point every rank calls with the same
//! arguments; it returns the assembled image on the coordinator and `None`
//! elsewhere.

pub mod dynamic;
pub mod serial;
pub mod static_split;

use crate::config::{Dimensions, Policy};
use crate::core::traits::RowKernel;
use crate::error::FarmError;
use crate::parallel::Comm;
use crate::raster::ImageBuffer;

pub use dynamic::{run_coordinator, run_worker};
pub use serial::render_serial;
pub use static_split::{run_static_coordinator, run_static_worker};

/// Per-run scheduling counters collected by the coordinator.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScheduleStats {
    /// Result messages consumed from the inbox.
    pub results_received: usize,
    /// Sum of reported row counts over all consumed results.
    pub rows_received: usize,
    /// Rows rendered by the coordinator itself.
    pub rows_local: usize,
    /// Chunks contributed by each rank, index = rank.
    pub chunks_per_rank: Vec<usize>,
}

impl ScheduleStats {
    pub fn new(size: usize) -> Self {
        Self {
            chunks_per_rank: vec![0; size],
            ..Self::default()
        }
    }

    pub(crate) fn record_result(&mut self, source: usize, rows: usize) {
        self.results_received += 1;
        self.rows_received += rows;
        if let Some(c) = self.chunks_per_rank.get_mut(source) {
            *c += 1;
        }
    }

    pub(crate) fn record_local(&mut self, rank: usize, rows: usize) {
        self.rows_local += rows;
        if let Some(c) = self.chunks_per_rank.get_mut(rank) {
            *c += 1;
        }
    }
}

/// Coordinator output of a finished run.
#[derive(Clone, Debug)]
pub struct Rendered {
    pub image: ImageBuffer,
    pub stats: ScheduleStats,
}

/// Run this rank's part of `policy`.
///
/// Validation happens on every rank before any message is exchanged, so
/// invalid arguments make all ranks fail together.
pub fn run_rank<C, K>(
    comm: &C,
    kernel: &K,
    dims: Dimensions,
    policy: Policy,
) -> Result<Option<Rendered>, FarmError>
where
    C: Comm,
    K: RowKernel + Sync,
{
    policy.validate(&dims, comm.size())?;
    match (policy, comm.is_coordinator()) {
        (Policy::Dynamic { chunk_size }, true) => run_coordinator(comm, dims, chunk_size).map(Some),
        (Policy::Dynamic { chunk_size }, false) => {
            run_worker(comm, kernel, dims, chunk_size).map(|_| None)
        }
        (Policy::Static, true) => run_static_coordinator(comm, kernel, dims).map(Some),
        (Policy::Static, false) => run_static_worker(comm, kernel, dims).map(|_| None),
    }
}
