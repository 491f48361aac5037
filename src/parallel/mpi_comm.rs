//! MPI-based parallel communication module.
//!
//! This module provides an implementation of the `Comm` trait on top of the MPI
//! world communicator, for running each rank as its own process under
//! `mpirun`. It is only available when the `mpi` feature is enabled.
//!
//! Messages are sent as byte vectors in the [`frame`](super::frame) layout;
//! the MPI tag is left at its default and carries no payload. Receives use
//! `MPI_ANY_SOURCE` and report the sender from the returned status.
//!
//! # Example
//! ```no_run
//! # #[cfg(feature = "mpi")]
//! # fn main() -> Result<(), julia_farm::FarmError> {
//! use julia_farm::parallel::{Comm, MpiComm};
//! let comm = MpiComm::new()?;
//! println!("Rank: {} / {}", comm.rank(), comm.size());
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "mpi"))]
//! # fn main() {}
//! ```

use mpi::environment::Universe;
use mpi::topology::SimpleCommunicator;
use mpi::traits::*;

use super::{frame, Comm, Envelope, Message};
use crate::error::FarmError;

/// MPI communicator wrapper for distributed parallelism.
///
/// Holds the world communicator and the universe that keeps MPI initialized;
/// MPI is finalized when this value is dropped.
pub struct MpiComm {
    /// The MPI world communicator (all processes in the job).
    world: SimpleCommunicator,
    /// The rank (ID) of this process within the communicator.
    rank: usize,
    /// The total number of processes in the communicator.
    size: usize,
    _universe: Universe,
}

impl MpiComm {
    /// Initializes MPI and constructs a new `MpiComm`.
    ///
    /// Fails if MPI was already initialized in this process.
    pub fn new() -> Result<Self, FarmError> {
        let universe = mpi::initialize()
            .ok_or_else(|| FarmError::Transport("MPI already initialized".into()))?;
        let world = universe.world();
        let rank = world.rank() as usize;
        let size = world.size() as usize;
        Ok(MpiComm {
            world,
            rank,
            size,
            _universe: universe,
        })
    }
}

impl Comm for MpiComm {
    fn rank(&self) -> usize {
        self.rank
    }

    fn size(&self) -> usize {
        self.size
    }

    /// Blocking standard-mode send of one framed message.
    fn send(&self, dest: usize, message: Message) -> Result<(), FarmError> {
        if dest >= self.size || dest == self.rank {
            return Err(FarmError::NoSuchRank {
                dest,
                size: self.size,
            });
        }
        let bytes = frame::encode(&message);
        self.world.process_at_rank(dest as i32).send(&bytes[..]);
        Ok(())
    }

    /// Receives the next frame from any source; the length comes from the probed status.
    fn recv_any(&self) -> Result<Envelope, FarmError> {
        let (bytes, status) = self.world.any_process().receive_vec::<u8>();
        let message = frame::decode(&bytes)?;
        Ok(Envelope {
            source: status.source_rank() as usize,
            message,
        })
    }
}
