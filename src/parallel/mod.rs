//! Point-to-point message passing between ranks.
//!
//! The `Comm` trait is the only transport the scheduling policies see: send a
//! message to one rank, or block until the next message from any rank arrives.
//! Receive-from-any is what lets the dynamic coordinator serve a fixed worker
//! pool through a single inbox without polling each worker in turn.
//!
//! Backends:
//! - [`LocalComm`]: one thread per rank in a single process, built on channels.
//! - `MpiComm` (feature `mpi`): the MPI world communicator; messages travel as
//!   [`frame`]-encoded byte vectors.

use crate::core::types::ResultChunk;
use crate::error::FarmError;

pub mod frame;
pub mod local_comm;
pub use local_comm::LocalComm;

#[cfg(feature = "mpi")]
pub mod mpi_comm;
#[cfg(feature = "mpi")]
pub use mpi_comm::MpiComm;

pub use crate::config::options::COORDINATOR;

/// Protocol messages. Row offsets travel in these explicit header fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Message {
    /// Coordinator → worker: compute the chunk starting at `start_row`.
    /// A `start_row` at or past the image height is the stop sentinel.
    Assign { start_row: usize },
    /// Worker → coordinator: rendered rows.
    Result(ResultChunk),
}

impl Message {
    /// Stop sentinel for an image of `height` rows.
    pub fn sentinel(height: usize) -> Self {
        Message::Assign { start_row: height }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Message::Assign { .. } => "assign",
            Message::Result(_) => "result",
        }
    }
}

/// A received message together with the rank that sent it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Envelope {
    pub source: usize,
    pub message: Message,
}

pub trait Comm {
    fn rank(&self) -> usize;
    fn size(&self) -> usize;
    /// Send `message` to rank `dest`.
    fn send(&self, dest: usize, message: Message) -> Result<(), FarmError>;
    /// Block until a message from any rank arrives. No timeout.
    fn recv_any(&self) -> Result<Envelope, FarmError>;

    fn is_coordinator(&self) -> bool {
        self.rank() == COORDINATOR
    }
}

impl<C: Comm + ?Sized> Comm for &C {
    fn rank(&self) -> usize {
        (**self).rank()
    }
    fn size(&self) -> usize {
        (**self).size()
    }
    fn send(&self, dest: usize, message: Message) -> Result<(), FarmError> {
        (**self).send(dest, message)
    }
    fn recv_any(&self) -> Result<Envelope, FarmError> {
        (**self).recv_any()
    }
}
