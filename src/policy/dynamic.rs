//! Pull-based dynamic scheduling.
//!
//! The coordinator seeds every worker with one chunk, then loops once per
//! chunk in the image: take the next result from any worker, place it by its
//! start row, and answer that same worker with the next unclaimed chunk or the
//! stop sentinel. Fast workers come back sooner and so receive more chunks.
//!
//! There are no timeouts. A worker that never answers stalls the coordinator.

use log::{debug, info, trace};

use super::{Rendered, ScheduleStats};
use crate::config::Dimensions;
use crate::config::options::COORDINATOR;
use crate::core::traits::RowKernel;
use crate::core::types::{ResultChunk, WorkAssignment};
use crate::error::FarmError;
use crate::parallel::{Comm, Envelope, Message};
use crate::raster::ImageBuffer;
use crate::schedule::ChunkCursor;

/// Next message for a worker: the next unclaimed chunk, or the sentinel.
fn next_message(cursor: &mut ChunkCursor) -> Message {
    match cursor.next_assignment() {
        Some(a) => Message::Assign {
            start_row: a.start_row,
        },
        None => Message::sentinel(cursor.height()),
    }
}

/// Rank 0 side of the dynamic policy. Ranks `1..size` must run [`run_worker`].
pub fn run_coordinator<C: Comm>(
    comm: &C,
    dims: Dimensions,
    chunk_size: usize,
) -> Result<Rendered, FarmError> {
    let size = comm.size();
    if size < 2 {
        return Err(FarmError::InsufficientRanks { size, required: 2 });
    }
    let mut image = ImageBuffer::new(dims.width, dims.height);
    let mut cursor = ChunkCursor::new(dims.height, chunk_size);
    let mut stats = ScheduleStats::new(size);
    let expected = cursor.chunk_count();
    info!(
        "dynamic: {}x{} rows in {} chunks of {} across {} workers",
        dims.width,
        dims.height,
        expected,
        chunk_size,
        size - 1
    );

    for worker in 1..size {
        let msg = next_message(&mut cursor);
        debug!("initial {:?} -> rank {}", msg, worker);
        comm.send(worker, msg)?;
    }

    for _ in 0..expected {
        let Envelope { source, message } = comm.recv_any()?;
        let chunk = match message {
            Message::Result(chunk) => chunk,
            other => {
                return Err(FarmError::UnexpectedMessage {
                    from_rank: source,
                    kind: other.kind(),
                });
            }
        };
        if chunk.row_count > chunk_size {
            return Err(FarmError::ChunkTooLarge {
                start_row: chunk.start_row,
                rows: chunk.row_count,
                capacity: chunk_size,
            });
        }
        image.write_chunk(&chunk)?;
        stats.record_result(source, chunk.row_count);
        debug!(
            "rows {}..{} from rank {}",
            chunk.start_row,
            chunk.end_row(),
            source
        );

        let reply = next_message(&mut cursor);
        trace!("reply {:?} -> rank {}", reply, source);
        comm.send(source, reply)?;
    }

    image.ensure_complete()?;
    info!(
        "dynamic: {} results, chunks per rank {:?}",
        stats.results_received, stats.chunks_per_rank
    );
    Ok(Rendered { image, stats })
}

/// Worker side of the dynamic policy. Returns the number of chunks computed.
///
/// Loops until the coordinator sends a start row at or past the image height.
pub fn run_worker<C, K>(
    comm: &C,
    kernel: &K,
    dims: Dimensions,
    chunk_size: usize,
) -> Result<usize, FarmError>
where
    C: Comm,
    K: RowKernel + ?Sized,
{
    let mut chunks = 0;
    loop {
        let Envelope { source, message } = comm.recv_any()?;
        let start_row = match message {
            Message::Assign { start_row } if source == COORDINATOR => start_row,
            other => {
                return Err(FarmError::UnexpectedMessage {
                    from_rank: source,
                    kind: other.kind(),
                });
            }
        };
        let Some(assignment) = WorkAssignment::dynamic(start_row, chunk_size, dims.height) else {
            break;
        };
        trace!("rank {} computing rows {:?}", comm.rank(), assignment.range());
        let pixels = kernel.render_rows(
            assignment.start_row,
            assignment.end_row,
            dims.width,
            dims.height,
        );
        comm.send(
            COORDINATOR,
            Message::Result(ResultChunk::new(
                assignment.start_row,
                assignment.rows(),
                pixels,
            )),
        )?;
        chunks += 1;
    }
    debug!("rank {} stopping after {} chunks", comm.rank(), chunks);
    Ok(chunks)
}
