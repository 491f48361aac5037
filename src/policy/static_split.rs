//! Static partitioning: every rank derives its own rows from its rank index.
//!
//! Non-coordinator ranks render their range and send a single result. The
//! coordinator renders its own range (which always starts at row 0) on a
//! scoped thread while the calling thread drains exactly `size - 1` results
//! into the rest of the buffer. Both finish before the image is checked.

use std::thread;

use log::{debug, info};

use super::{Rendered, ScheduleStats};
use crate::config::Dimensions;
use crate::config::options::COORDINATOR;
use crate::core::traits::RowKernel;
use crate::core::types::ResultChunk;
use crate::error::FarmError;
use crate::parallel::{Comm, Envelope, Message};
use crate::raster::{ImageBuffer, RowsMut};
use crate::schedule::{static_capacity, static_range};

/// Non-coordinator side: render this rank's range and send it to rank 0.
pub fn run_static_worker<C, K>(comm: &C, kernel: &K, dims: Dimensions) -> Result<(), FarmError>
where
    C: Comm,
    K: RowKernel + ?Sized,
{
    let range = static_range(comm.rank(), comm.size(), dims.height);
    debug!("rank {} rendering rows {:?}", comm.rank(), range.range());
    let pixels = kernel.render_rows(range.start_row, range.end_row, dims.width, dims.height);
    comm.send(
        COORDINATOR,
        Message::Result(ResultChunk::new(range.start_row, range.rows(), pixels)),
    )
}

/// Receive `count` results and place each by its start row.
fn drain_results<C: Comm>(
    comm: &C,
    rows: &mut RowsMut<'_>,
    count: usize,
    capacity: usize,
    stats: &mut ScheduleStats,
) -> Result<(), FarmError> {
    for _ in 0..count {
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
        if chunk.row_count > capacity {
            return Err(FarmError::ChunkTooLarge {
                start_row: chunk.start_row,
                rows: chunk.row_count,
                capacity,
            });
        }
        rows.write_chunk(&chunk)?;
        stats.record_result(source, chunk.row_count);
        debug!(
            "rows {}..{} from rank {}",
            chunk.start_row,
            chunk.end_row(),
            source
        );
    }
    Ok(())
}

/// Rank 0 side: render the local share while collecting every other rank's share.
pub fn run_static_coordinator<C, K>(
    comm: &C,
    kernel: &K,
    dims: Dimensions,
) -> Result<Rendered, FarmError>
where
    C: Comm,
    K: RowKernel + Sync + ?Sized,
{
    let size = comm.size();
    let local = static_range(COORDINATOR, size, dims.height);
    let capacity = static_capacity(size, dims.height);
    let mut image = ImageBuffer::new(dims.width, dims.height);
    let mut stats = ScheduleStats::new(size);
    info!(
        "static: {}x{} over {} ranks, at most {} rows each",
        dims.width, dims.height, size, capacity
    );

    let (mut own, mut remote) = image.split_at_row(local.end_row);
    thread::scope(|s| {
        let render = s.spawn(move || {
            own.fill_rows(local.start_row, local.end_row, |y, row| {
                kernel.render_row(y, dims.width, dims.height, row)
            })
        });
        let drained = drain_results(comm, &mut remote, size - 1, capacity, &mut stats);
        let rendered = render
            .join()
            .map_err(|_| FarmError::RankPanicked { rank: COORDINATOR })?;
        rendered.and(drained)
    })?;
    stats.record_local(COORDINATOR, local.rows());

    image.ensure_complete()?;
    info!(
        "static: {} remote rows, {} local rows",
        stats.rows_received, stats.rows_local
    );
    Ok(Rendered { image, stats })
}
