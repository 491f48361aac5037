use thiserror::Error;

// Unified error type for julia-farm

#[derive(Error, Debug)]
pub enum FarmError {
    #[error("invalid dimensions {width}x{height}: both must be positive")]
    InvalidDimensions { width: usize, height: usize },
    #[error("invalid chunk size {chunk_size}: must be in 1..={height}")]
    InvalidChunkSize { chunk_size: usize, height: usize },
    #[error("need at least {required} ranks, got {size}")]
    InsufficientRanks { size: usize, required: usize },
    #[error("no such rank {dest} (communicator size {size})")]
    NoSuchRank { dest: usize, size: usize },
    #[error("rows {start}..{end} fall outside {first}..{limit}")]
    RowOutOfRange {
        start: usize,
        end: usize,
        first: usize,
        limit: usize,
    },
    #[error("row {0} written twice")]
    RowAlreadyWritten(usize),
    #[error("chunk at row {start_row} carries {pixels} pixels, expected {expected}")]
    RaggedChunk {
        start_row: usize,
        pixels: usize,
        expected: usize,
    },
    #[error("chunk at row {start_row} has {rows} rows, capacity is {capacity}")]
    ChunkTooLarge {
        start_row: usize,
        rows: usize,
        capacity: usize,
    },
    #[error("image incomplete: {written} of {height} rows written")]
    Incomplete { written: usize, height: usize },
    #[error("unexpected {kind} message from rank {from_rank}")]
    UnexpectedMessage { from_rank: usize, kind: &'static str },
    #[error("rank {rank}: channel disconnected")]
    Disconnected { rank: usize },
    #[error("rank {rank} panicked")]
    RankPanicked { rank: usize },
    #[error("frame error: {0}")]
    Codec(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Image(#[from] image::ImageError),
}
