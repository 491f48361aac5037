//! Tests for the pull-based dynamic scheduler.
//!
//! These tests run the coordinator and its workers as threads over `LocalComm`
//! and check the protocol itself: which assignments are issued, how many
//! results the coordinator consumes, that every row is computed exactly once,
//! and that faster workers end up with more chunks.

use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use julia_farm::parallel::{Comm, Envelope, LocalComm, Message};
use julia_farm::{
    Dimensions, FarmError, JuliaKernel, Policy, RowKernel, Rgb, render_serial, run_coordinator,
    run_rank,
};
use rand::Rng;

/// Wraps a communicator and logs every message it sends as `(from, to, message)`.
struct Recording<'a> {
    inner: &'a LocalComm,
    log: &'a Mutex<Vec<(usize, usize, Message)>>,
}

impl Comm for Recording<'_> {
    fn rank(&self) -> usize {
        self.inner.rank()
    }
    fn size(&self) -> usize {
        self.inner.size()
    }
    fn send(&self, dest: usize, message: Message) -> Result<(), FarmError> {
        self.log
            .lock()
            .unwrap()
            .push((self.rank(), dest, message.clone()));
        self.inner.send(dest, message)
    }
    fn recv_any(&self) -> Result<Envelope, FarmError> {
        self.inner.recv_any()
    }
}

/// Records every row index it renders.
struct CountingKernel {
    inner: JuliaKernel<f32>,
    rows: Mutex<Vec<usize>>,
}

impl CountingKernel {
    fn new() -> Self {
        Self {
            inner: JuliaKernel::default(),
            rows: Mutex::new(Vec::new()),
        }
    }
}

impl RowKernel for CountingKernel {
    fn render_row(&self, y: usize, width: usize, height: usize, out: &mut [Rgb]) {
        self.rows.lock().unwrap().push(y);
        self.inner.render_row(y, width, height, out);
    }
}

/// Sleeps before every row.
struct Throttled {
    inner: JuliaKernel<f32>,
    delay: Duration,
}

impl RowKernel for Throttled {
    fn render_row(&self, y: usize, width: usize, height: usize, out: &mut [Rgb]) {
        thread::sleep(self.delay);
        self.inner.render_row(y, width, height, out);
    }
}

/// m=4, n=4, chunk 2, three ranks: one 2-row chunk per worker, then a sentinel each.
#[test]
fn worked_example_four_by_four() {
    let log = Mutex::new(Vec::new());
    let kernel = JuliaKernel::<f32>::default();
    let dims = Dimensions::new(4, 4);
    let results = LocalComm::launch(3, |comm| {
        let rec = Recording { inner: comm, log: &log };
        run_rank(&rec, &kernel, dims, Policy::Dynamic { chunk_size: 2 })
    })
    .unwrap();

    let mut results = results.into_iter();
    let rendered = results.next().unwrap().unwrap().unwrap();
    for worker in results {
        assert!(worker.unwrap().is_none());
    }
    assert!(rendered.image.is_complete());
    assert_eq!(rendered.image.pixels().len(), 16);
    assert_eq!(rendered.stats.results_received, 2);
    assert_eq!(rendered.stats.rows_received, 4);
    assert_eq!(rendered.stats.chunks_per_rank, vec![0, 1, 1]);

    let log = log.into_inner().unwrap();
    assert_eq!(log.len(), 6);
    let from_coordinator: Vec<_> = log.iter().filter(|(src, _, _)| *src == 0).collect();
    assert_eq!(from_coordinator.len(), 4);
    assert_eq!(
        (from_coordinator[0].1, &from_coordinator[0].2),
        (1, &Message::Assign { start_row: 0 })
    );
    assert_eq!(
        (from_coordinator[1].1, &from_coordinator[1].2),
        (2, &Message::Assign { start_row: 2 })
    );
    let mut stopped: Vec<_> = from_coordinator[2..]
        .iter()
        .map(|(_, dest, msg)| {
            assert_eq!(*msg, Message::sentinel(4));
            *dest
        })
        .collect();
    stopped.sort();
    assert_eq!(stopped, vec![1, 2]);
}

/// n=5, chunk 2: chunks 0..2, 2..4, 4..5 and the last result carries one row.
#[test]
fn boundary_chunk_carries_one_row() {
    let log = Mutex::new(Vec::new());
    let kernel = JuliaKernel::<f32>::default();
    let dims = Dimensions::new(3, 5);
    let results = LocalComm::launch(2, |comm| {
        let rec = Recording { inner: comm, log: &log };
        run_rank(&rec, &kernel, dims, Policy::Dynamic { chunk_size: 2 })
    })
    .unwrap();
    let rendered = results.into_iter().next().unwrap().unwrap().unwrap();
    assert_eq!(rendered.stats.results_received, 3);

    let chunks: Vec<_> = log
        .into_inner()
        .unwrap()
        .into_iter()
        .filter_map(|(src, _, msg)| match msg {
            Message::Result(c) if src == 1 => Some((c.start_row, c.row_count, c.pixels.len())),
            _ => None,
        })
        .collect();
    assert_eq!(chunks, vec![(0, 2, 6), (2, 2, 6), (4, 1, 3)]);

    let reference = render_serial(&kernel, 3, 5, 1).unwrap();
    assert_eq!(rendered.image.pixels(), reference.pixels());
}

/// A single rank cannot run the dynamic policy and must not touch the transport.
#[test]
fn single_rank_fails_before_any_message() {
    let log = Mutex::new(Vec::new());
    let kernel = JuliaKernel::<f32>::default();
    let results = LocalComm::launch(1, |comm| {
        let rec = Recording { inner: comm, log: &log };
        run_rank(&rec, &kernel, Dimensions::new(4, 4), Policy::Dynamic { chunk_size: 2 })
    })
    .unwrap();
    assert!(matches!(
        results[0],
        Err(FarmError::InsufficientRanks { size: 1, required: 2 })
    ));
    assert!(log.into_inner().unwrap().is_empty());
}

/// Invalid arguments fail on every rank, again without any message.
#[test]
fn invalid_chunk_size_fails_everywhere() {
    let log = Mutex::new(Vec::new());
    let kernel = JuliaKernel::<f32>::default();
    let results = LocalComm::launch(3, |comm| {
        let rec = Recording { inner: comm, log: &log };
        run_rank(&rec, &kernel, Dimensions::new(4, 4), Policy::Dynamic { chunk_size: 9 })
    })
    .unwrap();
    assert!(results
        .iter()
        .all(|r| matches!(r, Err(FarmError::InvalidChunkSize { chunk_size: 9, height: 4 }))));
    assert!(log.into_inner().unwrap().is_empty());
}

/// More workers than chunks: the idle ones are stopped straight away.
#[test]
fn surplus_workers_get_sentinel_at_startup() {
    let kernel = CountingKernel::new();
    let results = LocalComm::launch(6, |comm| {
        run_rank(comm, &kernel, Dimensions::new(5, 4), Policy::Dynamic { chunk_size: 2 })
    })
    .unwrap();
    let rendered = results.into_iter().next().unwrap().unwrap().unwrap();
    assert_eq!(rendered.stats.results_received, 2);
    assert_eq!(rendered.stats.chunks_per_rank, vec![0, 1, 1, 0, 0, 0]);
    let mut rows = kernel.rows.into_inner().unwrap();
    rows.sort();
    assert_eq!(rows, vec![0, 1, 2, 3]);
}

/// Random sizes: `ceil(n/chunk)` results, rows sum to `n`, each row rendered once.
#[test]
fn random_runs_cover_every_row_once() {
    let mut rng = rand::thread_rng();
    for _ in 0..12 {
        let width = rng.gen_range(1..16);
        let height = rng.gen_range(1..40);
        let chunk_size = rng.gen_range(1..=height);
        let ranks = rng.gen_range(2..6);
        let kernel = CountingKernel::new();
        let dims = Dimensions::new(width, height);

        let results = LocalComm::launch(ranks, |comm| {
            run_rank(comm, &kernel, dims, Policy::Dynamic { chunk_size })
        })
        .unwrap();
        let rendered = results.into_iter().next().unwrap().unwrap().unwrap();

        assert_eq!(rendered.stats.results_received, height.div_ceil(chunk_size));
        assert_eq!(rendered.stats.rows_received, height);
        assert_eq!(
            rendered.stats.chunks_per_rank.iter().sum::<usize>(),
            height.div_ceil(chunk_size)
        );
        let mut rows = kernel.rows.into_inner().unwrap();
        rows.sort();
        assert_eq!(rows, (0..height).collect::<Vec<_>>());
        assert_eq!(rendered.image.pixels().len(), width * height);
    }
}

/// A slow worker is handed fewer chunks than a fast one.
#[test]
fn slow_worker_receives_fewer_chunks() {
    let dims = Dimensions::new(8, 60);
    let results = LocalComm::launch(3, |comm| {
        let delay = if comm.rank() == 1 {
            Duration::from_millis(15)
        } else {
            Duration::ZERO
        };
        let kernel = Throttled {
            inner: JuliaKernel::default(),
            delay,
        };
        run_rank(comm, &kernel, dims, Policy::Dynamic { chunk_size: 1 })
    })
    .unwrap();
    let rendered = results.into_iter().next().unwrap().unwrap().unwrap();
    let per_rank = &rendered.stats.chunks_per_rank;
    assert_eq!(per_rank[1] + per_rank[2], 60);
    assert!(per_rank[2] > per_rank[1], "chunks per rank: {:?}", per_rank);
}

/// The coordinator refuses a result larger than the chunk size it hands out.
#[test]
fn oversized_result_rejected() {
    let dims = Dimensions::new(2, 6);
    let results = LocalComm::launch(2, |comm| -> Result<(), FarmError> {
        if comm.rank() == 0 {
            run_coordinator(comm, dims, 2).map(|_| ())
        } else {
            comm.recv_any()?;
            let chunk = julia_farm::ResultChunk::new(0, 3, vec![Rgb::default(); 6]);
            comm.send(0, Message::Result(chunk))
        }
    })
    .unwrap();
    assert!(matches!(
        results[0],
        Err(FarmError::ChunkTooLarge { start_row: 0, rows: 3, capacity: 2 })
    ));
}
