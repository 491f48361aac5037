//! Julia set renderer with pull-based dynamic row scheduling.
//!
//! ```bash
//! # Threads in one process (rank 0 coordinates, ranks 1.. compute)
//! julia-dynamic 1920 1080 16 --ranks 8
//!
//! # One process per rank
//! cargo build --release --features mpi
//! mpirun -np 8 ./target/release/julia-dynamic 1920 1080 16
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use julia_farm::launch::{exit_status, init_logging, launch};
use julia_farm::raster::bitmap::DEFAULT_OUTPUT;
use julia_farm::{Dimensions, FarmError, JuliaKernel, Policy, write_bitmap};

/// Render a Julia set, handing out rows to workers on demand
#[derive(Parser, Debug)]
#[command(name = "julia-dynamic", long_about = None)]
struct Args {
    /// Image width in pixels
    width: usize,

    /// Image height in pixels
    height: usize,

    /// Rows per dispatched chunk
    chunk_size: usize,

    /// Total ranks including the coordinator (thread backend only)
    #[arg(short, long, default_value_t = num_cpus::get().max(2))]
    ranks: usize,

    /// Output bitmap
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,
}

fn run(args: &Args) -> Result<(), FarmError> {
    let kernel = JuliaKernel::<f32>::default();
    let dims = Dimensions::new(args.width, args.height);
    let policy = Policy::Dynamic {
        chunk_size: args.chunk_size,
    };
    if let Some(rendered) = launch(&kernel, dims, policy, args.ranks)? {
        write_bitmap(&rendered.image, &args.output)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();
    exit_status(run(&args), Args::command().render_usage())
}
