//! Julia set renderer with a static row partition.
//!
//! Every rank, the coordinator included, renders `floor(r·n/p)..floor((r+1)·n/p)`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use julia_farm::launch::{exit_status, init_logging, launch};
use julia_farm::raster::bitmap::DEFAULT_OUTPUT;
use julia_farm::{Dimensions, FarmError, JuliaKernel, Policy, write_bitmap};

/// Render a Julia set, each rank computing a fixed share of the rows
#[derive(Parser, Debug)]
#[command(name = "julia-static", long_about = None)]
struct Args {
    /// Image width in pixels
    width: usize,

    /// Image height in pixels
    height: usize,

    /// Total ranks including the coordinator (thread backend only)
    #[arg(short, long, default_value_t = num_cpus::get())]
    ranks: usize,

    /// Output bitmap
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,
}

fn run(args: &Args) -> Result<(), FarmError> {
    let kernel = JuliaKernel::<f32>::default();
    let dims = Dimensions::new(args.width, args.height);
    if let Some(rendered) = launch(&kernel, dims, Policy::Static, args.ranks)? {
        write_bitmap(&rendered.image, &args.output)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();
    exit_status(run(&args), Args::command().render_usage())
}
