//! Single-process Julia set renderer, the reference for the distributed policies.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use julia_farm::launch::{exit_status, init_logging};
use julia_farm::raster::bitmap::DEFAULT_OUTPUT;
use julia_farm::{FarmError, JuliaKernel, render_serial, write_bitmap};

/// Render a Julia set in one process
#[derive(Parser, Debug)]
#[command(name = "julia-serial", long_about = None)]
struct Args {
    /// Image width in pixels
    width: usize,

    /// Image height in pixels
    height: usize,

    /// Worker threads; 0 means one per CPU
    #[arg(short, long, default_value_t = 1)]
    threads: usize,

    /// Output bitmap
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,
}

fn run(args: &Args) -> Result<(), FarmError> {
    let kernel = JuliaKernel::<f32>::default();
    let image = render_serial(&kernel, args.width, args.height, args.threads)?;
    write_bitmap(&image, &args.output)
}

fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();
    exit_status(run(&args), Args::command().render_usage())
}
