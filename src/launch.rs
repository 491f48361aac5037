//! Process entry points shared by the binaries: logging, backend selection, exit codes.

use std::fmt::Display;
use std::process::ExitCode;

use log::error;

use crate::config::{Dimensions, Policy};
use crate::core::traits::RowKernel;
use crate::error::FarmError;
use crate::policy::{Rendered, run_rank};

/// Install `env_logger`, `info` unless `RUST_LOG` says otherwise.
pub fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("info");
    let _ = env_logger::Builder::from_env(env).try_init();
}

/// Run `policy` on every rank of the configured backend.
///
/// With the `mpi` feature this process is one rank of the MPI world and
/// `ranks` is ignored. Otherwise `ranks` threads are started in this process.
/// Returns the coordinator's output on the process hosting rank 0.
#[cfg(feature = "mpi")]
pub fn launch<K: RowKernel + Sync>(
    kernel: &K,
    dims: Dimensions,
    policy: Policy,
    _ranks: usize,
) -> Result<Option<Rendered>, FarmError> {
    let comm = crate::parallel::MpiComm::new()?;
    run_rank(&comm, kernel, dims, policy)
}

#[cfg(not(feature = "mpi"))]
pub fn launch<K: RowKernel + Sync>(
    kernel: &K,
    dims: Dimensions,
    policy: Policy,
    ranks: usize,
) -> Result<Option<Rendered>, FarmError> {
    use crate::config::options::COORDINATOR;
    use crate::parallel::LocalComm;

    let results = LocalComm::launch(ranks, |comm| run_rank(comm, kernel, dims, policy))?;
    let mut rendered = None;
    for (rank, result) in results.into_iter().enumerate() {
        let out = result?;
        if rank == COORDINATOR {
            rendered = out;
        }
    }
    Ok(rendered)
}

impl FarmError {
    /// Errors caused by the command line rather than by the run itself.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            FarmError::InvalidDimensions { .. }
                | FarmError::InvalidChunkSize { .. }
                | FarmError::InsufficientRanks { .. }
        )
    }
}

/// Map a run result to the process exit status, printing `usage` for argument errors.
pub fn exit_status(result: Result<(), FarmError>, usage: impl Display) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            if e.is_usage_error() {
                eprintln!("{}", usage);
            }
            ExitCode::FAILURE
        }
    }
}
