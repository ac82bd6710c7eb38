use ava::{visualise_structures, AvaError, DEFAULT_PYMOL};
use clap::Parser;
use std::path::PathBuf;
use tracing::trace;

#[derive(Parser, Debug, Clone)]
#[command(
    version,
    about = "Open the receptor and all docked poses in PyMOL and save the session"
)]
pub(crate) struct Args {
    /// Receptor file, relative to the working directory
    #[arg(short, long)]
    receptor: String,

    /// Directory containing the conformations-<seed> directories
    #[arg(short, long, default_value = ".")]
    workdir: PathBuf,

    /// PyMOL executable
    #[arg(long, default_value = DEFAULT_PYMOL)]
    pymol: PathBuf,
}

pub(crate) fn run(args: &Args) -> Result<(), AvaError> {
    trace!("{args:?}");
    visualise_structures(&args.pymol, &args.receptor, &args.workdir)?;
    Ok(())
}
