use ava::{AvaError, Prompter, DEFAULT_VINA};
use clap::Parser;
use std::path::PathBuf;
use tracing::trace;

#[derive(Parser, Debug, Clone)]
#[command(
    version,
    about = "Prompt for docking parameters, write Vina config files and run Vina on each"
)]
pub(crate) struct Args {
    /// Directory holding the ligand and receptor files; all output is written here
    #[arg(short, long, default_value = ".")]
    workdir: PathBuf,

    /// AutoDock Vina executable
    #[arg(long, default_value = DEFAULT_VINA)]
    vina: PathBuf,
}

pub(crate) fn run(args: &Args) -> Result<(), AvaError> {
    trace!("{args:?}");

    let stdin = std::io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), std::io::stdout(), &args.workdir);
    let experiment = prompter.collect_experiment()?;

    super::configure_and_dock(&experiment, prompter.workdir(), &args.vina)?;
    Ok(())
}
