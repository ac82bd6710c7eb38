use ava::{visualise_structures, AvaError, DataFrameFileType, Prompter, DEFAULT_PYMOL, DEFAULT_VINA};
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, trace};

#[derive(Parser, Debug, Clone)]
#[command(
    version,
    about = "Dock every ligand for every seed, collect the binding affinities and open the poses in PyMOL"
)]
pub(crate) struct Args {
    /// Directory holding the ligand and receptor files; asked for interactively when omitted
    #[arg(short, long)]
    workdir: Option<PathBuf>,

    /// AutoDock Vina executable
    #[arg(long, default_value = DEFAULT_VINA)]
    vina: PathBuf,

    /// PyMOL executable
    #[arg(long, default_value = DEFAULT_PYMOL)]
    pymol: PathBuf,

    /// Output file type of the binding affinity table
    #[arg(short = 't', long, default_value_t = DataFrameFileType::Csv)]
    output_format: DataFrameFileType,

    /// Skip the PyMOL session at the end
    #[arg(long = "no-visualise", default_value_t = false)]
    no_visualise: bool,
}

pub(crate) fn run(args: &Args) -> Result<(), AvaError> {
    trace!("{args:?}");

    let stdin = std::io::stdin();
    let mut prompter = match &args.workdir {
        Some(workdir) => Prompter::new(stdin.lock(), std::io::stdout(), workdir),
        None => {
            let mut prompter = Prompter::new(stdin.lock(), std::io::stdout(), ".");
            prompter.collect_working_directory()?;
            prompter
        }
    };
    let experiment = prompter.collect_experiment()?;
    let workdir = prompter.workdir().to_path_buf();
    debug!("Working in {}", workdir.display());

    super::configure_and_dock(&experiment, &workdir, &args.vina)?;
    super::extract::extract(&workdir, args.output_format)?;

    if !args.no_visualise {
        visualise_structures(&args.pymol, &experiment.receptor, &workdir)?;
    }
    Ok(())
}
