mod cli;

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing::{error, level_filters::LevelFilter};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity of the program:
    /// -v for debug and -vv for trace. `RUST_LOG` takes precedence when set
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Prompt for an experiment, dock every ligand, collect binding affinities and open PyMOL
    Run(cli::run::Args),
    /// Prompt for an experiment and dock every ligand, without collecting results
    Dock(cli::dock::Args),
    /// Collect binding affinities from existing Vina logs
    Extract(cli::extract::Args),
    /// Open the receptor and the docked poses in PyMOL
    Visualise(cli::visualise::Args),
}

fn main() -> ExitCode {
    let args = Cli::parse();

    let level = match args.verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let result = match &args.command {
        Commands::Run(args) => cli::run::run(args),
        Commands::Dock(args) => cli::dock::run(args),
        Commands::Extract(args) => cli::extract::run(args),
        Commands::Visualise(args) => cli::visualise::run(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
