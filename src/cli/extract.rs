use ava::{best_modes, collect_binding_data, AvaError, DataFrameFileType};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace};

#[derive(Parser, Debug, Clone)]
#[command(
    version,
    about = "Collect binding affinities from the logs-<seed> directories into one table"
)]
pub(crate) struct Args {
    /// Directory containing the logs-<seed> directories
    #[arg(short, long, default_value = ".")]
    workdir: PathBuf,

    /// Output file type
    #[arg(short = 't', long, default_value_t = DataFrameFileType::Csv)]
    output_format: DataFrameFileType,
}

pub(crate) fn run(args: &Args) -> Result<(), AvaError> {
    trace!("{args:?}");
    extract(&args.workdir, args.output_format)
}

/// Write the binding affinity table of `workdir` and log the best pose of each run.
pub(crate) fn extract(workdir: &Path, output_format: DataFrameFileType) -> Result<(), AvaError> {
    let (df, output_file) = collect_binding_data(workdir, output_format)?;
    debug!("Collected {} binding modes\n{}", df.height(), df);

    let df_best = best_modes(&df)?;
    if df_best.height() > 0 {
        info!(
            "Best binding mode of {} docking {}\n{}",
            df_best.height(),
            match df_best.height() {
                1 => "run",
                _ => "runs",
            },
            df_best
        );
    }

    info!("Log data retrieved and saved as {}", output_file.display());
    Ok(())
}
