pub(crate) mod dock;
pub(crate) mod extract;
pub(crate) mod run;
pub(crate) mod visualise;

use ava::{run_docking, write_configs, AvaError, Experiment};
use std::path::Path;
use tracing::info;

/// Write the configuration file of every run of `experiment`, then dock them in order.
pub(crate) fn configure_and_dock(
    experiment: &Experiment,
    workdir: &Path,
    vina: &Path,
) -> Result<Vec<String>, AvaError> {
    let config_files = write_configs(&experiment.runs(), workdir)?;
    info!("Generated config files: {}", config_files.join(", "));

    run_docking(vina, &config_files, workdir);
    Ok(config_files)
}
