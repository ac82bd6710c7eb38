use std::path::Path;
use std::process::Command;
use tracing::{debug, info, warn};

/// Default name of the AutoDock Vina executable, looked up on `PATH`.
pub const DEFAULT_VINA: &str = "vina";

/// Command running Vina on one configuration file inside `workdir`.
pub fn docking_command(vina: &Path, config_file: &str, workdir: &Path) -> Command {
    let mut cmd = Command::new(vina);
    cmd.arg("--config").arg(config_file).current_dir(workdir);
    cmd
}

/// Run `cmd` to completion.
///
/// The exit status is only reported; a failing or missing external program
/// never stops the workflow. Returns whether the program exited successfully.
pub fn run_external(mut cmd: Command) -> bool {
    debug!("Running {cmd:?}");
    match cmd.status() {
        Ok(status) if status.success() => true,
        Ok(status) => {
            warn!("{:?} exited with {status}", cmd.get_program());
            false
        }
        Err(e) => {
            warn!("Failed to launch {:?}: {e}", cmd.get_program());
            false
        }
    }
}

/// Run Vina once per configuration file, one after the other, in the given order.
///
/// Returns the number of runs that exited successfully.
pub fn run_docking(vina: &Path, config_files: &[String], workdir: &Path) -> usize {
    let total = config_files.len();
    let mut succeeded = 0;
    for (i, config_file) in config_files.iter().enumerate() {
        info!("Docking run {}/{total}: {config_file}", i + 1);
        if run_external(docking_command(vina, config_file, workdir)) {
            succeeded += 1;
        }
    }
    info!("{succeeded} of {total} docking runs finished successfully");
    succeeded
}
