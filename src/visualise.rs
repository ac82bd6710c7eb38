use crate::config::CONFORMATIONS_PREFIX;
use crate::docking::run_external;
use crate::error::AvaError;
use crate::results::RESULTS_DIR;
use crate::utils::{list_files, list_seed_dirs};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::info;

/// Default location of the PyMOL binary on macOS.
pub const DEFAULT_PYMOL: &str = "/Applications/PyMOL.app/Contents/MacOS/PyMOL";
/// Name of the saved PyMOL session under `results/`.
pub const SESSION_FILE: &str = "analysis.pse";

/// Receptor followed by every docked pose, as paths relative to `workdir`.
pub fn structure_files(workdir: &Path, receptor: &str) -> Result<Vec<PathBuf>, AvaError> {
    let mut files = vec![PathBuf::from(receptor)];
    for (_, dir) in list_seed_dirs(workdir, CONFORMATIONS_PREFIX)? {
        for file in list_files(&dir)? {
            // Both come from listing `workdir`, so the prefix is always there
            let relative = file.strip_prefix(workdir).unwrap_or(&file);
            files.push(relative.to_path_buf());
        }
    }
    Ok(files)
}

/// PyMOL command loading `files` quietly and saving the session to `results/`.
pub fn pymol_command(pymol: &Path, files: &[PathBuf], workdir: &Path) -> Command {
    let session = Path::new(RESULTS_DIR).join(SESSION_FILE);
    let mut cmd = Command::new(pymol);
    cmd.arg("-cq")
        .args(files)
        .arg("-d")
        .arg(format!("save {}", session.display()))
        .current_dir(workdir);
    cmd
}

/// Load the receptor and every docked pose into PyMOL and save the session.
///
/// Returns the number of structures handed to PyMOL.
pub fn visualise_structures(pymol: &Path, receptor: &str, workdir: &Path) -> Result<usize, AvaError> {
    let results_dir = workdir.join(RESULTS_DIR);
    std::fs::create_dir_all(&results_dir).map_err(|e| AvaError::io(&results_dir, e))?;

    let files = structure_files(workdir, receptor)?;
    info!(
        "Opening {} {} in PyMOL",
        files.len(),
        match files.len() {
            1 => "structure",
            _ => "structures",
        }
    );
    if run_external(pymol_command(pymol, &files, workdir)) {
        info!("Session saved to {}", results_dir.join(SESSION_FILE).display());
    }
    Ok(files.len())
}
