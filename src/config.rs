//! Vina configuration files, one per (ligand, seed) pair.

use crate::error::AvaError;
use nalgebra::{Point3, Vector3};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Prefix of the per-seed directories holding docked poses.
pub const CONFORMATIONS_PREFIX: &str = "conformations";
/// Prefix of the per-seed directories holding docking logs.
pub const LOGS_PREFIX: &str = "logs";

/// Name of the per-seed directory with the given prefix, e.g. `logs-5`.
pub fn seed_dir_name(prefix: &str, seed: i64) -> String {
    format!("{prefix}-{seed}")
}

/// Ligand file name without directories and without its extension.
///
/// `lig1.pdbqt` gives `lig1`; `ligands/lig1.pdbqt` also gives `lig1`.
pub fn ligand_base_name(ligand: &str) -> String {
    Path::new(ligand)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| ligand.to_string())
}

/// Everything needed to describe a single docking run.
#[derive(Debug, Clone, PartialEq)]
pub struct DockingConfig {
    /// Ligand structure file, as given by the user.
    pub ligand: String,
    /// Receptor structure file, as given by the user.
    pub receptor: String,
    /// Center of the search box.
    pub center: Point3<f64>,
    /// Edge lengths of the search box.
    pub size: Vector3<u32>,
    /// Seed passed to Vina.
    pub seed: i64,
}

impl DockingConfig {
    /// Build the configuration of one run.
    pub fn new(
        ligand: &str,
        receptor: &str,
        center: Point3<f64>,
        size: Vector3<u32>,
        seed: i64,
    ) -> Self {
        Self {
            ligand: ligand.to_string(),
            receptor: receptor.to_string(),
            center,
            size,
            seed,
        }
    }

    fn base_name(&self) -> String {
        ligand_base_name(&self.ligand)
    }

    /// Directory receiving the docked poses of this seed.
    pub fn conformations_dir(&self) -> String {
        seed_dir_name(CONFORMATIONS_PREFIX, self.seed)
    }

    /// Directory receiving the docking logs of this seed.
    pub fn logs_dir(&self) -> String {
        seed_dir_name(LOGS_PREFIX, self.seed)
    }

    /// Name of the configuration file, e.g. `lig1-config-5.txt`.
    pub fn file_name(&self) -> String {
        format!("{}-config-{}.txt", self.base_name(), self.seed)
    }

    /// Path Vina writes the docked poses to.
    pub fn out_path(&self) -> String {
        format!(
            "{}/{}-{}.pdbqt",
            self.conformations_dir(),
            self.base_name(),
            self.seed
        )
    }

    /// Path Vina writes its log to.
    pub fn log_path(&self) -> String {
        format!("{}/{}-log-{}.txt", self.logs_dir(), self.base_name(), self.seed)
    }

    /// Text of the configuration file.
    pub fn render(&self) -> String {
        let mut text = String::new();
        // Writing into a String cannot fail
        let _ = writeln!(text, "receptor = {}", self.receptor);
        let _ = writeln!(text, "ligand = {}", self.ligand);
        let _ = writeln!(text);
        let _ = writeln!(text, "center_x = {:?}", self.center.x);
        let _ = writeln!(text, "center_y = {:?}", self.center.y);
        let _ = writeln!(text, "center_z = {:?}", self.center.z);
        let _ = writeln!(text);
        let _ = writeln!(text, "size_x = {}", self.size.x);
        let _ = writeln!(text, "size_y = {}", self.size.y);
        let _ = writeln!(text, "size_z = {}", self.size.z);
        let _ = writeln!(text);
        let _ = writeln!(text, "out = {}", self.out_path());
        let _ = writeln!(text, "log = {}", self.log_path());
        let _ = writeln!(text);
        let _ = write!(text, "seed = {}", self.seed);
        text
    }

    /// Create the seed directories if needed and write the configuration file
    /// into `workdir`. Returns the path of the written file.
    ///
    /// Writing the same configuration twice overwrites the file in place.
    pub fn write(&self, workdir: &Path) -> Result<PathBuf, AvaError> {
        for dir in [self.conformations_dir(), self.logs_dir()] {
            let path = workdir.join(&dir);
            if path.is_dir() {
                debug!("Directory {dir} already present");
                continue;
            }
            std::fs::create_dir_all(&path).map_err(|e| AvaError::io(&path, e))?;
            info!("Created directory {dir}");
        }

        let path = workdir.join(self.file_name());
        std::fs::write(&path, self.render()).map_err(|e| AvaError::io(&path, e))?;
        debug!("Wrote {}", path.display());
        Ok(path)
    }
}

/// Parameters of a docking experiment as entered by the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Experiment {
    /// Ligand structure files.
    pub ligands: Vec<String>,
    /// Receptor structure file.
    pub receptor: String,
    /// Center of the search box.
    pub center: Point3<f64>,
    /// Edge lengths of the search box.
    pub size: Vector3<u32>,
    /// Seeds; each ligand is docked once per seed.
    pub seeds: Vec<i64>,
}

impl Experiment {
    /// All docking runs of this experiment, see [`plan_runs`].
    pub fn runs(&self) -> Vec<DockingConfig> {
        plan_runs(
            &self.ligands,
            &self.receptor,
            self.center,
            self.size,
            &self.seeds,
        )
    }
}

/// Build one configuration per (ligand, seed) pair.
///
/// Seeds form the outer loop: all ligands are listed for the first seed, then
/// all ligands for the second seed, and so on.
pub fn plan_runs(
    ligands: &[String],
    receptor: &str,
    center: Point3<f64>,
    size: Vector3<u32>,
    seeds: &[i64],
) -> Vec<DockingConfig> {
    seeds
        .iter()
        .flat_map(|&seed| {
            ligands
                .iter()
                .map(move |ligand| DockingConfig::new(ligand, receptor, center, size, seed))
        })
        .collect()
}

/// Write every configuration into `workdir`, returning the written file names
/// in the same order.
pub fn write_configs(configs: &[DockingConfig], workdir: &Path) -> Result<Vec<String>, AvaError> {
    configs
        .iter()
        .map(|config| {
            config.write(workdir)?;
            Ok::<_, AvaError>(config.file_name())
        })
        .collect()
}
