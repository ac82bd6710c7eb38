#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

//! # Ava Library
//!
//! This library automates batches of AutoDock Vina docking runs. It collects
//! the experiment parameters interactively, writes one Vina configuration file
//! per ligand and seed, runs Vina on each of them, and gathers the binding mode
//! tables of the resulting logs into a Polars DataFrame. The docked poses can
//! then be opened together with the receptor in a PyMOL session.
//!
//! Vina and PyMOL are external programs; they are launched one at a time and
//! their exit status never stops the workflow.

mod config;
mod docking;
mod error;
mod input;
mod results;
mod utils;
mod visualise;

// Re-export key public types
pub use config::{
    ligand_base_name, plan_runs, seed_dir_name, write_configs, DockingConfig, Experiment,
    CONFORMATIONS_PREFIX, LOGS_PREFIX,
};
pub use docking::{docking_command, run_docking, run_external, DEFAULT_VINA};
pub use error::{AvaError, InputError, LogParseError};
pub use input::{
    clashing_base_names, missing_files, parse_box_size, parse_coordinates, parse_seeds, BoxSizeError,
    CoordinateError, Prompter, SeedError, DEFAULT_SEED,
};
pub use results::{
    best_modes, collect_binding_data, extract_logs, ligand_and_seed, parse_binding_modes,
    parse_log_file, records_to_df, BindingMode, Extraction, LogRecord, COLUMNS,
    FIELDS_PER_ROW, RESULTS_DIR, RESULTS_FILE, TABLE_FIRST_LINE, TABLE_LAST_LINE,
};
pub use utils::{list_files, list_seed_dirs, seed_from_dir_name, write_df_to_file, DataFrameFileType};
pub use visualise::{
    pymol_command, structure_files, visualise_structures, DEFAULT_PYMOL, SESSION_FILE,
};
