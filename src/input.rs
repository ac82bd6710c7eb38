//! Interactive collection of docking parameters.
//!
//! Every `collect_*` method prints a prompt, reads one line and validates it.
//! Invalid answers are reported and the same question is asked again until a
//! valid answer arrives or the input is closed.

use crate::config::{ligand_base_name, Experiment};
use crate::error::InputError;
use nalgebra::{Point3, Vector3};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Seed used when the user leaves the seed prompt empty.
pub const DEFAULT_SEED: i64 = 0;

/// Rejection of a grid coordinate line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoordinateError {
    /// Wrong number of tokens.
    #[error("Error: Please enter exactly 3 coordinates separated by a space")]
    WrongCount,
    /// At least one token is not a number.
    #[error("Error: not all values are numbers")]
    NotNumber,
}

/// Rejection of a box size line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoxSizeError {
    /// Wrong number of tokens.
    #[error("Error: Please enter exactly 3 box dimensions separated by a space")]
    WrongCount,
    /// At least one token is not an integer greater than zero.
    #[error("Error: Box values must be positive integers greater than 0")]
    NotPositive,
}

/// Rejection of a seed line.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Error: seed(s) must be an integer")]
pub struct SeedError;

/// Parse three whitespace separated floating-point numbers.
pub fn parse_coordinates(line: &str) -> Result<Point3<f64>, CoordinateError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != 3 {
        return Err(CoordinateError::WrongCount);
    }
    let values = tokens
        .iter()
        .map(|t| t.parse::<f64>())
        .collect::<Result<Vec<f64>, _>>()
        .map_err(|_| CoordinateError::NotNumber)?;

    Ok(Point3::new(values[0], values[1], values[2]))
}

/// Parse three whitespace separated integers, all strictly positive.
pub fn parse_box_size(line: &str) -> Result<Vector3<u32>, BoxSizeError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != 3 {
        return Err(BoxSizeError::WrongCount);
    }
    let values = tokens
        .iter()
        .map(|t| t.parse::<u32>().ok().filter(|n| *n > 0))
        .collect::<Option<Vec<u32>>>()
        .ok_or(BoxSizeError::NotPositive)?;

    Ok(Vector3::new(values[0], values[1], values[2]))
}

/// Parse zero or more signed integer seeds. An empty line gives [`DEFAULT_SEED`].
pub fn parse_seeds(line: &str) -> Result<Vec<i64>, SeedError> {
    let seeds = line
        .split_whitespace()
        .map(|t| t.parse::<i64>().map_err(|_| SeedError))
        .collect::<Result<Vec<i64>, _>>()?;

    if seeds.is_empty() {
        Ok(vec![DEFAULT_SEED])
    } else {
        Ok(seeds)
    }
}

/// Names from `names` that are not regular files under `workdir`, in input order.
pub fn missing_files<'a>(workdir: &Path, names: &[&'a str]) -> Vec<&'a str> {
    names
        .iter()
        .filter(|name| !workdir.join(name).is_file())
        .copied()
        .collect()
}

/// Names from `names` whose base name (see [`ligand_base_name`]) is shared with
/// another entry, in input order.
///
/// Such ligands would write the same config, pose and log files.
pub fn clashing_base_names<'a>(names: &[&'a str]) -> Vec<&'a str> {
    let bases: Vec<String> = names.iter().map(|n| ligand_base_name(n)).collect();
    names
        .iter()
        .zip(&bases)
        .filter(|(_, base)| bases.iter().filter(|b| b == base).count() > 1)
        .map(|(name, _)| *name)
        .collect()
}

/// Console session asking for the parameters of a docking experiment.
///
/// File names are checked relative to `workdir`, which is also where the
/// docking runs later take place.
pub struct Prompter<R, W> {
    input: R,
    output: W,
    workdir: PathBuf,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Create a prompter reading answers from `input` and writing prompts to `output`.
    pub fn new(input: R, output: W, workdir: impl Into<PathBuf>) -> Self {
        Self {
            input,
            output,
            workdir: workdir.into(),
        }
    }

    /// Directory that file names are resolved against.
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Ask for the working directory and resolve later file names against it.
    pub fn collect_working_directory(&mut self) -> Result<PathBuf, InputError> {
        loop {
            let answer = self.ask("Please input working directory: ")?;
            let answer = answer.trim();
            let candidate = self.workdir.join(answer);
            if !answer.is_empty() && candidate.is_dir() {
                debug!("Working directory set to {}", candidate.display());
                self.workdir = candidate.clone();
                return Ok(candidate);
            }
            self.say(&format!("Error: Directory {answer} not found..."))?;
        }
    }

    /// Ask for one or more ligand files; every file must exist and no two may
    /// share a base name.
    pub fn collect_ligands(&mut self) -> Result<Vec<String>, InputError> {
        loop {
            let answer = self.ask("Ligands: ")?;
            let names: Vec<&str> = answer.split_whitespace().collect();
            if names.is_empty() {
                self.say("Error: no ligand files given")?;
                continue;
            }

            let missing = missing_files(&self.workdir, &names);
            let clashing = clashing_base_names(&names);
            if missing.is_empty() && clashing.is_empty() {
                self.say("File(s) accepted...")?;
                debug!("Ligands: {names:?}");
                return Ok(names.into_iter().map(String::from).collect());
            }

            for name in missing {
                self.say(&format!("Error: {name} not found..."))?;
            }
            for name in clashing {
                self.say(&format!(
                    "Error: {name} shares the name '{}' with another ligand",
                    ligand_base_name(name)
                ))?;
            }
            self.say("Please check filenames and re-enter")?;
        }
    }

    /// Ask for the receptor file, which must exist.
    pub fn collect_receptor(&mut self) -> Result<String, InputError> {
        loop {
            let answer = self.ask("Receptor file: ")?;
            let name = answer.trim();
            if !name.is_empty() && self.workdir.join(name).is_file() {
                self.say("Receptor file accepted...")?;
                debug!("Receptor: {name}");
                return Ok(name.to_string());
            }
            self.say(&format!("Error: {name} not found"))?;
            self.say("Please check filenames and re-enter")?;
        }
    }

    /// Ask for the center of the search box.
    pub fn collect_coordinates(&mut self) -> Result<Point3<f64>, InputError> {
        loop {
            let answer = self.ask("Grid co-ordinates: ")?;
            match parse_coordinates(&answer) {
                Ok(center) => {
                    self.say("Coordinates accepted...")?;
                    return Ok(center);
                }
                Err(e) => self.say(&e.to_string())?,
            }
        }
    }

    /// Ask for the dimensions of the search box.
    pub fn collect_box_size(&mut self) -> Result<Vector3<u32>, InputError> {
        loop {
            let answer = self.ask("Box size: ")?;
            match parse_box_size(&answer) {
                Ok(size) => {
                    self.say("Box parameters accepted...")?;
                    return Ok(size);
                }
                Err(e) => self.say(&e.to_string())?,
            }
        }
    }

    /// Ask for the seeds of the docking runs.
    pub fn collect_seeds(&mut self) -> Result<Vec<i64>, InputError> {
        loop {
            let answer = self.ask("Seed (optional): ")?;
            match parse_seeds(&answer) {
                Ok(seeds) => {
                    if !answer.trim().is_empty() {
                        self.say("Seed(s) accepted...")?;
                    }
                    return Ok(seeds);
                }
                Err(e) => self.say(&e.to_string())?,
            }
        }
    }

    /// Ask every question of a docking experiment in turn.
    pub fn collect_experiment(&mut self) -> Result<Experiment, InputError> {
        let ligands = self.collect_ligands()?;
        let receptor = self.collect_receptor()?;
        let center = self.collect_coordinates()?;
        let size = self.collect_box_size()?;
        let seeds = self.collect_seeds()?;
        Ok(Experiment {
            ligands,
            receptor,
            center,
            size,
            seeds,
        })
    }

    /// Print a line to the console.
    pub fn say(&mut self, message: &str) -> Result<(), InputError> {
        writeln!(self.output, "{message}")?;
        Ok(())
    }

    fn ask(&mut self, prompt: &str) -> Result<String, InputError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Err(InputError::Closed {
                prompt: prompt.trim_end().to_string(),
            });
        }
        // Undecodable bytes become U+FFFD, which every validator rejects
        let line = String::from_utf8_lossy(&line);
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}
