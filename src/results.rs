//! Collection of binding affinities from Vina log files.
//!
//! Vina prints its binding mode table at a fixed position of the log. The table
//! is read positionally from [`TABLE_FIRST_LINE`] to [`TABLE_LAST_LINE`]; a log
//! laid out differently is reported and skipped.

use crate::config::LOGS_PREFIX;
use crate::error::{AvaError, LogParseError};
use crate::utils::{list_files, list_seed_dirs, write_df_to_file, DataFrameFileType};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// First line (1-based) of the binding mode table in a Vina log.
pub const TABLE_FIRST_LINE: usize = 26;
/// Last line (1-based) that may still hold a binding mode row.
pub const TABLE_LAST_LINE: usize = 35;
/// Fields in a binding mode row: mode, affinity, rmsd l.b., rmsd u.b.
pub const FIELDS_PER_ROW: usize = 4;

/// Directory receiving the collected tables and the PyMOL session.
pub const RESULTS_DIR: &str = "results";
/// File name of the binding affinity table.
pub const RESULTS_FILE: &str = "binding-affinity-data.csv";

/// Column names of the binding affinity table, in order.
pub const COLUMNS: [&str; 6] = [
    "ligand",
    "seed",
    "binding mode",
    "affinity (kcal/mol)",
    "distance from best mode rmsd l.b",
    "distance from best mode rmsd u.b",
];

/// One row of a Vina binding mode table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BindingMode {
    /// Rank of the pose, starting at 1.
    pub mode: u32,
    /// Predicted affinity in kcal/mol.
    pub affinity: f64,
    /// RMSD lower bound from the best mode.
    pub rmsd_lb: f64,
    /// RMSD upper bound from the best mode.
    pub rmsd_ub: f64,
}

/// A binding mode tagged with the ligand and seed of its docking run.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    /// Ligand name taken from the log file name.
    pub ligand: String,
    /// Seed taken from the log file name.
    pub seed: i64,
    /// The parsed table row.
    pub binding_mode: BindingMode,
}

/// Outcome of scanning all log directories.
#[derive(Debug, Default)]
pub struct Extraction {
    /// Rows from every log that parsed.
    pub records: Vec<LogRecord>,
    /// Logs that were skipped and why.
    pub skipped: Vec<(PathBuf, LogParseError)>,
}

/// Ligand name and seed encoded in a log file name such as `lig1-log-5.txt`.
///
/// The ligand is the part before the first `-`. The seed is what follows the
/// last `-log-` marker, or the last `-` when there is no marker.
pub fn ligand_and_seed(file_name: &str) -> Result<(String, i64), LogParseError> {
    let bad_name = || LogParseError::BadFileName(file_name.to_string());

    let stem = file_name.strip_suffix(".txt").unwrap_or(file_name);
    let ligand = stem.split('-').next().unwrap_or_default();
    let seed = match stem.rsplit_once("-log-") {
        Some((_, seed)) => seed,
        None => stem.rsplit_once('-').ok_or_else(bad_name)?.1,
    };

    if ligand.is_empty() {
        return Err(bad_name());
    }
    let seed = seed.parse::<i64>().map_err(|_| bad_name())?;
    Ok((ligand.to_string(), seed))
}

fn parse_row(line_number: usize, line: &str) -> Result<BindingMode, LogParseError> {
    let malformed = || LogParseError::MalformedRow {
        line: line_number,
        content: line.trim().to_string(),
    };

    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != FIELDS_PER_ROW {
        return Err(malformed());
    }
    let mode = tokens[0].parse::<u32>().map_err(|_| malformed())?;
    let values = tokens[1..]
        .iter()
        .map(|t| t.parse::<f64>())
        .collect::<Result<Vec<f64>, _>>()
        .map_err(|_| malformed())?;

    Ok(BindingMode {
        mode,
        affinity: values[0],
        rmsd_lb: values[1],
        rmsd_ub: values[2],
    })
}

fn starts_with_number(line: &str) -> bool {
    line.split_whitespace()
        .next()
        .is_some_and(|t| t.parse::<f64>().is_ok())
}

/// Parse the binding mode table of a Vina log.
///
/// The line at [`TABLE_FIRST_LINE`] must be a row. Following lines up to
/// [`TABLE_LAST_LINE`] are read as rows while they start with a number; the
/// first line that does not (e.g. `Writing output ... done.`) ends the table.
pub fn parse_binding_modes(text: &str) -> Result<Vec<BindingMode>, LogParseError> {
    let lines: Vec<&str> = text.lines().collect();
    if lines.len() < TABLE_FIRST_LINE {
        return Err(LogParseError::TooShort {
            lines: lines.len(),
            expected: TABLE_FIRST_LINE,
        });
    }

    let mut modes = Vec::new();
    for (idx, line) in lines
        .iter()
        .enumerate()
        .take(TABLE_LAST_LINE)
        .skip(TABLE_FIRST_LINE - 1)
    {
        let line_number = idx + 1;
        if !starts_with_number(line) {
            if line_number == TABLE_FIRST_LINE {
                return Err(LogParseError::MissingTable { line: line_number });
            }
            break;
        }
        modes.push(parse_row(line_number, line)?);
    }
    Ok(modes)
}

/// Parse one log file into records.
pub fn parse_log_file(path: &Path) -> Result<Vec<LogRecord>, LogParseError> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let (ligand, seed) = ligand_and_seed(&file_name)?;

    let bytes = std::fs::read(path)?;
    let text = String::from_utf8(bytes).map_err(|_| LogParseError::NotUtf8)?;

    let records = parse_binding_modes(&text)?
        .into_iter()
        .map(|binding_mode| LogRecord {
            ligand: ligand.clone(),
            seed,
            binding_mode,
        })
        .collect();
    Ok(records)
}

/// Parse every file in every `logs-<seed>` directory under `workdir`.
///
/// Files that fail to parse are logged and listed in [`Extraction::skipped`].
pub fn extract_logs(workdir: &Path) -> Result<Extraction, AvaError> {
    let mut extraction = Extraction::default();

    for (seed, dir) in list_seed_dirs(workdir, LOGS_PREFIX)? {
        info!("Extracting log data from {}...", dir.display());
        for file in list_files(&dir)? {
            match parse_log_file(&file) {
                Ok(records) => {
                    debug!("{} binding modes in {}", records.len(), file.display());
                    extraction.records.extend(records);
                }
                Err(e) => {
                    warn!("Error could not read file {}: {e}", file.display());
                    extraction.skipped.push((file, e));
                }
            }
        }
        debug!("Log data extracted for seed {seed}");
    }
    Ok(extraction)
}

/// Arrange records as a DataFrame with the columns in [`COLUMNS`].
pub fn records_to_df(records: &[LogRecord]) -> PolarsResult<DataFrame> {
    df!(
        COLUMNS[0] => records.iter().map(|r| r.ligand.to_owned()).collect::<Vec<String>>(),
        COLUMNS[1] => records.iter().map(|r| r.seed).collect::<Vec<i64>>(),
        COLUMNS[2] => records.iter().map(|r| r.binding_mode.mode).collect::<Vec<u32>>(),
        COLUMNS[3] => records.iter().map(|r| r.binding_mode.affinity).collect::<Vec<f64>>(),
        COLUMNS[4] => records.iter().map(|r| r.binding_mode.rmsd_lb).collect::<Vec<f64>>(),
        COLUMNS[5] => records.iter().map(|r| r.binding_mode.rmsd_ub).collect::<Vec<f64>>(),
    )
}

/// Top ranked pose of every docking run, strongest binder first.
pub fn best_modes(df: &DataFrame) -> PolarsResult<DataFrame> {
    df.clone()
        .lazy()
        .filter(col(COLUMNS[2]).eq(lit(1u32)))
        .sort([COLUMNS[3]], Default::default())
        .collect()
}

/// Collect all logs under `workdir` into `results/binding-affinity-data.<ext>`.
///
/// Returns the table together with the path it was written to.
pub fn collect_binding_data(
    workdir: &Path,
    file_type: DataFrameFileType,
) -> Result<(DataFrame, PathBuf), AvaError> {
    let results_dir = workdir.join(RESULTS_DIR);
    if !results_dir.is_dir() {
        std::fs::create_dir_all(&results_dir).map_err(|e| AvaError::io(&results_dir, e))?;
        info!("Created directory {RESULTS_DIR}");
    }

    let extraction = extract_logs(workdir)?;
    if !extraction.skipped.is_empty() {
        warn!(
            "Skipped {} unreadable log {}",
            extraction.skipped.len(),
            match extraction.skipped.len() {
                1 => "file",
                _ => "files",
            }
        );
    }

    let mut df = records_to_df(&extraction.records)?;
    let output_file = write_df_to_file(&mut df, &results_dir.join(RESULTS_FILE), file_type)?;
    Ok((df, output_file))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_log() -> String {
        let root = env!("CARGO_MANIFEST_DIR");
        std::fs::read_to_string(format!("{root}/test-data/lig1-log-5.txt")).unwrap()
    }

    #[test]
    fn file_name_fields() {
        assert_eq!(
            ligand_and_seed("lig1-log-5.txt").unwrap(),
            ("lig1".to_string(), 5)
        );
        assert_eq!(
            ligand_and_seed("lig1-log--3.txt").unwrap(),
            ("lig1".to_string(), -3)
        );
        assert_eq!(
            ligand_and_seed("lig1-vina-log-12.txt").unwrap(),
            ("lig1".to_string(), 12)
        );
        assert_eq!(ligand_and_seed("lig1-7.txt").unwrap(), ("lig1".to_string(), 7));
        assert!(matches!(
            ligand_and_seed("notes.txt"),
            Err(LogParseError::BadFileName(_))
        ));
        assert!(matches!(
            ligand_and_seed("lig1-log-final.txt"),
            Err(LogParseError::BadFileName(_))
        ));
    }

    #[test]
    fn parses_vina_table() {
        let modes = parse_binding_modes(&example_log()).unwrap();
        assert_eq!(modes.len(), 9);
        assert_eq!(
            modes[0],
            BindingMode {
                mode: 1,
                affinity: -7.3,
                rmsd_lb: 0.0,
                rmsd_ub: 0.0
            }
        );
        assert_eq!(modes[7].mode, 8);
        assert_eq!(modes[7].rmsd_ub, 14.33);
    }

    #[test]
    fn table_window_is_bounded() {
        // Rows past the last table line are ignored
        let mut text = example_log().replace("Writing output ... done.", "  10   -5.9   4.0   6.0");
        text.push_str("  11   -5.8   4.1   6.1\n");
        let modes = parse_binding_modes(&text).unwrap();
        assert_eq!(modes.len(), 10);
        assert_eq!(modes[9].mode, 10);
    }

    #[test]
    fn short_log_is_rejected() {
        let text: String = example_log().lines().take(20).map(|l| format!("{l}\n")).collect();
        assert!(matches!(
            parse_binding_modes(&text),
            Err(LogParseError::TooShort {
                lines: 20,
                expected: TABLE_FIRST_LINE
            })
        ));
    }

    #[test]
    fn garbled_logs_are_rejected() {
        let garbled = example_log().replace("-6.9", "-6.x");
        assert!(matches!(
            parse_binding_modes(&garbled),
            Err(LogParseError::MalformedRow { line: 28, .. })
        ));

        let missing_field = example_log().replace("-6.9      2.015", "-6.9");
        assert!(matches!(
            parse_binding_modes(&missing_field),
            Err(LogParseError::MalformedRow { line: 28, .. })
        ));

        let shifted = format!("Extra banner line\n{}", example_log());
        assert!(matches!(
            parse_binding_modes(&shifted),
            Err(LogParseError::MissingTable { line: TABLE_FIRST_LINE })
        ));
    }

    #[test]
    fn extraction_skips_bad_files() {
        let dir = tempfile::tempdir().unwrap();
        let logs5 = dir.path().join("logs-5");
        let logs7 = dir.path().join("logs-7");
        std::fs::create_dir(&logs5).unwrap();
        std::fs::create_dir(&logs7).unwrap();

        std::fs::write(logs5.join("lig1-log-5.txt"), example_log()).unwrap();
        std::fs::write(logs5.join("lig2-log-5.txt"), example_log()).unwrap();
        std::fs::write(logs7.join("lig1-log-7.txt"), "mode | affinity\n").unwrap();
        std::fs::write(logs7.join("lig2-log-7.txt"), [0xff, 0xfe, 0x00]).unwrap();

        let extraction = extract_logs(dir.path()).unwrap();
        assert_eq!(extraction.records.len(), 18);
        assert_eq!(extraction.skipped.len(), 2);
        assert!(matches!(
            extraction.skipped[0].1,
            LogParseError::TooShort { lines: 1, .. }
        ));
        assert!(matches!(extraction.skipped[1].1, LogParseError::NotUtf8));

        assert_eq!(extraction.records[0].ligand, "lig1");
        assert_eq!(extraction.records[9].ligand, "lig2");
        assert!(extraction.records.iter().all(|r| r.seed == 5));
    }

    #[derive(Clone, Default)]
    struct CapturedLog(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn skipped_log_is_warned_about() {
        let dir = tempfile::tempdir().unwrap();
        let logs = dir.path().join("logs-7");
        std::fs::create_dir(&logs).unwrap();
        std::fs::write(logs.join("lig1-log-7.txt"), "mode | affinity\n").unwrap();
        std::fs::write(logs.join("lig2-log-7.txt"), example_log()).unwrap();

        let captured = CapturedLog::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();
        let extraction =
            tracing::subscriber::with_default(subscriber, || extract_logs(dir.path())).unwrap();

        assert_eq!(extraction.records.len(), 9);
        assert_eq!(extraction.skipped.len(), 1);

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("WARN"));
        assert!(output.contains("Error could not read file"));
        assert!(output.contains("lig1-log-7.txt"));
        assert!(!output.contains("lig2-log-7.txt"));
    }

    #[test]
    fn writes_binding_affinity_csv() {
        let dir = tempfile::tempdir().unwrap();
        let logs = dir.path().join("logs-5");
        std::fs::create_dir(&logs).unwrap();
        std::fs::write(logs.join("lig1-log-5.txt"), example_log()).unwrap();

        let (df, path) = collect_binding_data(dir.path(), DataFrameFileType::Csv).unwrap();
        assert_eq!(path, dir.path().join("results").join("binding-affinity-data.csv"));
        assert_eq!(df.height(), 9);
        assert_eq!(
            df.get_column_names()
                .iter()
                .map(|c| c.as_str())
                .collect::<Vec<&str>>(),
            COLUMNS.to_vec()
        );

        let csv = std::fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(
            lines[0],
            "ligand,seed,binding mode,affinity (kcal/mol),distance from best mode rmsd l.b,distance from best mode rmsd u.b"
        );
        assert!(lines[1].starts_with("lig1,5,1,-7.3,"));
    }

    #[test]
    fn best_modes_sorted_by_affinity() {
        let weak = BindingMode {
            mode: 1,
            affinity: -5.0,
            rmsd_lb: 0.0,
            rmsd_ub: 0.0,
        };
        let records = vec![
            LogRecord {
                ligand: "weak".to_string(),
                seed: 0,
                binding_mode: weak,
            },
            LogRecord {
                ligand: "strong".to_string(),
                seed: 0,
                binding_mode: BindingMode {
                    affinity: -9.0,
                    ..weak
                },
            },
            LogRecord {
                ligand: "strong".to_string(),
                seed: 0,
                binding_mode: BindingMode {
                    mode: 2,
                    affinity: -8.5,
                    ..weak
                },
            },
        ];
        let df = best_modes(&records_to_df(&records).unwrap()).unwrap();
        assert_eq!(df.height(), 2);
        let ligands = df.column("ligand").unwrap().str().unwrap();
        assert_eq!(ligands.get(0), Some("strong"));
        assert_eq!(ligands.get(1), Some("weak"));
    }

    #[test]
    fn empty_workdir_gives_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let (df, path) = collect_binding_data(dir.path(), DataFrameFileType::Csv).unwrap();
        assert_eq!(df.height(), 0);
        assert!(dir.path().join(RESULTS_DIR).is_dir());
        assert_eq!(std::fs::read_to_string(path).unwrap().lines().count(), 1);
    }
}
