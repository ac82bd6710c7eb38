use crate::error::AvaError;
use polars::prelude::*;
use std::path::{Path, PathBuf};

/// Seed encoded in a per-seed directory name such as `logs-12`.
///
/// The part after `{prefix}-` must be an integer written with digits only,
/// optionally preceded by a minus sign for negative seeds.
pub fn seed_from_dir_name(name: &str, prefix: &str) -> Option<i64> {
    let suffix = name.strip_prefix(prefix)?.strip_prefix('-')?;
    let digits = suffix.strip_prefix('-').unwrap_or(suffix);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    suffix.parse().ok()
}

/// Directories directly under `workdir` named `{prefix}-<seed>`, sorted by seed.
pub fn list_seed_dirs(workdir: &Path, prefix: &str) -> Result<Vec<(i64, PathBuf)>, AvaError> {
    let entries = std::fs::read_dir(workdir).map_err(|e| AvaError::io(workdir, e))?;

    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| AvaError::io(workdir, e))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        if let Some(seed) = seed_from_dir_name(&entry.file_name().to_string_lossy(), prefix) {
            dirs.push((seed, path));
        }
    }
    dirs.sort();
    Ok(dirs)
}

/// Regular files directly inside `dir`, sorted by name.
pub fn list_files(dir: &Path) -> Result<Vec<PathBuf>, AvaError> {
    let entries = std::fs::read_dir(dir).map_err(|e| AvaError::io(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| AvaError::io(dir, e))?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Write a DataFrame to `file_path`, replacing its extension with the one of `file_type`.
///
/// Returns the path that was written.
pub fn write_df_to_file(
    df: &mut DataFrame,
    file_path: &Path,
    file_type: DataFrameFileType,
) -> Result<PathBuf, AvaError> {
    let output_file = file_path.with_extension(file_type.to_string());
    let mut file =
        std::fs::File::create(&output_file).map_err(|e| AvaError::io(&output_file, e))?;
    match file_type {
        DataFrameFileType::Csv => {
            CsvWriter::new(&mut file).include_header(true).finish(df)?;
        }
        DataFrameFileType::Parquet => {
            ParquetWriter::new(&mut file).finish(df)?;
        }
        DataFrameFileType::Json => {
            JsonWriter::new(&mut file)
                .with_json_format(JsonFormat::Json)
                .finish(df)?;
        }
        DataFrameFileType::NDJson => {
            JsonWriter::new(&mut file)
                .with_json_format(JsonFormat::JsonLines)
                .finish(df)?;
        }
    }
    Ok(output_file)
}

/// File format for writing DataFrames.
#[derive(clap::ValueEnum, Clone, Debug, Copy, PartialEq, Eq)]
pub enum DataFrameFileType {
    /// Comma-separated values
    Csv,
    /// Parquet columnar storage
    Parquet,
    /// Standard JSON
    Json,
    /// Newline-delimited JSON
    NDJson,
}

impl std::fmt::Display for DataFrameFileType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            DataFrameFileType::Csv => write!(f, "csv"),
            DataFrameFileType::Parquet => write!(f, "parquet"),
            DataFrameFileType::Json => write!(f, "json"),
            DataFrameFileType::NDJson => write!(f, "ndjson"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_dir_names() {
        assert_eq!(seed_from_dir_name("logs-7", "logs"), Some(7));
        assert_eq!(seed_from_dir_name("logs-0012", "logs"), Some(12));
        assert_eq!(seed_from_dir_name("logs--3", "logs"), Some(-3));
        assert_eq!(seed_from_dir_name("conformations-42", "conformations"), Some(42));

        assert_eq!(seed_from_dir_name("logs-", "logs"), None);
        assert_eq!(seed_from_dir_name("logs-7a", "logs"), None);
        assert_eq!(seed_from_dir_name("logs-+7", "logs"), None);
        assert_eq!(seed_from_dir_name("logs7", "logs"), None);
        assert_eq!(seed_from_dir_name("oldlogs-7", "logs"), None);
        assert_eq!(seed_from_dir_name("conformations-7", "logs"), None);
    }

    #[test]
    fn lists_only_matching_directories() {
        let dir = tempfile::tempdir().unwrap();
        for d in ["logs-10", "logs-2", "logs-x", "results", "conformations-2"] {
            std::fs::create_dir(dir.path().join(d)).unwrap();
        }
        // A plain file with a matching name is not a log directory
        std::fs::write(dir.path().join("logs-3"), "").unwrap();

        let found = list_seed_dirs(dir.path(), "logs").unwrap();
        assert_eq!(
            found,
            vec![
                (2, dir.path().join("logs-2")),
                (10, dir.path().join("logs-10"))
            ]
        );
    }

    #[test]
    fn writes_csv_with_header() {
        let dir = tempfile::tempdir().unwrap();
        let mut df = df!(
            "ligand" => ["lig1", "lig2"],
            "affinity (kcal/mol)" => [-7.5, -6.25],
        )
        .unwrap();

        let path = write_df_to_file(
            &mut df,
            &dir.path().join("table.txt"),
            DataFrameFileType::Csv,
        )
        .unwrap();
        assert_eq!(path, dir.path().join("table.csv"));
        assert_eq!(
            std::fs::read_to_string(path).unwrap(),
            "ligand,affinity (kcal/mol)\nlig1,-7.5\nlig2,-6.25\n"
        );
    }
}
