use std::path::PathBuf;
use thiserror::Error;

/// Failures while reading answers from the console.
#[derive(Debug, Error)]
pub enum InputError {
    /// Input ended before a valid answer was given.
    #[error("input closed while waiting for '{prompt}'")]
    Closed {
        /// The prompt that was left unanswered.
        prompt: String,
    },

    /// Reading from or writing to the console failed.
    #[error("console I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Reasons a single docking log could not be turned into rows.
#[derive(Debug, Error)]
pub enum LogParseError {
    /// The log could not be read at all.
    #[error("could not read log file: {0}")]
    Io(#[from] std::io::Error),

    /// The log is not valid UTF-8.
    #[error("log file is not valid UTF-8")]
    NotUtf8,

    /// The log ends before the binding mode table starts.
    #[error("log has {lines} lines, the result table starts at line {expected}")]
    TooShort {
        /// Number of lines in the file.
        lines: usize,
        /// First line (1-based) of the result table.
        expected: usize,
    },

    /// The first line of the table window is not a binding mode row.
    #[error("no binding mode table at line {line}")]
    MissingTable {
        /// Line number (1-based) where the table was expected.
        line: usize,
    },

    /// A table row has the wrong number of fields or a non-numeric field.
    #[error("malformed binding mode row at line {line}: '{content}'")]
    MalformedRow {
        /// Line number (1-based).
        line: usize,
        /// Trimmed text of the offending line.
        content: String,
    },

    /// The seed could not be recovered from the log file name.
    #[error("cannot derive a seed from file name '{0}'")]
    BadFileName(String),
}

/// Top level error of the docking workflow.
#[derive(Debug, Error)]
pub enum AvaError {
    /// Filesystem failure outside of the recoverable cases.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Path being accessed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// Console interaction failed.
    #[error(transparent)]
    Input(#[from] InputError),

    /// Building or writing the result table failed.
    #[error("failed to build result table: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

impl AvaError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AvaError::Io {
            path: path.into(),
            source,
        }
    }
}
