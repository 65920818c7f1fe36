// Fatal error conditions. Parsing anomalies are never errors; only I/O is.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("cannot open input file {}: {source}", path.display())]
    OpenInput { path: PathBuf, source: io::Error },

    #[error("failed to read {} at line {line}: {source}", path.display())]
    ReadInput {
        path: PathBuf,
        line: usize,
        source: io::Error,
    },

    #[error("output directory {} does not exist", path.display())]
    OutputDirMissing { path: PathBuf },

    #[error("cannot create CSV file {}: {source}", path.display())]
    CreateSink { path: PathBuf, source: io::Error },

    #[error("failed to write row for table {table}: {source}")]
    WriteRow { table: String, source: csv::Error },

    #[error("failed to flush CSV for table {table}: {source}")]
    Flush { table: String, source: io::Error },

    #[error("failed to write summary report {}: {source}", path.display())]
    Report { path: PathBuf, source: io::Error },

    #[error("failed to encode summary report: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ExtractError>;
