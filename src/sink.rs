// Per-table CSV output. One sink per table name, created on first sight.

use crate::error::{ExtractError, Result};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

#[cfg(windows)]
const LINE_TERMINATOR: csv::Terminator = csv::Terminator::CRLF;
#[cfg(not(windows))]
const LINE_TERMINATOR: csv::Terminator = csv::Terminator::Any(b'\n');

pub struct TableSink {
    table: String,
    path: PathBuf,
    writer: csv::Writer<File>,
    rows: u64,
}

impl TableSink {
    // Create (or truncate) `<dir>/<table>.csv`. The directory itself must
    // already exist; it is never created here.
    pub fn create(output_dir: &Path, table: &str) -> Result<Self> {
        let path = output_dir.join(format!("{}.csv", table));
        let file = File::create(&path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound && !output_dir.is_dir() {
                ExtractError::OutputDirMissing {
                    path: output_dir.to_path_buf(),
                }
            } else {
                ExtractError::CreateSink {
                    path: path.clone(),
                    source,
                }
            }
        })?;

        // Tuples of one table may differ in arity, so records are flexible.
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .flexible(true)
            .terminator(LINE_TERMINATOR)
            .from_writer(file);

        Ok(Self {
            table: table.to_string(),
            path,
            writer,
            rows: 0,
        })
    }

    pub fn write_row(&mut self, row: &[String]) -> Result<()> {
        self.writer
            .write_record(row)
            .map_err(|source| ExtractError::WriteRow {
                table: self.table.clone(),
                source,
            })?;
        self.rows += 1;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().map_err(|source| ExtractError::Flush {
            table: self.table.clone(),
            source,
        })
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn rows(&self) -> u64 {
        self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn row(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_writes_minimal_quoting() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = TableSink::create(dir.path(), "shippers").unwrap();
        sink.write_row(&row(&["1", "Speedy, Express", "say \"hi\""]))
            .unwrap();
        sink.write_row(&row(&["2", "United Package"])).unwrap();
        sink.flush().unwrap();

        let text = fs::read_to_string(dir.path().join("shippers.csv")).unwrap();
        let expected = format!(
            "1,\"Speedy, Express\",\"say \"\"hi\"\"\"{nl}2,United Package{nl}",
            nl = if cfg!(windows) { "\r\n" } else { "\n" }
        );
        assert_eq!(text, expected);
        assert_eq!(sink.rows(), 2);
        assert_eq!(sink.table(), "shippers");
    }

    #[test]
    fn test_missing_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("csv");
        let err = TableSink::create(&missing, "orders").err().unwrap();
        assert!(matches!(err, ExtractError::OutputDirMissing { .. }));
    }

    #[test]
    fn test_create_truncates_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("region.csv");
        fs::write(&path, "stale\n").unwrap();

        let mut sink = TableSink::create(dir.path(), "region").unwrap();
        sink.flush().unwrap();
        assert_eq!(sink.path(), path.as_path());
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }
}
