// Extraction pipeline: walk the dump line by line, track the table whose
// INSERT statement is open, and route parsed rows into that table's sink.

use crate::error::{ExtractError, Result};
use crate::logger;
use crate::parser::header::{is_comment, is_statement_end};
use crate::parser::{parse_values_line_detailed, HeaderDetector};
use crate::progress::InputProgress;
use crate::sink::TableSink;
use serde::Serialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

// What a single input line did to the extraction state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    // An INSERT header; `first_seen` is false when the table's sink was reused.
    Header { table: String, first_seen: bool },
    // A data line routed to the active table.
    Rows { count: usize, statement_closed: bool },
    // Nothing happened: no active table, blank line or comment.
    Ignored,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableSummary {
    pub name: String,
    pub file: PathBuf,
    pub rows: u64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ExtractSummary {
    pub output_dir: PathBuf,
    pub tables: Vec<TableSummary>,
    pub lines_read: u64,
    pub rows_written: u64,
    pub binary_values: u64,
    pub malformed_tuples: u64,
}

// Holds the sink registry and the active-table slot for one run.
pub struct Extractor {
    output_dir: PathBuf,
    detector: HeaderDetector,
    // Sinks in discovery order; `index` maps table name to position.
    sinks: Vec<TableSink>,
    index: HashMap<String, usize>,
    active: Option<usize>,
    lines_read: u64,
    binary_values: u64,
    malformed_tuples: u64,
}

impl Extractor {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            detector: HeaderDetector::new(),
            sinks: Vec::new(),
            index: HashMap::new(),
            active: None,
            lines_read: 0,
            binary_values: 0,
            malformed_tuples: 0,
        }
    }

    pub fn active_table(&self) -> Option<&str> {
        self.active.map(|i| self.sinks[i].table())
    }

    pub fn table_count(&self) -> usize {
        self.sinks.len()
    }

    // `line_no` is 1-based and only used for diagnostics.
    pub fn process_line(&mut self, line_no: usize, line: &str) -> Result<LineOutcome> {
        self.lines_read += 1;

        if let Some(table) = self.detector.match_header(line) {
            let (idx, first_seen) = self.sink_for(table)?;
            self.active = Some(idx);
            logger::debug(&format!(
                "Extract: line {}: INSERT header for {}{}",
                line_no,
                table,
                if first_seen { "" } else { " (appending)" }
            ));
            return Ok(LineOutcome::Header {
                table: table.to_string(),
                first_seen,
            });
        }

        let Some(idx) = self.active else {
            return Ok(LineOutcome::Ignored);
        };
        if line.trim().is_empty() || is_comment(line) {
            return Ok(LineOutcome::Ignored);
        }

        let parsed = parse_values_line_detailed(line);
        self.binary_values += parsed.binary_values as u64;
        if parsed.malformed_tuples > 0 {
            self.malformed_tuples += parsed.malformed_tuples as u64;
            logger::debug(&format!(
                "Extract: line {}: {} tuple(s) with unbalanced quotes or parentheses in {}",
                line_no,
                parsed.malformed_tuples,
                self.sinks[idx].table()
            ));
        }

        let sink = &mut self.sinks[idx];
        for row in &parsed.rows {
            sink.write_row(row)?;
        }

        let statement_closed = is_statement_end(line);
        if statement_closed {
            logger::debug(&format!(
                "Extract: line {}: end of INSERT for {}",
                line_no,
                sink.table()
            ));
            self.active = None;
        }

        Ok(LineOutcome::Rows {
            count: parsed.rows.len(),
            statement_closed,
        })
    }

    // Reuse the sink of a table seen before; duplicate headers append.
    fn sink_for(&mut self, table: &str) -> Result<(usize, bool)> {
        if let Some(&idx) = self.index.get(table) {
            return Ok((idx, false));
        }
        let sink = TableSink::create(&self.output_dir, table)?;
        let idx = self.sinks.len();
        self.sinks.push(sink);
        self.index.insert(table.to_string(), idx);
        Ok((idx, true))
    }

    // Flushes every sink and reports what was written.
    pub fn finish(mut self) -> Result<ExtractSummary> {
        let mut tables = Vec::with_capacity(self.sinks.len());
        for sink in &mut self.sinks {
            sink.flush()?;
            tables.push(TableSummary {
                name: sink.table().to_string(),
                file: sink.path().to_path_buf(),
                rows: sink.rows(),
            });
        }
        let rows_written = tables.iter().map(|t| t.rows).sum();

        Ok(ExtractSummary {
            output_dir: self.output_dir,
            tables,
            lines_read: self.lines_read,
            rows_written,
            binary_values: self.binary_values,
            malformed_tuples: self.malformed_tuples,
        })
    }
}

// Runs a full pass over `input`, writing `<output_dir>/<table>.csv` files.
// `on_new_table` is called once per newly discovered table.
pub fn extract_file<F>(
    input: &Path,
    output_dir: &Path,
    progress: &InputProgress,
    on_new_table: F,
) -> Result<ExtractSummary>
where
    F: FnMut(&str),
{
    let result = read_dump(input, output_dir, progress, on_new_table);
    // Cleared on every path so the bar never sits above an error line.
    progress.finish();

    let summary = result?;
    logger::debug(&format!(
        "Extract: {} lines, {} rows across {} tables",
        summary.lines_read,
        summary.rows_written,
        summary.tables.len()
    ));
    Ok(summary)
}

fn read_dump<F>(
    input: &Path,
    output_dir: &Path,
    progress: &InputProgress,
    mut on_new_table: F,
) -> Result<ExtractSummary>
where
    F: FnMut(&str),
{
    logger::debug(&format!("Extract: opening {}", input.display()));
    let file = File::open(input).map_err(|source| ExtractError::OpenInput {
        path: input.to_path_buf(),
        source,
    })?;
    let mut reader = BufReader::new(file);
    let mut extractor = Extractor::new(output_dir);

    let mut line = String::new();
    let mut line_no = 0usize;
    loop {
        line.clear();
        let read = reader
            .read_line(&mut line)
            .map_err(|source| ExtractError::ReadInput {
                path: input.to_path_buf(),
                line: line_no + 1,
                source,
            })?;
        if read == 0 {
            break;
        }
        line_no += 1;
        progress.inc(read as u64);

        if let LineOutcome::Header {
            table,
            first_seen: true,
        } = extractor.process_line(line_no, &line)?
        {
            on_new_table(&table);
        }
    }

    extractor.finish()
}
