// Parser module: INSERT header detection and tuple/value parsing.

pub mod header;
pub mod values;

// One parsed tuple, fields in source order, always as text.
pub type Row = Vec<String>;

pub use header::HeaderDetector;
pub use values::{parse_sql_value, parse_values_line, parse_values_line_detailed, ParsedLine};
