// Split the `INSERT INTO ... VALUES` data of a SQL dump into one CSV file
// per table.
//
// The dump is read line by line. A line such as
// `INSERT INTO public.customers VALUES` opens a statement for `customers`;
// following tuple lines are parsed into rows and appended to
// `<output_dir>/customers.csv` until a line ending in `;` closes it.

pub mod error;
pub mod extractor;
pub mod logger;
pub mod parser;
pub mod progress;
pub mod sink;

pub use error::{ExtractError, Result};
pub use extractor::{extract_file, ExtractSummary, Extractor, LineOutcome, TableSummary};
pub use parser::{parse_sql_value, parse_values_line, Row};
