// Row/value parsing for the data lines of an INSERT statement.
// Everything here is best effort: malformed tuples produce partial values
// and are counted, never reported as errors.

use crate::parser::Row;
use regex::Regex;
use std::sync::OnceLock;

// Text written in place of `\x...` binary literals.
pub const BINARY_PLACEHOLDER: &str = "[BINARY]";

// Rows found on one line plus what the scanner had to paper over.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub rows: Vec<Row>,
    pub binary_values: usize,
    pub malformed_tuples: usize,
}

// A tuple is `(` ... `)` with non-empty content that may hold parenthesized
// segments one level deep. A lone `(` (say inside a string literal) is
// taken as plain text. Deeper nesting is not balanced.
fn tuple_re() -> &'static Regex {
    static TUPLE_RE: OnceLock<Regex> = OnceLock::new();
    TUPLE_RE.get_or_init(|| {
        Regex::new(r"\(((?:[^()]|\([^()]*\)|\()+)\)").expect("valid tuple regex")
    })
}

// Parses every tuple on `line` into a row.
pub fn parse_values_line(line: &str) -> Vec<Row> {
    parse_values_line_detailed(line).rows
}

pub fn parse_values_line_detailed(line: &str) -> ParsedLine {
    let trimmed = line.trim();
    let body = trimmed
        .strip_suffix(|c: char| c == ',' || c == ';')
        .unwrap_or(trimmed);

    let mut parsed = ParsedLine::default();
    for cap in tuple_re().captures_iter(body) {
        let Some(content) = cap.get(1) else {
            continue;
        };
        let split = split_fields(content.as_str());
        if split.malformed {
            parsed.malformed_tuples += 1;
        }
        parsed.binary_values += split.binary_values;
        if !split.fields.is_empty() {
            parsed.rows.push(split.fields);
        }
    }
    parsed
}

struct SplitTuple {
    fields: Row,
    binary_values: usize,
    malformed: bool,
}

// Single left-to-right scan. A comma splits fields only outside a string
// literal and at paren depth zero. A quote after a backslash never toggles,
// and `''` inside a literal is an escaped quote, not a close.
fn split_fields(content: &str) -> SplitTuple {
    let mut fields = Vec::new();
    let mut binary_values = 0usize;
    let mut current = String::new();
    let mut in_quote = false;
    let mut depth = 0i32;
    let mut prev: Option<char> = None;

    let mut flush = |raw: &str, fields: &mut Row| {
        if is_binary_literal(raw.trim()) {
            binary_values += 1;
        }
        fields.push(parse_sql_value(raw));
    };

    let mut chars = content.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\'' if prev != Some('\\') => {
                if in_quote && chars.peek() == Some(&'\'') {
                    chars.next();
                    current.push_str("''");
                } else {
                    in_quote = !in_quote;
                    current.push(c);
                }
            }
            '(' if !in_quote => {
                depth += 1;
                current.push(c);
            }
            ')' if !in_quote => {
                depth -= 1;
                current.push(c);
            }
            ',' if !in_quote && depth == 0 => {
                flush(&current, &mut fields);
                current.clear();
            }
            _ => current.push(c),
        }
        prev = Some(c);
    }

    if !current.is_empty() {
        flush(&current, &mut fields);
    }

    SplitTuple {
        fields,
        binary_values,
        malformed: in_quote || depth != 0,
    }
}

fn is_binary_literal(value: &str) -> bool {
    value.starts_with("\\x") || value.starts_with("'\\x")
}

// Normalizes one raw field: unquoted `NULL` becomes empty, binary literals
// become `BINARY_PLACEHOLDER`, quoted strings lose their quotes and have
// `''` unescaped. Anything else is returned trimmed.
pub fn parse_sql_value(raw: &str) -> String {
    let value = raw.trim();

    if value.eq_ignore_ascii_case("NULL") {
        return String::new();
    }

    if is_binary_literal(value) {
        return BINARY_PLACEHOLDER.to_string();
    }

    if value.len() >= 2 && value.starts_with('\'') && value.ends_with('\'') {
        return value[1..value.len() - 1].replace("''", "'");
    }

    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(values: &[&str]) -> Row {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_mixed_tuple() {
        let rows = parse_values_line(r"('Alice''s', 5, NULL, '\xDEAD')");
        assert_eq!(rows, vec![row(&["Alice's", "5", "", "[BINARY]"])]);
    }

    #[test]
    fn test_two_tuples_on_one_line() {
        let rows = parse_values_line("(1,'a'),(2,'b');");
        assert_eq!(rows, vec![row(&["1", "a"]), row(&["2", "b"])]);
    }

    #[test]
    fn test_trailing_comma_line() {
        let rows = parse_values_line("\t(1, 'Acme Corp', NULL),\n");
        assert_eq!(rows, vec![row(&["1", "Acme Corp", ""])]);
    }

    #[test]
    fn test_null_is_case_insensitive() {
        assert_eq!(parse_sql_value("null"), "");
        assert_eq!(parse_sql_value("Null"), "");
        assert_eq!(parse_sql_value(" NULL "), "");
    }

    #[test]
    fn test_quoted_null_stays_text() {
        assert_eq!(parse_sql_value("'NULL'"), "NULL");
        assert_eq!(parse_sql_value("'null'"), "null");
    }

    #[test]
    fn test_value_parsing_is_idempotent() {
        for raw in ["'Bob''s Shop'", " 42 ", "NULL", r"'\x00FF'", "'2024-01-01'"] {
            assert_eq!(parse_sql_value(raw), parse_sql_value(raw));
        }
    }

    #[test]
    fn test_binary_literals() {
        assert_eq!(parse_sql_value(r"'\x1234'"), BINARY_PLACEHOLDER);
        assert_eq!(parse_sql_value(r"\xCAFE"), BINARY_PLACEHOLDER);
        assert_eq!(parse_sql_value(r"'x1234'"), "x1234");
    }

    #[test]
    fn test_numbers_and_dates_pass_through() {
        assert_eq!(parse_sql_value(" 3.14 "), "3.14");
        assert_eq!(parse_sql_value("'1996-07-04'"), "1996-07-04");
        assert_eq!(parse_sql_value("true"), "true");
    }

    #[test]
    fn test_single_quote_is_not_a_string() {
        assert_eq!(parse_sql_value("'"), "'");
        assert_eq!(parse_sql_value("''"), "");
        assert_eq!(parse_sql_value("''''"), "'");
    }

    #[test]
    fn test_commas_inside_strings() {
        let rows = parse_values_line("(1, 'Berlin, Germany', 'a,b,c'),");
        assert_eq!(rows, vec![row(&["1", "Berlin, Germany", "a,b,c"])]);
    }

    #[test]
    fn test_doubled_quote_before_comma() {
        let rows = parse_values_line("(1, 'it''s, fine', '', 'end''')");
        assert_eq!(rows, vec![row(&["1", "it's, fine", "", "end'"])]);
    }

    #[test]
    fn test_backslash_escaped_quote_does_not_toggle() {
        let rows = parse_values_line(r"(1, 'it\'s, ok', 2)");
        assert_eq!(rows, vec![row(&["1", r"it\'s, ok", "2"])]);
    }

    #[test]
    fn test_one_level_of_nested_parens() {
        let rows = parse_values_line("(1, now(), point(1, 2), 'x'),");
        assert_eq!(rows, vec![row(&["1", "now()", "point(1, 2)", "x"])]);
    }

    #[test]
    fn test_deeper_nesting_is_not_balanced() {
        // The tuple ends at the first `)` past the one-level group.
        let parsed = parse_values_line_detailed("(1, f(g(2)))");
        assert_eq!(parsed.rows, vec![row(&["1", "f(g(2)"])]);
        assert_eq!(parsed.malformed_tuples, 1);
    }

    #[test]
    fn test_unclosed_paren_inside_string() {
        let parsed = parse_values_line_detailed("(7, 'Note (see below', 2),");
        assert_eq!(parsed.rows, vec![row(&["7", "Note (see below", "2"])]);
        assert_eq!(parsed.malformed_tuples, 0);

        let rows = parse_values_line("(8, 'smile :(', 'x'),");
        assert_eq!(rows, vec![row(&["8", "smile :(", "x"])]);
    }

    #[test]
    fn test_empty_tuples_are_dropped() {
        assert!(parse_values_line("()").is_empty());
        assert_eq!(parse_values_line("(),(7)"), vec![row(&["7"])]);
    }

    #[test]
    fn test_trailing_separator_inside_tuple() {
        assert_eq!(parse_values_line("(1,)"), vec![row(&["1"])]);
        assert_eq!(parse_values_line("(1, )"), vec![row(&["1", ""])]);
    }

    #[test]
    fn test_lines_without_tuples() {
        assert!(parse_values_line("").is_empty());
        assert!(parse_values_line(";").is_empty());
        assert!(parse_values_line("-- just text, no tuples").is_empty());
    }

    #[test]
    fn test_unterminated_string_is_counted() {
        let parsed = parse_values_line_detailed("(1, 'abc),");
        assert_eq!(parsed.rows, vec![row(&["1", "'abc"])]);
        assert_eq!(parsed.malformed_tuples, 1);
    }

    #[test]
    fn test_detailed_counters() {
        let parsed = parse_values_line_detailed(r"(1, '\xAA'),(2, \xBB),(3, 'ok');");
        assert_eq!(parsed.rows.len(), 3);
        assert_eq!(parsed.binary_values, 2);
        assert_eq!(parsed.malformed_tuples, 0);
    }
}
