// Statement detection: INSERT headers, statement ends, comment lines.
// Keywords are matched case-sensitively and only at the start of the line,
// which is what pg_dump style `--inserts` output produces.

use regex::Regex;

pub struct HeaderDetector {
    insert_re: Regex,
}

impl HeaderDetector {
    // Build the regex once for reuse across lines.
    pub fn new() -> Self {
        let insert_re = Regex::new(r"^INSERT INTO (?:\w+\.)?(\w+) VALUES")
            .expect("valid insert header regex");
        Self { insert_re }
    }

    // Returns the table name if `line` opens an `INSERT INTO ... VALUES`
    // statement. An optional schema qualifier is dropped.
    pub fn match_header<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.insert_re
            .captures(line)
            .and_then(|cap| cap.get(1))
            .map(|m| m.as_str())
    }
}

impl Default for HeaderDetector {
    fn default() -> Self {
        Self::new()
    }
}

pub fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with("--")
}

pub fn is_statement_end(line: &str) -> bool {
    line.trim_end().ends_with(';')
}
