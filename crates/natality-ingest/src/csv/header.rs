//! CSV header parsing and normalization.

/// Column names read from the first line of a CSV file.
#[derive(Debug, Clone)]
pub struct CsvHeaders {
    /// Column names as written, trimmed. Uppercasing happens in
    /// [`crate::YearSchema::new`].
    pub columns: Vec<String>,
}

impl CsvHeaders {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }
}

/// Normalizes a header value by trimming whitespace.
pub fn normalize_header(value: &str) -> String {
    value.trim().to_string()
}

/// Parses a CSV line into fields, handling quoted values.
pub fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if !in_quotes => {
                in_quotes = true;
            }
            '"' if in_quotes => {
                // Check for escaped quote ("")
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            ',' if !in_quotes => {
                fields.push(normalize_header(&current));
                current.clear();
            }
            _ => {
                current.push(c);
            }
        }
    }

    fields.push(normalize_header(&current));
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv_line_quoted() {
        let result = parse_csv_line("\"hello, world\",b,c");
        assert_eq!(result, vec!["hello, world", "b", "c"]);
    }

    #[test]
    fn test_parse_csv_line_escaped_quotes() {
        let result = parse_csv_line("\"he said \"\"hello\"\"\",b");
        assert_eq!(result, vec!["he said \"hello\"", "b"]);
    }

    #[test]
    fn test_parse_csv_line_trimmed() {
        let result = parse_csv_line("  a  ,  b  ");
        assert_eq!(result, vec!["a", "b"]);
    }
}
