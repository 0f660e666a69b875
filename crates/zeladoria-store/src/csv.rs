//! RFC 4180 text form of a [`SheetGrid`]
//!
//! Fields are quoted only when they contain a comma, a quote or a line
//! break. Rows end with `\n`. Decoding accepts `\r\n` and a leading BOM,
//! as written by spreadsheet exports.

use crate::error::{StoreError, StoreResult};
use crate::sheet::SheetGrid;

/// Render a grid as CSV text
pub fn encode(grid: &SheetGrid) -> String {
    let mut out = String::new();
    for row in &grid.rows {
        for (i, field) in row.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            push_field(&mut out, field);
        }
        out.push('\n');
    }
    out
}

fn push_field(out: &mut String, field: &str) {
    if field.contains([',', '"', '\n', '\r']) {
        out.push('"');
        out.push_str(&field.replace('"', "\"\""));
        out.push('"');
    } else {
        out.push_str(field);
    }
}

/// Parse CSV text into a grid
pub fn decode(input: &str) -> StoreResult<SheetGrid> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);

    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut quoted = false;
    let mut in_quotes = false;
    let mut line = 1;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                c => {
                    if c == '\n' {
                        line += 1;
                    }
                    field.push(c);
                }
            }
            continue;
        }

        match c {
            '"' if field.is_empty() && !quoted => {
                quoted = true;
                in_quotes = true;
            }
            '"' => {
                return Err(StoreError::malformed(line, "stray quote in unquoted field"));
            }
            ',' => {
                row.push(std::mem::take(&mut field));
                quoted = false;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
                quoted = false;
                line += 1;
            }
            c => field.push(c),
        }
    }

    if in_quotes {
        return Err(StoreError::malformed(line, "unterminated quoted field"));
    }
    if quoted || !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    Ok(SheetGrid::new(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn grid(rows: &[&[&str]]) -> SheetGrid {
        SheetGrid::new(
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn test_encode_quotes_only_when_needed() {
        let g = grid(&[&["a", "Main St, 10", "say \"hi\"", "two\nlines", ""]]);
        assert_eq!(
            encode(&g),
            "a,\"Main St, 10\",\"say \"\"hi\"\"\",\"two\nlines\",\n"
        );
    }

    #[test]
    fn test_decode_simple() {
        let g = decode("Protocol,Status\n1,Completed\n").unwrap();
        assert_eq!(g, grid(&[&["Protocol", "Status"], &["1", "Completed"]]));
    }

    #[test]
    fn test_decode_crlf_and_bom() {
        let g = decode("\u{feff}a,b\r\n1,2\r\n").unwrap();
        assert_eq!(g, grid(&[&["a", "b"], &["1", "2"]]));
    }

    #[test]
    fn test_decode_without_trailing_newline() {
        let g = decode("a,b\n1,").unwrap();
        assert_eq!(g, grid(&[&["a", "b"], &["1", ""]]));
    }

    #[test]
    fn test_decode_quoted_empty_field_at_end() {
        let g = decode("\"\"").unwrap();
        assert_eq!(g, grid(&[&[""]]));
    }

    #[test]
    fn test_decode_empty_input() {
        assert_eq!(decode("").unwrap(), SheetGrid::default());
    }

    #[test]
    fn test_decode_errors() {
        assert!(matches!(
            decode("a,\"open\n"),
            Err(StoreError::Malformed { .. })
        ));
        assert!(matches!(
            decode("ab\"c\n"),
            Err(StoreError::Malformed { row: 1, .. })
        ));
    }

    #[test]
    fn test_encode_is_stable_after_decode() {
        let text = "Protocol,Address\n001/2026,\"Main St, 10\"\n";
        assert_eq!(encode(&decode(text).unwrap()), text);
    }

    proptest! {
        #[test]
        fn prop_decode_inverts_encode(
            rows in prop::collection::vec(
                prop::collection::vec("[a-z ,\"\n]{0,8}", 1..5),
                0..6,
            )
        ) {
            let g = SheetGrid::new(rows);
            prop_assert_eq!(decode(&encode(&g)).unwrap(), g);
        }
    }
}
