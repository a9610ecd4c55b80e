//! CSV transcoding for a single sheet.

use crate::workbook::Sheet;
use cellsheet_engine::engine::CellId;

/// Split CSV text into rows of trimmed fields.
pub fn parse_csv(content: &str) -> Vec<Vec<String>> {
    content.lines().map(parse_csv_line).collect()
}

/// Parse a single CSV line, handling quoted fields.
///
/// A `"` opens a quoted section only as the first non-blank character of a
/// field; elsewhere it is literal text. Commas inside quotes do not split,
/// surrounding quotes are removed, `""` inside quotes is a literal quote, and
/// every field is trimmed.
pub(crate) fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                // Check for escaped quote
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(c);
            }
        } else {
            match c {
                '"' if current.trim().is_empty() => in_quotes = true,
                ',' => fields.push(std::mem::take(&mut current).trim().to_string()),
                _ => current.push(c),
            }
        }
    }
    fields.push(current.trim().to_string());
    fields
}

/// Serialize a sheet's visible values over its used rectangle
/// (row 1..max row, column A..max column), one quoted field per cell.
/// Cells outside the 26 x 100 grid are not exported.
pub fn write_csv(sheet: &Sheet) -> String {
    let (max_col, max_row) = sheet
        .values()
        .filter(|(id, _)| id.in_grid())
        .fold((0usize, 0usize), |(col, row), (id, _)| (col.max(id.col), row.max(id.row)));

    let mut out = String::new();
    for row in 0..=max_row {
        let fields: Vec<String> = (0..=max_col)
            .map(|col| quote_field(&sheet.display(CellId::new(col, row))))
            .collect();
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    out
}

fn quote_field(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellsheet_engine::engine::StoredValue;

    fn id(name: &str) -> CellId {
        CellId::parse(name).unwrap()
    }

    #[test]
    fn test_parse_csv_line_simple() {
        assert_eq!(parse_csv_line("a,b,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_parse_csv_line_quoted() {
        assert_eq!(
            parse_csv_line(r#"a,"hello, world",c"#),
            vec!["a", "hello, world", "c"]
        );
    }

    #[test]
    fn test_parse_csv_line_trims_fields() {
        assert_eq!(parse_csv_line(r#" a , "  b  ",c "#), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_parse_csv_line_escaped_quotes() {
        assert_eq!(
            parse_csv_line(r#"a,"say ""hello""",c"#),
            vec!["a", r#"say "hello""#, "c"]
        );
    }

    #[test]
    fn test_parse_csv_line_mid_field_quotes_are_literal() {
        assert_eq!(parse_csv_line(r#"5",x,y"#), vec!["5\"", "x", "y"]);
        assert_eq!(
            parse_csv_line(r#"he said "hi",z"#),
            vec![r#"he said "hi""#, "z"]
        );
        assert_eq!(parse_csv_line(r#"  "a,b" ,c"#), vec!["a,b", "c"]);
    }

    #[test]
    fn test_parse_csv_line_keeps_empty_fields() {
        assert_eq!(parse_csv_line(",x,"), vec!["", "x", ""]);
        assert_eq!(parse_csv_line(""), vec![""]);
    }

    #[test]
    fn test_parse_csv_handles_crlf() {
        assert_eq!(
            parse_csv("a,b\r\nc,d\r\n"),
            vec![vec!["a", "b"], vec!["c", "d"]]
        );
    }

    #[test]
    fn test_write_csv_bounding_rectangle() {
        let mut sheet = Sheet::new("Sheet1");
        sheet.set_value(id("A1"), StoredValue::text("x"));
        sheet.set_value(id("C2"), StoredValue::text("y"));
        assert_eq!(write_csv(&sheet), "\"x\",\"\",\"\"\n\"\",\"\",\"y\"\n");
    }

    #[test]
    fn test_write_csv_empty_sheet() {
        assert_eq!(write_csv(&Sheet::new("Sheet1")), "\"\"\n");
    }

    #[test]
    fn test_write_csv_ignores_cells_outside_grid() {
        let mut sheet = Sheet::new("Sheet1");
        sheet.set_value(id("B1"), StoredValue::text("in"));
        sheet.set_value(CellId::new(0, 1_999_999), StoredValue::text("far"));
        sheet.set_value(CellId::new(400, 0), StoredValue::text("wide"));
        assert_eq!(write_csv(&sheet), "\"\",\"in\"\n");

        let mut far_only = Sheet::new("Sheet1");
        far_only.set_value(CellId::new(0, 2_000_000), StoredValue::text("far"));
        assert_eq!(write_csv(&far_only), "\"\"\n");
    }

    #[test]
    fn test_write_csv_escapes_quotes() {
        let mut sheet = Sheet::new("Sheet1");
        sheet.set_value(id("A1"), StoredValue::text("a \"b\""));
        assert_eq!(write_csv(&sheet), "\"a \"\"b\"\"\"\n");
    }
}
