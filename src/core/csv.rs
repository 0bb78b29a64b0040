//! core::csv
//!
//! Spreadsheet-friendly CSV export.
//!
//! # Format
//!
//! The output is a relaxed rendition of RFC 4180: cells joined with
//! commas, rows terminated with CRLF (including the last row), and a
//! UTF-8 byte-order mark prefixed so spreadsheet applications detect the
//! encoding. No check is made that all rows have the same number of
//! columns.
//!
//! # Quoting
//!
//! Per RFC 4180 section 2 rules 6 and 7: a quote inside a cell is doubled,
//! and any cell containing a quote, comma, carriage return, or line feed
//! is wrapped in quotes.

/// UTF-8 byte-order mark prefixed to the output.
const BOM: char = '\u{FEFF}';

/// Escape one cell for CSV output.
fn escape_cell(cell: &str) -> String {
    let needs_quoting =
        cell.contains('"') || cell.contains(',') || cell.contains('\n') || cell.contains('\r');
    let doubled = cell.replace('"', "\"\"");
    if needs_quoting {
        format!("\"{}\"", doubled)
    } else {
        doubled
    }
}

/// Append a row of cells to CSV data, escaping each cell.
pub fn add_row(data: &mut Vec<Vec<String>>, row: &[String]) {
    data.push(row.iter().map(|cell| escape_cell(cell)).collect());
}

/// Combine already-escaped rows into a single CSV string.
///
/// The result starts with a UTF-8 BOM and every row (the last included)
/// ends with `\r\n`.
pub fn to_csv(data: &[Vec<String>]) -> String {
    let mut out = String::new();
    out.push(BOM);
    for row in data {
        out.push_str(&row.join(","));
        out.push_str("\r\n");
    }
    out
}

/// Convert raw TSV content to CSV.
///
/// Rows split on line feeds, cells on tabs; trailing whitespace is trimmed
/// first so trailing blank lines do not become empty rows.
pub fn from_tsv(content: &str) -> String {
    let mut data = Vec::new();
    for line in content.trim_end().split('\n') {
        let cells: Vec<String> = line.split('\t').map(str::to_owned).collect();
        add_row(&mut data, &cells);
    }
    to_csv(&data)
}
