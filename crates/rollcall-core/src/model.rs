use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// A single cell value as produced by an extractor or read back from a sheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Bool(bool),
    Text(String),
}

impl CellValue {
    pub fn text(s: impl Into<String>) -> CellValue {
        CellValue::Text(s.into())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(f64::from(n))
    }
}

/// Rows of cells from one extracted table. Row widths may differ.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    pub rows: Vec<Vec<CellValue>>,
}

impl RawTable {
    pub fn new(rows: Vec<Vec<CellValue>>) -> Self {
        RawTable { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Row-wise union of every table extracted from one source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CombinedTable {
    pub rows: Vec<Vec<CellValue>>,
}

impl CombinedTable {
    /// Concatenate tables in order, aligning columns by position.
    pub fn concat(tables: Vec<RawTable>) -> CombinedTable {
        let rows = tables.into_iter().flat_map(|t| t.rows).collect();
        CombinedTable { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Widest row in the table.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

/// Classification of one data row in the subject column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// 1-based sheet row.
    pub row: u32,
    pub raw_value: CellValue,
    /// Parsed percentage, or `None` when the cell could not be read as a number.
    pub percentage: Option<f64>,
    pub flagged: bool,
}

/// A cell that receives the highlight fill. 1-based coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Highlight {
    pub row: u32,
    pub column: u16,
}

/// A rectangular 1-based cell range on a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRange {
    pub column: u16,
    pub first_row: u32,
    pub last_row: u32,
}

/// Bar chart bound to the subject column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_axis_title: String,
    pub y_axis_title: String,
    /// Header cell through the last row; the first cell names the series.
    pub data: ColumnRange,
    /// Student-name cells for the data rows only.
    pub categories: ColumnRange,
    /// 1-based anchor cell of the chart's top-left corner.
    pub anchor_row: u32,
    pub anchor_column: u16,
}

impl ChartSpec {
    /// Anchor as an A1-style address, e.g. "F9".
    pub fn anchor_cell(&self) -> String {
        format!("{}{}", column_letter(self.anchor_column), self.anchor_row)
    }
}

/// Summary of one completed pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceReport {
    /// Normalized subject name that was resolved.
    pub subject: String,
    pub subject_column: u16,
    pub records: Vec<AttendanceRecord>,
    pub highlights: Vec<Highlight>,
    pub chart: Option<ChartSpec>,
    pub output_path: PathBuf,
}

impl AttendanceReport {
    /// 1-based rows that were flagged below the threshold.
    pub fn flagged_rows(&self) -> Vec<u32> {
        self.records
            .iter()
            .filter(|r| r.flagged)
            .map(|r| r.row)
            .collect()
    }
}

/// Convert a 1-based column number to its spreadsheet letters (1 -> "A", 27 -> "AA").
pub fn column_letter(column: u16) -> String {
    let mut n = u32::from(column);
    let mut letters = Vec::new();
    while n > 0 {
        let rem = ((n - 1) % 26) as u8;
        letters.push((b'A' + rem) as char);
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_letter() {
        assert_eq!(column_letter(1), "A");
        assert_eq!(column_letter(6), "F");
        assert_eq!(column_letter(26), "Z");
        assert_eq!(column_letter(27), "AA");
        assert_eq!(column_letter(703), "AAA");
    }

    #[test]
    fn test_concat_preserves_order_and_ragged_rows() {
        let a = RawTable::new(vec![vec!["a".into(), "b".into()]]);
        let b = RawTable::new(vec![vec!["c".into()], vec!["d".into(), "e".into(), "f".into()]]);
        let combined = CombinedTable::concat(vec![a, b]);
        assert_eq!(combined.rows.len(), 3);
        assert_eq!(combined.rows[1], vec![CellValue::text("c")]);
        assert_eq!(combined.width(), 3);
    }
}
