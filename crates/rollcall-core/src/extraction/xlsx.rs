use calamine::{Data, Range, Reader, Xlsx};

use crate::error::RollcallError;
use crate::extraction::SpreadsheetOracle;
use crate::model::{CellValue, RawTable};
use std::path::Path;

/// Spreadsheet backend reading `.xlsx` workbooks with calamine.
pub struct CalamineReader;

impl CalamineReader {
    pub fn new() -> Self {
        CalamineReader
    }
}

impl Default for CalamineReader {
    fn default() -> Self {
        Self::new()
    }
}

impl SpreadsheetOracle for CalamineReader {
    fn read_sheets(&self, path: &Path) -> Result<Vec<RawTable>, RollcallError> {
        let mut workbook: Xlsx<_> = calamine::open_workbook(path)?;

        let mut tables = Vec::new();
        for name in workbook.sheet_names() {
            let range = workbook.worksheet_range(&name)?;
            tables.push(RawTable::new(range_to_rows(&range)));
        }
        Ok(tables)
    }

    fn backend_name(&self) -> &str {
        "calamine"
    }
}

/// Convert a calamine range into rows at their absolute sheet positions.
///
/// calamine trims leading blank rows and columns from a range; they are
/// padded back so row N of the sheet stays row N of the output.
pub fn range_to_rows(range: &Range<Data>) -> Vec<Vec<CellValue>> {
    let Some((start_row, start_col)) = range.start() else {
        return Vec::new();
    };

    let mut rows: Vec<Vec<CellValue>> = (0..start_row).map(|_| Vec::new()).collect();
    for row in range.rows() {
        let mut cells = vec![CellValue::Empty; start_col as usize];
        cells.extend(row.iter().map(cell_from_data));
        while cells.last().is_some_and(CellValue::is_empty) {
            cells.pop();
        }
        rows.push(cells);
    }
    rows
}

pub fn cell_from_data(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) if s.is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        // Dates and times keep their calendar form so they never read as a percentage
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|d| CellValue::Text(d.to_string()))
            .unwrap_or_default(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(e.to_string()),
    }
}
