use calamine::{Reader, Xlsx};

use crate::error::RollcallError;
use crate::extraction::xlsx::range_to_rows;
use crate::model::CellValue;
use std::path::Path;

static EMPTY: CellValue = CellValue::Empty;

/// A grid of cell values addressed by 1-based (row, column), like a spreadsheet UI.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    rows: Vec<Vec<CellValue>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Sheet {
            name: name.into(),
            rows,
        }
    }

    /// Cell at 1-based (row, column). Cells outside the grid are empty.
    pub fn cell(&self, row: u32, column: u16) -> &CellValue {
        if row == 0 || column == 0 {
            return &EMPTY;
        }
        self.rows
            .get(row as usize - 1)
            .and_then(|r| r.get(column as usize - 1))
            .unwrap_or(&EMPTY)
    }

    /// Cells of a 1-based row. Rows outside the grid are empty.
    pub fn row(&self, row: u32) -> &[CellValue] {
        if row == 0 {
            return &[];
        }
        self.rows
            .get(row as usize - 1)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Last row holding any cell, 0 for an empty sheet.
    pub fn max_row(&self) -> u32 {
        self.rows
            .iter()
            .rposition(|r| r.iter().any(|c| !c.is_empty()))
            .map(|i| i as u32 + 1)
            .unwrap_or(0)
    }

    /// Iterate `(row, column, value)` over every non-empty cell, 1-based.
    pub fn cells(&self) -> impl Iterator<Item = (u32, u16, &CellValue)> {
        self.rows.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, c)| !c.is_empty())
                .map(move |(c, value)| (r as u32 + 1, c as u16 + 1, value))
        })
    }
}

/// Re-open a workbook written by the pipeline and read one sheet.
pub fn read_sheet(path: &Path, sheet_name: &str) -> Result<Sheet, RollcallError> {
    let mut workbook: Xlsx<_> = calamine::open_workbook(path)?;

    if !workbook.sheet_names().iter().any(|n| n == sheet_name) {
        return Err(RollcallError::SheetMissing {
            sheet: sheet_name.to_string(),
            path: path.to_path_buf(),
        });
    }

    let range = workbook.worksheet_range(sheet_name)?;
    Ok(Sheet::new(sheet_name, range_to_rows(&range)))
}
